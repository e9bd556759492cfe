use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use token_table::{load_file, load_tokens, IndexError, Report, TokenTable};

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("token-table-{}-{name}", std::process::id()));
    fs::write(&path, contents).expect("write scratch file");
    path
}

#[test]
fn load_file_then_report() {
    let path = scratch_file("words.txt", "if\nelse\nwhile\nif\nfor\n");
    let mut t = TokenTable::new();
    let summary = load_file(&mut t, &path).expect("load ok");
    let _ = fs::remove_file(&path);

    assert_eq!(summary.inserted, 4);
    assert_eq!(summary.duplicates, vec!["if".to_string()]);

    let report = Report::from_table(&t);
    assert_eq!(report.total_words, 4);
    assert_eq!(report.table_size, 67);
    let mut words: Vec<&str> = report
        .rows
        .iter()
        .flat_map(|r| r.tokens.iter().map(String::as_str))
        .collect();
    words.sort_unstable();
    assert_eq!(words, vec!["else", "for", "if", "while"]);

    let text = report.to_string();
    assert!(text.starts_with("Table Index\tStored word(s)\n"));
    assert!(text.contains("HASHSIZE\t=         67"));
}

#[test]
fn report_lists_chained_tokens_under_their_home() {
    let mut t = TokenTable::with_hasher(|_: &str, _: usize| 0usize);
    load_tokens(&mut t, Cursor::new("one\ntwo\nthree\n")).unwrap();
    let report = Report::from_table(&t);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].index, 0);
    assert_eq!(report.rows[0].tokens, vec!["three", "two", "one"]);
    assert!(report.to_string().contains("At address [0]: three two one"));
}

#[test]
fn missing_input_error_names_the_file() {
    let mut t = TokenTable::new();
    let path = std::env::temp_dir().join("token-table-does-not-exist.txt");
    let err = match load_file(&mut t, &path) {
        Err(e) => e,
        Ok(s) => panic!("loaded {} tokens from a missing file", s.inserted),
    };
    match &err {
        IndexError::Input { path: p, source } => {
            assert_eq!(p, &path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let rendered = err.to_string();
    assert!(rendered.starts_with("can't open input file "));
    assert!(rendered.contains(&path.display().to_string()));
}

#[test]
fn slot_views_agree_with_report_rows() {
    let mut t = TokenTable::new();
    // cat and cot share home 66; cot is relocated into slot 0.
    load_tokens(&mut t, Cursor::new("cat\ncot\nint\nchar\n")).unwrap();
    let report = Report::from_table(&t);
    let views: Vec<_> = t.slots().collect();
    assert_eq!(views.len(), report.rows.len());
    for (view, row) in views.iter().zip(&report.rows) {
        assert_eq!(view.index(), row.index);
        assert!(!view.is_empty());
        assert_eq!(view.len(), row.tokens.len());
        assert_eq!(view.occupant(), row.tokens.first().map(String::as_str));
    }

    let slot0 = views.iter().find(|v| v.index() == 0).expect("cot sits in slot 0");
    let entries: Vec<(&str, usize)> = slot0.entries().collect();
    assert_eq!(entries, vec![("cot", 66)]);
}
