//! Text dump of a table: one row per non-empty slot, then totals.

use crate::hashing::SlotHasher;
use crate::table::TokenTable;
use std::fmt;
use std::io::Write;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotRow {
    pub index: usize,
    /// Occupant first, then the chain in link order.
    pub tokens: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    pub rows: Vec<SlotRow>,
    pub total_words: usize,
    pub table_size: usize,
}

impl Report {
    pub fn from_table<H: SlotHasher>(table: &TokenTable<H>) -> Self {
        let rows: Vec<SlotRow> = table
            .slots()
            .map(|view| SlotRow {
                index: view.index(),
                tokens: view.tokens().map(str::to_owned).collect(),
            })
            .collect();
        let total_words = rows.iter().map(|r| r.tokens.len()).sum();
        Self {
            rows,
            total_words,
            table_size: table.capacity(),
        }
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        write!(out, "{self}")?;
        out.flush()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table Index\tStored word(s)")?;
        writeln!(f, "===========\t==============")?;
        for row in &self.rows {
            write!(f, "\nAt address [{}]:", row.index)?;
            for token in &row.tokens {
                write!(f, " {token}")?;
            }
        }
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "Total words\t= {:>10}", self.total_words)?;
        writeln!(f, "HASHSIZE\t= {:>10}", self.table_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_has_only_header_and_trailer() {
        let t = TokenTable::new();
        let r = Report::from_table(&t);
        assert!(r.rows.is_empty());
        assert_eq!(r.total_words, 0);
        assert_eq!(r.table_size, 67);
        assert_eq!(
            r.to_string(),
            "Table Index\tStored word(s)\n===========\t==============\n\n\n\
             Total words\t=          0\nHASHSIZE\t=         67\n"
        );
    }

    #[test]
    fn rows_follow_slot_order_and_chain_order() {
        let mut t = TokenTable::with_hasher(|k: &str, _: usize| -> usize {
            if k.starts_with('b') {
                3
            } else {
                0
            }
        });
        t.insert("b1").unwrap();
        t.insert("a1").unwrap();
        // slot 0 steps to itself, so this one chains
        t.insert("a2").unwrap();

        let r = Report::from_table(&t);
        assert_eq!(
            r.rows,
            vec![
                SlotRow {
                    index: 0,
                    tokens: vec!["a2".into(), "a1".into()],
                },
                SlotRow {
                    index: 3,
                    tokens: vec!["b1".into()],
                },
            ]
        );
        assert_eq!(r.total_words, t.len());

        let text = r.to_string();
        assert!(text.contains("\nAt address [0]: a2 a1"));
        assert!(text.contains("\nAt address [3]: b1"));
        assert!(text.contains("Total words\t=          3"));
    }

    #[test]
    fn write_to_matches_display() {
        let mut t = TokenTable::new();
        t.insert("apple").unwrap();
        let r = Report::from_table(&t);
        let mut buf = Vec::new();
        r.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), r.to_string());
    }
}
