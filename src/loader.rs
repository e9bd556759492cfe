//! Feeds a line-per-token source into a table.
//!
//! Each token is looked up before it is inserted; tokens the table already
//! reports are skipped and logged as duplicates.

use crate::error::{IndexError, Result};
use crate::hashing::SlotHasher;
use crate::table::{Placement, TokenTable};
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub relocated: usize,
    pub chained: usize,
    pub blank: usize,
    /// Tokens skipped because the table already reported them, in input order.
    pub duplicates: Vec<String>,
}

/// Insert every non-blank line of `reader` that the table does not already
/// contain. Line terminators (`\n`, `\r\n`) are stripped; other whitespace
/// is part of the token.
pub fn load_tokens<R, H>(table: &mut TokenTable<H>, reader: R) -> Result<LoadSummary>
where
    R: BufRead,
    H: SlotHasher,
{
    let mut summary = LoadSummary::default();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            summary.blank += 1;
            continue;
        }
        if table.contains(&line) {
            warn!("{line:?} has already been entered into the table");
            summary.duplicates.push(line);
            continue;
        }
        let inserted = table.insert(&line)?;
        summary.inserted += 1;
        match inserted.placement {
            Placement::Primary => {}
            Placement::Relocated { .. } => summary.relocated += 1,
            Placement::Chained => summary.chained += 1,
        }
    }
    info!(
        "loaded {} tokens ({} relocated, {} chained, {} duplicates)",
        summary.inserted,
        summary.relocated,
        summary.chained,
        summary.duplicates.len()
    );
    Ok(summary)
}

pub fn load_file<P, H>(table: &mut TokenTable<H>, path: P) -> Result<LoadSummary>
where
    P: AsRef<Path>,
    H: SlotHasher,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IndexError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    load_tokens(table, BufReader::new(file))
}
