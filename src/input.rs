//! Reading prefix lists from a file or STDIN.
//!
//! Lists are free-form: prefixes are separated by any whitespace and
//! everything from `#` to the end of a line is a comment.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Path that selects STDIN.
pub const STDIN_PATH: &str = "-";

/// Split one line into prefix tokens, dropping comments.
fn line_tokens(line: &str) -> impl Iterator<Item = &str> {
    let content = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    content.split_whitespace()
}

/// Collect the distinct tokens of a prefix list.
///
/// # Examples
/// ```
/// use aggregate_prefixes::input::tokenize;
/// let tokens = tokenize("# edge routers\n10.0.0.0/8 10.0.0.0/8\n192.0.2.0/24 # lab\n");
/// assert_eq!(tokens.len(), 2);
/// ```
pub fn tokenize(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .flat_map(line_tokens)
        .map(str::to_string)
        .collect()
}

/// Read the distinct tokens from a reader, line by line.
pub fn read_tokens<R: BufRead>(reader: R) -> Result<BTreeSet<String>> {
    let mut tokens = BTreeSet::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", idx + 1))?;
        tokens.extend(line_tokens(&line).map(str::to_string));
    }
    Ok(tokens)
}

/// Read the distinct tokens from a file, or from STDIN when `path` is `-`.
pub fn read_source(path: &Path) -> Result<BTreeSet<String>> {
    let tokens = if path.as_os_str() == STDIN_PATH {
        debug!("Reading prefixes from STDIN");
        read_tokens(io::stdin().lock()).context("Failed to read prefixes from STDIN")?
    } else {
        debug!("Reading prefixes from {:?}", path);
        let file = File::open(path)
            .with_context(|| format!("Failed to open prefix list: {:?}", path))?;
        read_tokens(BufReader::new(file))
            .with_context(|| format!("Failed to read prefix list: {:?}", path))?
    };
    debug!("Read {} distinct tokens", tokens.len());
    Ok(tokens)
}
