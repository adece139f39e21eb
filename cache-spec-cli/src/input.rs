//! Reading specification strings from files.
//!
//! A spec file holds one specification per line. Blank lines and lines starting with `#`
//! are skipped, so files can carry comments.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A specification string and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLine {
    /// Human-readable origin, e.g. `specs.txt:3` or `arg 1`.
    pub origin: String,
    /// The specification text, untrimmed.
    pub text: String,
}

impl SpecLine {
    /// Wraps a specification given on the command line.
    pub fn from_arg(index: usize, text: impl Into<String>) -> Self {
        Self {
            origin: format!("arg {}", index + 1),
            text: text.into(),
        }
    }
}

/// Returns `true` for lines that hold no specification.
fn is_skipped(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Reads every specification in `reader`, labelling each with `name:line`.
pub fn read_specs<R: BufRead>(reader: R, name: &str) -> io::Result<Vec<SpecLine>> {
    let mut specs = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if is_skipped(&line) {
            continue;
        }
        specs.push(SpecLine {
            origin: format!("{}:{}", name, line_num + 1),
            text: line,
        });
    }
    Ok(specs)
}

/// Reads every specification in the file at `path`.
pub fn read_spec_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<SpecLine>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_specs(BufReader::new(file), &path.display().to_string())
}
