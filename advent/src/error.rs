//! Error type shared by the puzzle parsers and the command-line driver.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can make a single puzzle run fail.
#[derive(Debug, Error)]
pub enum Error {
    /// The puzzle input could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The input has no non-blank lines.
    #[error("input contains no lines")]
    EmptyInput,
    /// A map row differs in width from the first row.
    #[error("line {line}: expected {expected} cells, found {found}")]
    JaggedMap {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A map cell is not an elevation, start or end marker.
    #[error("line {line}, column {column}: unexpected character {found:?}")]
    BadCell {
        line: usize,
        column: usize,
        found: char,
    },
    #[error("map has no start position")]
    MissingStart,
    #[error("map has no end position")]
    MissingEnd,
    /// A line of the valve scan does not describe a valve.
    #[error("line {line}: not a valve description")]
    BadValveLine { line: usize },
    /// A tunnel or a start position names a valve that was never described.
    #[error("unknown valve {0:?}")]
    UnknownValve(String),
    /// More valves with positive flow than the search can track.
    #[error("{0} working valves is more than the supported 64")]
    TooManyValves(usize),
    #[error("no path from start to end")]
    NoPath,
    /// The released pressure does not fit in 64 bits.
    #[error("released pressure overflows a 64-bit counter")]
    PressureOverflow,
    #[error("teaching time {teaching} exceeds the timer {timer}")]
    TimerTooShort { timer: u32, teaching: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Read a puzzle input file.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = read_input(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().starts_with("cannot read /definitely/not/here.txt"));
    }

    #[test]
    fn messages() {
        let err = Error::JaggedMap {
            line: 3,
            expected: 8,
            found: 7,
        };
        assert_eq!(err.to_string(), "line 3: expected 8 cells, found 7");
        assert_eq!(
            Error::UnknownValve("ZZ".into()).to_string(),
            "unknown valve \"ZZ\""
        );
    }
}
