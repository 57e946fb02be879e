use std::io;
use std::path::Path;

use thiserror::Error;

/// Errors raised while loading crystallite sets, triangle meshes and grid maps.
///
/// Every variant carries the file or set name it refers to so that the
/// message alone is enough to locate the offending input.
#[derive(Error, Debug)]
pub enum CrystalliteError {
    /// A file could not be opened or was shorter than its header promised.
    #[error("unable to read '{origin}': {source}")]
    Io {
        origin: String,
        #[source]
        source: io::Error,
    },

    /// Structurally invalid content.
    #[error("{message} (in '{origin}'{})", line_suffix(.line))]
    Config {
        origin: String,
        line: Option<usize>,
        message: String,
    },

    /// The requested `from..=to` slice does not fit the available crystallites.
    #[error("bad crystallite range {from}..{to} for '{name}' with {available} crystallites: {reason}")]
    Range {
        name: String,
        from: i64,
        to: i64,
        available: usize,
        reason: String,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|line| format!(", line {}", line))
        .unwrap_or_default()
}

impl CrystalliteError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        CrystalliteError::Io {
            origin: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn config(origin: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        CrystalliteError::Config {
            origin: origin.into(),
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn config_file(origin: impl Into<String>, message: impl Into<String>) -> Self {
        CrystalliteError::Config {
            origin: origin.into(),
            line: None,
            message: message.into(),
        }
    }
}

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, CrystalliteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_message_names_file_and_line() {
        let err = CrystalliteError::config("grid.cry", 4, "crystallite number 3 has zero weight");
        assert_eq!(
            err.to_string(),
            "crystallite number 3 has zero weight (in 'grid.cry', line 4)"
        );

        let err = CrystalliteError::config_file("a_b.map", "target crystallite 2 is missing");
        assert_eq!(err.to_string(), "target crystallite 2 is missing (in 'a_b.map')");
    }

    #[test]
    fn test_io_message_names_path() {
        let err = CrystalliteError::io(
            "missing.cry",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("'missing.cry'"));
    }
}
