// Path handling and line reading shared by the file loaders

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use crate::error::{CrystalliteError, Result};

/// Replace a leading `~` with the home directory.
///
/// Only done on unix targets; everywhere else (or without `HOME`) the name is
/// returned unchanged.
pub fn expand_home(name: &str) -> PathBuf {
    #[cfg(unix)]
    {
        if name == "~" || name.starts_with("~/") {
            if let Some(home) = std::env::var_os("HOME") {
                let mut expanded = home;
                expanded.push(&name[1..]);
                return PathBuf::from(expanded);
            }
        }
    }
    PathBuf::from(name)
}

/// Append `.extension` to the full path, keeping any existing extension.
pub fn with_appended_extension(path: &Path, extension: &str) -> PathBuf {
    let mut appended = OsString::from(path.as_os_str());
    appended.push(".");
    appended.push(extension);
    PathBuf::from(appended)
}

/// Open `path`, falling back to `path.extension` when the literal path fails.
///
/// Returns the path that was actually opened. On failure the error names the
/// fallback path, which is the last one tried.
pub fn open_with_fallback(path: &Path, extension: &str) -> Result<(PathBuf, File)> {
    if let Ok(file) = File::open(path) {
        return Ok((path.to_path_buf(), file));
    }
    let fallback = with_appended_extension(path, extension);
    match File::open(&fallback) {
        Ok(file) => Ok((fallback, file)),
        Err(source) => Err(CrystalliteError::io(&fallback, source)),
    }
}

/// Pull the next line, treating end-of-file as an I/O failure at `line`.
pub fn next_line<B: BufRead>(lines: &mut io::Lines<B>, path: &Path, line: usize) -> Result<String> {
    match lines.next() {
        Some(Ok(text)) => Ok(text),
        Some(Err(source)) => Err(read_error(path, line, source)),
        None => Err(CrystalliteError::io(
            path,
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("unable to read line {}", line),
            ),
        )),
    }
}

/// Classify a failed line read: undecodable content is a content error,
/// anything else is I/O.
pub fn read_error(path: &Path, line: usize, source: io::Error) -> CrystalliteError {
    if source.kind() == io::ErrorKind::InvalidData {
        CrystalliteError::config(path.display().to_string(), line, "line is not valid UTF-8")
    } else {
        CrystalliteError::io(path, source)
    }
}
