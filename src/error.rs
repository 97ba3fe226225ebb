//! Error type for configuration and I/O failures.
//!
//! Mirrors the original tool's two-outcome model: a usage problem or an I/O
//! problem, both of which abort the run. There is no retry or partial-failure
//! path (duplication detection is a batch operation).

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum DupfindError {
    /// Bad flag value, missing argument, or an empty resolved file list.
    Usage(String),
    /// A path given as a file actually names a directory.
    IsADirectory(PathBuf),
    /// Any other I/O failure while loading a file.
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for DupfindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DupfindError::Usage(msg) => write!(f, "{msg}"),
            DupfindError::IsADirectory(path) => {
                write!(f, "dupfind: {} is a directory.", path.display())
            }
            DupfindError::Io { path, source } => {
                write!(f, "dupfind: File {} not found: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DupfindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DupfindError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
