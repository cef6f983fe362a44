use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BcdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid alias: {0:?} (use letters, digits, '_' or '-')")]
    InvalidAlias(String),

    #[error("Shell file not found: {}", .0.display())]
    MissingShellFile(PathBuf),
}
