use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LintError {
    #[error("unable to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("message {0} is already registered")]
    DuplicateMessage(String),

    #[error("no message with id or symbol {0}")]
    UnknownMessage(String),
}

pub type LintResult<T> = Result<T, LintError>;
