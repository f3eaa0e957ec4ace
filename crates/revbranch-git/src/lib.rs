//! Reads the pieces of a real git repository the branch inference engine and
//! bundle writer need: per-branch tip revisions, a revision's parent list,
//! and per-commit metadata for changelog reconstruction.

mod commit;
mod revisions;

pub use commit::read_commit_meta;
pub use revisions::read_git_revisions;

use std::fmt;

#[derive(Debug)]
pub enum Error {
    Git(git2::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Git(e) => write!(f, "git error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Git(e) => Some(e),
        }
    }
}

impl From<git2::Error> for Error {
    fn from(e: git2::Error) -> Self {
        Error::Git(e)
    }
}
