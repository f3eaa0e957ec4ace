//! Persistence of revision-to-branch assignments in a git-notes tree.
//!
//! A revbranch notes tree is a plain hex-keyed blob tree, one 40-byte path
//! per revision pointing at a blob containing the branch name. It's read and
//! written through the same ref a user would see with `git notes --ref
//! revbranch`.

mod store;
mod tree;

pub use store::{read_rev_branches, write_rev_branches};

use std::fmt;

/// Git file modes that can legally appear inside a notes tree.
pub(crate) const MODE_BLOB: i32 = 0o100644;
pub(crate) const MODE_TREE: i32 = 0o40000;

/// Length in hex characters of a full git object id (SHA-1 revision id).
pub(crate) const REV_HEX_LEN: usize = 40;

#[derive(Debug)]
pub enum Error {
    Git(git2::Error),
    MalformedNotes(String),
    InvalidRevisionId(Vec<u8>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Git(e) => write!(f, "git error: {}", e),
            Error::MalformedNotes(msg) => write!(f, "malformed notes tree: {}", msg),
            Error::InvalidRevisionId(id) => {
                write!(f, "invalid revision id: {}", String::from_utf8_lossy(id))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Git(e) => Some(e),
            _ => None,
        }
    }
}

impl From<git2::Error> for Error {
    fn from(e: git2::Error) -> Self {
        Error::Git(e)
    }
}
