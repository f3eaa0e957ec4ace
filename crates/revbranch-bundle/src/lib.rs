//! Writer for a mercurial "HG10UN" legacy bundle containing changelog-only
//! revisions. Used to hand off the branch labels recovered by
//! `revbranch-core` to tooling that still expects a mercurial changelog
//! group, without materializing manifests or file revlogs.

mod changelog;
mod chunk;
mod hex;
mod node;
mod writer;

pub use hex::{from_hex, to_hex};
pub use node::NULL_NODE;
pub use writer::{write_bundle, CommitMeta};

use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidRevisionId(Vec<u8>),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRevisionId(id) => {
                write!(f, "invalid revision id: {}", String::from_utf8_lossy(id))
            }
            Error::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::InvalidRevisionId(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
