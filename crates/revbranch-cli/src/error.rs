use std::fmt;

#[derive(Debug)]
pub enum Error {
    Git(git2::Error),
    Notes(revbranch_notes::Error),
    Inference(revbranch_core::Error),
    Bundle(revbranch_bundle::Error),
    TopoSort(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Git(e) => write!(f, "git error: {}", e),
            Error::Notes(e) => write!(f, "notes error: {}", e),
            Error::Inference(e) => write!(f, "inference error: {}", e),
            Error::Bundle(e) => write!(f, "bundle error: {}", e),
            Error::TopoSort(msg) => write!(f, "topological sort error: {}", msg),
            Error::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<git2::Error> for Error {
    fn from(e: git2::Error) -> Self {
        Error::Git(e)
    }
}

impl From<revbranch_notes::Error> for Error {
    fn from(e: revbranch_notes::Error) -> Self {
        Error::Notes(e)
    }
}

impl From<revbranch_core::Error> for Error {
    fn from(e: revbranch_core::Error) -> Self {
        Error::Inference(e)
    }
}

impl From<revbranch_bundle::Error> for Error {
    fn from(e: revbranch_bundle::Error) -> Self {
        Error::Bundle(e)
    }
}

impl From<revbranch_git::Error> for Error {
    fn from(e: revbranch_git::Error) -> Self {
        match e {
            revbranch_git::Error::Git(inner) => Error::Git(inner),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
