use std::fmt::{self, Display};

use failure::{Backtrace, Context, Fail};

use crate::dependency::DependencyKind;
use crate::models::PkgKey;

/// The stage of an operation that failed.
#[derive(Clone, Debug, Eq, PartialEq, Fail)]
pub enum ErrorKind {
    #[fail(display = "Error creating primary database")]
    CreateSchema,
    #[fail(display = "Error opening primary database")]
    Open,
    #[fail(display = "Primary database has no {} table", _0)]
    MissingTable(String),
    #[fail(display = "Unsupported primary database version {}", _0)]
    SchemaVersion(i32),
    #[fail(display = "Missing checksum for package {}", _0)]
    MissingChecksum(String),
    #[fail(display = "Error inserting package {}", _0)]
    InsertPackage(String),
    #[fail(display = "Error inserting file {}", _0)]
    InsertFile(String),
    #[fail(display = "Error inserting {} of package {}", _0, _1)]
    InsertDependency(DependencyKind, String),
    #[fail(display = "Error deleting package {}", _0)]
    DeletePackage(PkgKey),
    #[fail(display = "Error listing packages")]
    ListPackages,
    #[fail(display = "Error reading {} of package {}", _0, _1)]
    ReadDependencies(DependencyKind, PkgKey),
    #[fail(display = "Error reading files of package {}", _0)]
    ReadFiles(PkgKey),
    #[fail(display = "Error reading details of package {}", _0)]
    ReadDetails(PkgKey),
    #[fail(display = "Error accessing db_info")]
    DbInfo,
    #[fail(display = "Error decoding primary metadata")]
    DecodeMetadata,
    #[fail(display = "Error encoding primary metadata")]
    EncodeMetadata,
    #[fail(display = "I/O error on {}", _0)]
    Io(String),
    #[fail(display = "Transaction failed")]
    Transaction,
}

#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.inner.get_context()
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner.cause() {
            Some(cause) => write!(f, "{}: {}", self.inner, cause),
            None => Display::fmt(&self.inner, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Context::new(kind) }
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(inner: Context<ErrorKind>) -> Error {
        Error { inner }
    }
}

// Needed by `Connection::transaction`, which reports BEGIN/COMMIT failures
// through the closure's error type.
impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Error {
        e.context(ErrorKind::Transaction).into()
    }
}
