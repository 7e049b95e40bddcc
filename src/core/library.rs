use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// ErrorKind classifies a failure by what the caller can do about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // the store rejected the call and retrying will not help
    Store,
    // the store is throttled or unreachable, retry with a backoff
    Unavailable,
    AccessDenied,
    // duplicate key on create or stale version on update
    Conflict,
    NotFound,
    // malformed input such as a missing key or a bad page token
    Invalid,
    Serialization,
    // the event gateway could not deliver
    Gateway,
}

#[derive(Debug)]
pub struct LibraryError {
    kind: ErrorKind,
    message: String,
}

impl LibraryError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invalid, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    // from_status maps an http status returned by a remote store.
    pub fn from_status(message: impl Into<String>, status: u16, throttled: bool) -> Self {
        let kind = match status {
            _ if throttled || status >= 500 => ErrorKind::Unavailable,
            404 => ErrorKind::NotFound,
            401 | 403 => ErrorKind::AccessDenied,
            409 => ErrorKind::Conflict,
            400..=499 => ErrorKind::Invalid,
            _ => ErrorKind::Store,
        };
        Self::new(kind, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn retryable(&self) -> bool {
        self.kind == ErrorKind::Unavailable
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::new(ErrorKind::Serialization, err.to_string())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for LibraryError {}

// LibraryResult is returned by repositories, providers and services.
pub type LibraryResult<T> = Result<T, LibraryError>;

// PaginatedResult is one page of a repository query. `next_page` is an opaque
// token to pass back as `page`, absent on the last page.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub page: Option<String>,
    pub page_size: usize,
    pub next_page: Option<String>,
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub fn new(page: Option<&str>, page_size: usize,
               next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// TransactionStatus is the lifecycle state of a borrowing record. Only the exact
// lowercase literal "issued" parses to Issued. Values this service does not act on
// are kept verbatim in Other so they survive a save.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Issued,
    Returned,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Issued => "issued",
            TransactionStatus::Returned => "returned",
            TransactionStatus::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_issued(&self) -> bool {
        matches!(self, TransactionStatus::Issued)
    }
}

impl From<String> for TransactionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "issued" => TransactionStatus::Issued,
            "returned" => TransactionStatus::Returned,
            _ => TransactionStatus::Other(raw),
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(raw: &str) -> Self {
        TransactionStatus::from(raw.to_string())
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
