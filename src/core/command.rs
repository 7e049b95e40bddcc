use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use crate::core::library::{ErrorKind, LibraryError};

// CommandError names the command that failed and keeps the service error behind it.
#[derive(Debug)]
pub struct CommandError {
    pub command: &'static str,
    pub source: LibraryError,
}

impl CommandError {
    pub fn new(command: &'static str, source: LibraryError) -> Self {
        Self { command, source }
    }

    // wrap adapts a LibraryResult error for `map_err`.
    pub fn wrap(command: &'static str) -> impl FnOnce(LibraryError) -> CommandError {
        move |source| CommandError::new(command, source)
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.command, self.source)
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}
