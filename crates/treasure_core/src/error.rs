use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    SaveFileMissing,
    CatalogUnavailable,
    MalformedRecord,
    NoCapacity,
    IndexOutOfRange,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// `NoCapacity` is the only condition the interactive loop survives;
    /// everything else aborts before further commands are accepted.
    pub fn is_fatal(&self) -> bool {
        self.code != CoreErrorCode::NoCapacity
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}
