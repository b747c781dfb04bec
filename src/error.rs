//! Error classification shared by every service.
//!
//! Services return their own `thiserror` enums; [`ErrorKind`] is the coarse
//! category an outer transport maps onto a status code.

use std::fmt;

/// Broad category of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request was malformed or referenced unknown rows.
    InvalidInput,
    /// The addressed resource does not exist.
    NotFound,
    /// The caller may not act on the resource.
    Forbidden,
    /// The request clashes with existing state.
    Conflict,
    /// Anything the caller cannot fix.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status code conventionally used for this category.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    /// Returns a stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
