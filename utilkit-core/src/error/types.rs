//! Core error types for utilkit
//!
//! This module contains the tagged `UtilkitError` representation and the
//! associated `Result` aliases.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Shared reference to the error that caused another one.
///
/// Causes are reference counted: the wrapping error never owns the cause's
/// lifecycle, and the same cause may be attached to many errors.
pub type SharedCause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// The kind tag carried by every `UtilkitError`
///
/// The kind decides the error's display name, replacing a hierarchy of
/// error subclasses with a single flat tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller-defined error with its own display name
    Custom(Cow<'static, str>),
    /// Error carrying a required HTTP-style status code
    Status,
    /// A supposedly impossible value reached an exhaustive match
    Unreachable,
    /// Invalid or unparsable configuration
    Configuration,
    /// Failure inside utilkit itself (abandoned deferred, panicked producer)
    Internal,
}

impl ErrorKind {
    /// Name used when displaying errors of this kind
    pub fn name(&self) -> &str {
        match self {
            ErrorKind::Custom(name) => name.as_ref(),
            ErrorKind::Status => "StatusError",
            ErrorKind::Unreachable => "UnreachableCheck",
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::Internal => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tagged error type for utilkit operations
///
/// Every error carries a kind tag and a message, plus optional metadata:
///
/// - **code**: machine-readable error code (e.g. `"ENOENT"`)
/// - **status_code**: numeric HTTP-style status
/// - **cause**: shared reference to the underlying error
///
/// Errors are cheap to clone so that one failure can be handed to every
/// awaiter of a shared result.
#[derive(Error, Debug, Clone)]
#[error("{}: {message}", .kind.name())]
pub struct UtilkitError {
    pub(crate) kind: ErrorKind,
    pub(crate) message: String,
    pub(crate) code: Option<String>,
    pub(crate) status_code: Option<u16>,
    #[source]
    pub(crate) cause: Option<SharedCause>,
}

impl UtilkitError {
    /// The kind tag of this error
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Display name, derived from the kind
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The error this one wraps, if any
    pub fn cause(&self) -> Option<&SharedCause> {
        self.cause.as_ref()
    }

    pub fn is_unreachable(&self) -> bool {
        self.kind == ErrorKind::Unreachable
    }
}

impl PartialEq for UtilkitError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.code == other.code
            && self.status_code == other.status_code
            && match (&self.cause, &other.cause) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

pub type Result<T> = std::result::Result<T, UtilkitError>;

pub type UtilkitResult<T> = Result<T>;
