//! Constructor methods and builders for UtilkitError
//!
//! This module provides factory methods for each error kind and builder
//! methods for attaching the optional metadata extras.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::types::{ErrorKind, SharedCause, UtilkitError};

impl UtilkitError {
    /// Create an error of any kind with no extras attached
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        UtilkitError {
            kind,
            message: message.into(),
            code: None,
            status_code: None,
            cause: None,
        }
    }

    /// Create a caller-defined error whose display name is `name`
    ///
    /// # Examples
    /// ```rust
    /// use utilkit_core::error::UtilkitError;
    ///
    /// let err = UtilkitError::custom("QuotaError", "too many requests").with_code("E_QUOTA");
    /// assert_eq!(err.to_string(), "QuotaError: too many requests");
    /// assert_eq!(err.code(), Some("E_QUOTA"));
    /// ```
    pub fn custom(name: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom(name.into()), message)
    }

    /// Create an error with a required HTTP-style status code
    ///
    /// # Examples
    /// ```rust
    /// use utilkit_core::error::UtilkitError;
    ///
    /// let err = UtilkitError::status(404, "no such user");
    /// assert_eq!(err.status_code(), Some(404));
    /// assert_eq!(err.name(), "StatusError");
    /// ```
    pub fn status(status_code: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorKind::Status, message);
        err.status_code = Some(status_code);
        err
    }

    /// Create an unreachable-case error for a value that should not exist
    pub fn unreachable<V: fmt::Debug + ?Sized>(value: &V) -> Self {
        Self::unreachable_with(value, |v| format!("{:?}", v))
    }

    /// Create an unreachable-case error, rendering the value with `extract`
    ///
    /// The extractor only affects the message; use it to log a
    /// discriminating field instead of the whole value.
    pub fn unreachable_with<V, F, D>(value: &V, extract: F) -> Self
    where
        V: ?Sized,
        F: FnOnce(&V) -> D,
        D: fmt::Display,
    {
        Self::new(
            ErrorKind::Unreachable,
            format!("Unhandled case value: {}", extract(value)),
        )
    }

    /// Create a configuration error for `component`
    pub fn configuration(component: impl AsRef<str>, message: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::Configuration,
            format!("{}: {}", component.as_ref(), message.as_ref()),
        )
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attach an error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach a numeric status code
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Attach the error that caused this one
    pub fn with_cause<E>(self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.with_shared_cause(Arc::new(cause))
    }

    /// Attach an already shared cause without re-wrapping it
    pub fn with_shared_cause(mut self, cause: SharedCause) -> Self {
        self.cause = Some(cause);
        self
    }
}
