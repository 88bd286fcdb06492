//! Normalization of arbitrary error-shaped values
//!
//! Errors coming from foreign sources (HTTP client bodies, subprocess
//! wrappers, JSON-RPC payloads) rarely share a type. This module treats them
//! structurally: anything exposing a truthy `message`, `code` or `stack` is
//! error-like, and everything else can be wrapped into an [`ErrorLike`] with
//! a usable message.
//!
//! Foreign values are represented as [`serde_json::Value`]. Rust errors are
//! converted through [`ErrorLike::from_error`], which is always error-like.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ErrorKind, UtilkitError};

/// Message used when the value has no usable textual form
pub const UNKNOWN_ERROR: &str = "[Unknown error]";

/// Message used when there is no value at all
pub const UNDEFINED_ERROR: &str = "[Undefined error]";

/// Structural view over an error-shaped value
///
/// Every field is optional. Properties of the source object that are not
/// recognised (or have an unexpected type) are kept verbatim in `extra`, so
/// serializing a view of an error-like object yields the object unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLike {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ErrorLike>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorLike {
    /// A bare error-like carrying only a message
    pub fn from_message(message: impl Into<String>) -> Self {
        ErrorLike {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Lift the recognised fields out of a JSON object
    ///
    /// Nothing is dropped: keys with an unexpected type stay in `extra`.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let mut view = ErrorLike::default();

        for (key, value) in object {
            let lifted = match (key.as_str(), value) {
                ("message", Value::String(s)) => set(&mut view.message, s),
                ("code", Value::String(s)) => set(&mut view.code, s),
                ("cmd", Value::String(s)) => set(&mut view.cmd, s),
                ("signal", Value::String(s)) => set(&mut view.signal, s),
                ("statusMessage", Value::String(s)) => set(&mut view.status_message, s),
                ("stack", Value::String(s)) => set(&mut view.stack, s),
                ("statusCode", Value::Number(n)) => {
                    match n.as_u64().and_then(|n| u16::try_from(n).ok()) {
                        Some(status) => {
                            view.status_code = Some(status);
                            true
                        }
                        None => false,
                    }
                }
                ("cause", Value::Object(cause)) => {
                    view.cause = Some(Box::new(ErrorLike::from_object(cause)));
                    true
                }
                _ => false,
            };

            if !lifted {
                view.extra.insert(key.clone(), value.clone());
            }
        }

        view
    }

    /// Convert a Rust error, following its `source()` chain into `cause`
    ///
    /// Errors that already are an `ErrorLike` are cloned as is, and
    /// `UtilkitError` contributes its code and status code.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        if let Some(like) = err.downcast_ref::<ErrorLike>() {
            return like.clone();
        }

        if let Some(utilkit) = err.downcast_ref::<UtilkitError>() {
            let mut view = ErrorLike::from_message(utilkit.message());
            view.code = utilkit.code().map(str::to_string);
            view.status_code = utilkit.status_code();
            view.extra
                .insert("name".to_string(), Value::String(utilkit.name().to_string()));
            // The shared cause must be unwrapped to reach its concrete type
            view.cause = utilkit
                .cause()
                .map(|cause| Box::new(ErrorLike::from_error(&**cause)));
            return view;
        }

        let mut view = ErrorLike::from_message(err.to_string());
        view.cause = err.source().map(|source| Box::new(ErrorLike::from_error(source)));
        view
    }

    /// The message, or the unknown-error placeholder when there is none
    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(UNKNOWN_ERROR)
    }

    /// The `name` property, if the source value had one
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }

    /// Serialize back to a JSON value
    pub fn to_value(&self) -> Value {
        // Every field is a string, number, map or nested ErrorLike
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn set(slot: &mut Option<String>, value: &str) -> bool {
    *slot = Some(value.to_string());
    true
}

impl fmt::Display for ErrorLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_or_default())
    }
}

impl std::error::Error for ErrorLike {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl From<&UtilkitError> for ErrorLike {
    fn from(err: &UtilkitError) -> Self {
        ErrorLike::from_error(err)
    }
}

impl From<ErrorLike> for UtilkitError {
    /// Adopt a foreign error, keeping its code, status and cause chain
    fn from(like: ErrorLike) -> Self {
        let name = like.name().unwrap_or("Error").to_string();
        let mut err = UtilkitError::new(
            ErrorKind::Custom(name.into()),
            like.message_or_default().to_string(),
        );
        if let Some(code) = &like.code {
            err = err.with_code(code.clone());
        }
        if let Some(status) = like.status_code {
            err = err.with_status_code(status);
        }
        if let Some(cause) = like.cause {
            err = err.with_shared_cause(Arc::new(*cause));
        }
        err
    }
}

/// Loose truthiness of a JSON value
///
/// `null`, `false`, `0`, NaN and `""` are falsy; arrays and objects are
/// always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether `value` already looks like an error
///
/// True iff `value` is an object with a truthy `message`, `code` or `stack`.
/// An empty `message` alone does not qualify.
pub fn is_error_like(value: &Value) -> bool {
    match value {
        Value::Object(object) => ["message", "code", "stack"]
            .iter()
            .any(|key| object.get(*key).is_some_and(is_truthy)),
        _ => false,
    }
}

/// Normalize any value into an [`ErrorLike`]
///
/// Error-like objects are viewed losslessly. Anything else is wrapped, using
/// the value's textual form as the message, `[Unknown error]` when that form
/// is empty, and `[Undefined error]` for falsy values.
pub fn as_error_like(value: &Value) -> ErrorLike {
    match value {
        Value::Object(object) if is_error_like(value) => ErrorLike::from_object(object),
        value if is_truthy(value) => {
            let text = textual_form(value);
            if text.is_empty() {
                ErrorLike::from_message(UNKNOWN_ERROR)
            } else {
                ErrorLike::from_message(text)
            }
        }
        _ => ErrorLike::from_message(UNDEFINED_ERROR),
    }
}

/// [`as_error_like`] for a value that may be absent
pub fn as_error_like_opt(value: Option<&Value>) -> ErrorLike {
    value.map_or_else(|| ErrorLike::from_message(UNDEFINED_ERROR), as_error_like)
}

/// Textual form of a value: strings as is, arrays comma-joined, objects as
/// compact JSON
fn textual_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(textual_form).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
