//! Error handling for utilkit
//!
//! All fallible operations in this crate report a single tagged error type,
//! [`UtilkitError`]. Instead of a hierarchy of error subclasses, each error
//! carries:
//!
//! - **Kind**: a tag that also determines the display name
//!   (`StatusError`, `UnreachableCheck`, or a caller-chosen custom name)
//! - **Message**: human-readable description
//! - **Extras**: optional error code, numeric status code and a shared cause
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  utilkit error kinds                 │
//! ├──────────────────┬──────────────────┬────────────────┤
//! │  Caller errors   │  Programmer bugs │  Crate errors  │
//! │  • Custom(name)  │  • Unreachable   │  • Internal    │
//! │  • Status        │    (panics)      │  • Config      │
//! └──────────────────┴──────────────────┴────────────────┘
//! ```
//!
//! Foreign, duck-typed errors are handled separately by
//! [`crate::error_like`].

pub mod constructors;
pub mod conversions;
pub mod types;
pub mod unreachable;


pub use types::{ErrorKind, Result, SharedCause, UtilkitError, UtilkitResult};
pub use unreachable::{unreachable_check, unreachable_check_with};
