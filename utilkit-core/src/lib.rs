//! Small generic helpers: error normalization, async coordination and
//! English text formatting.
//!
//! - [`error`]: the tagged [`UtilkitError`] and fatal unreachable checks
//! - [`error_like`]: structural normalization of foreign error values
//! - [`promises`]: delay, do-while loops, deferred values and
//!   deduplication of parallel calls
//! - [`text`]: truncation, list joining and article selection
//! - [`config`] and [`observability`]: configuration and tracing setup

pub mod config;
pub mod error;
pub mod error_like;
pub mod observability;
pub mod promises;
pub mod text;

pub use error::{ErrorKind, UtilkitError, UtilkitResult};
pub use error_like::{as_error_like, is_error_like, ErrorLike};
pub use promises::{combine_parallel_calls, create_deferred, delay, do_while, Deferred};
