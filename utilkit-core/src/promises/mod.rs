//! Async coordination helpers
//!
//! - [`delay`]: timer-based suspension
//! - [`do_while`] / [`try_do_while`]: sequential do-while loops
//! - [`Deferred`]: a result completed from outside the awaiting task
//! - [`combine_parallel_calls`]: one shared invocation for overlapping calls
//!
//! None of these offer cancellation or timeouts: once started, deferred
//! values, delays and deduplicated calls run to completion.

pub mod deferred;
pub mod delay;
pub mod do_while;
pub mod parallel;

pub use deferred::{create_deferred, Completer, Deferred, Promise};
pub use delay::{delay, delay_ms, delay_with, DelayOptions};
pub use do_while::{do_while, try_do_while, MaybeFuture};
pub use parallel::{combine_parallel_calls, CombinedCall};
