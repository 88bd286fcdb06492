//! Fatal checks for cases that exhaustive matching says cannot happen
//!
//! These never return. The `UtilkitError` describing the impossible value is
//! logged and then used as the panic payload, so a test harness can still
//! recover it with `std::panic::catch_unwind` and `downcast_ref`.

use std::fmt;

use super::types::UtilkitError;

/// Panic because `value` reached a branch that should be unreachable
///
/// # Panics
///
/// Always. This is a programmer-error signal and must not be used for
/// recoverable control flow.
#[track_caller]
pub fn unreachable_check<V: fmt::Debug>(value: V) -> ! {
    raise(UtilkitError::unreachable(&value))
}

/// Like [`unreachable_check`], rendering the value with `extract` first
///
/// # Panics
///
/// Always.
#[track_caller]
pub fn unreachable_check_with<V, F, D>(value: V, extract: F) -> !
where
    F: FnOnce(&V) -> D,
    D: fmt::Display,
{
    raise(UtilkitError::unreachable_with(&value, extract))
}

#[track_caller]
fn raise(err: UtilkitError) -> ! {
    let location = std::panic::Location::caller();
    tracing::error!(%location, "{}", err);
    std::panic::panic_any(err)
}

/// Expression-shaped unreachable check
///
/// # Example
/// ```rust,should_panic
/// use utilkit_core::unreachable_check;
///
/// let shape = "hexagon";
/// let sides: u32 = match shape {
///     "triangle" => 3,
///     "square" => 4,
///     other => unreachable_check!(other),
/// };
/// ```
#[macro_export]
macro_rules! unreachable_check {
    ($value:expr) => {
        $crate::error::unreachable_check($value)
    };
    ($value:expr, $extract:expr) => {
        $crate::error::unreachable_check_with($value, $extract)
    };
}
