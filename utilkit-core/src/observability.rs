//! Observability configuration for tracing
//!
//! This module sets up structured logging and provides the spans used by
//! the async helpers.

use tracing::Span;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;
use crate::error::{UtilkitError, UtilkitResult};

/// Initialize tracing from configuration
///
/// `RUST_LOG` takes precedence over `config.level`. Does nothing if a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) {
    if let Err(err) = try_init_tracing(config) {
        tracing::debug!("tracing already initialized: {}", err);
    }
}

/// Initialize tracing, failing if a global subscriber is already set
pub fn try_init_tracing(config: &LoggingConfig) -> UtilkitResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.level)?,
    };

    let fmt_layer = match config.format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_target(config.with_target)
            .boxed(),
        _ => fmt::layer().with_target(config.with_target).boxed(),
    };

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| UtilkitError::internal("Failed to install tracing subscriber").with_cause(e))
}

/// Parse a configured level or filter directive such as `info` or
/// `utilkit_core=debug`
pub fn level_filter(level: &str) -> UtilkitResult<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| {
        UtilkitError::configuration("logging.level", format!("Invalid filter: {}", e))
    })
}

/// Create a span for deferred value completion
#[inline]
pub fn deferred_span(deferred_id: u64) -> Span {
    tracing::trace_span!("deferred", deferred_id = deferred_id)
}

/// Create a span for a deduplicated producer invocation
#[inline]
pub fn parallel_call_span(label: &str, generation: u64) -> Span {
    tracing::debug_span!(
        "parallel_call",
        label = %label,
        generation = generation,
    )
}
