//! Tracing events emitted while parsing. Enabled by the `tracing-unstable` feature; without it
//! every function here is a no-op.

#[cfg(feature = "tracing-unstable")]
use crate::{connection_string::ConnectionString, error::Error};

#[cfg(feature = "tracing-unstable")]
pub(crate) const PARSE_TRACING_EVENT_TARGET: &str = "mongodb_connection_string::parse";

/// We don't currently use all of these levels but they are included for completeness.
#[allow(dead_code)]
#[cfg(feature = "tracing-unstable")]
pub(crate) enum TracingOrLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[cfg(feature = "tracing-unstable")]
impl TracingOrLogLevel {
    pub(crate) const fn as_log_level(&self) -> log::Level {
        match self {
            TracingOrLogLevel::Error => log::Level::Error,
            TracingOrLogLevel::Warn => log::Level::Warn,
            TracingOrLogLevel::Info => log::Level::Info,
            TracingOrLogLevel::Debug => log::Level::Debug,
            TracingOrLogLevel::Trace => log::Level::Trace,
        }
    }

    pub(crate) const fn as_tracing_level(&self) -> tracing::Level {
        match self {
            TracingOrLogLevel::Error => tracing::Level::ERROR,
            TracingOrLogLevel::Warn => tracing::Level::WARN,
            TracingOrLogLevel::Info => tracing::Level::INFO,
            TracingOrLogLevel::Debug => tracing::Level::DEBUG,
            TracingOrLogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Pending https://github.com/tokio-rs/tracing/issues/2036 we can remove this and just use tracing::enabled.
#[cfg(feature = "tracing-unstable")]
macro_rules! trace_or_log_enabled {
    (target: $target:expr, $lvl:expr) => {
        tracing::enabled!(target: $target, $lvl.as_tracing_level())
            || log::log_enabled!(target: $target, $lvl.as_log_level())
    };
}

#[cfg(feature = "tracing-unstable")]
pub(crate) fn parse_succeeded(conn_str: &ConnectionString) {
    if trace_or_log_enabled!(target: PARSE_TRACING_EVENT_TARGET, TracingOrLogLevel::Debug) {
        tracing::debug!(
            target: PARSE_TRACING_EVENT_TARGET,
            hosts = %conn_str
                .hosts()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
            hasCredential = conn_str.credential().is_some(),
            database = conn_str.database(),
            optionCount = conn_str.all_options().len(),
            unrecognizedOptionCount = conn_str.unrecognized_options().len(),
            "Connection string parsed",
        );
    }
}

#[cfg(not(feature = "tracing-unstable"))]
pub(crate) fn parse_succeeded(_: &crate::connection_string::ConnectionString) {}

/// The failure is reported without the input, which may carry a password.
#[cfg(feature = "tracing-unstable")]
pub(crate) fn parse_failed(error: &Error) {
    if trace_or_log_enabled!(target: PARSE_TRACING_EVENT_TARGET, TracingOrLogLevel::Debug) {
        let failure = match error.kind.as_ref() {
            crate::error::ErrorKind::InvalidFormat { .. } => "invalid format".to_string(),
            _ => error.to_string(),
        };
        tracing::debug!(
            target: PARSE_TRACING_EVENT_TARGET,
            failure = %failure,
            "Connection string rejected",
        );
    }
}

#[cfg(not(feature = "tracing-unstable"))]
pub(crate) fn parse_failed(_: &crate::error::Error) {}

#[cfg(feature = "tracing-unstable")]
pub(crate) fn unrecognized_option(name: &str, similar: Option<&str>) {
    if trace_or_log_enabled!(target: PARSE_TRACING_EVENT_TARGET, TracingOrLogLevel::Warn) {
        tracing::warn!(
            target: PARSE_TRACING_EVENT_TARGET,
            option = name,
            similarOption = similar,
            "Unrecognized connection string option",
        );
    }
}

#[cfg(not(feature = "tracing-unstable"))]
pub(crate) fn unrecognized_option(_: &str, _: Option<&str>) {}
