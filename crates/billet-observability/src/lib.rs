//! Observability for Billetterie binaries.
//!
//! Library crates only emit `tracing` events; binaries call
//! [`init_logging`] once at startup to decide where they go.

mod logging;

pub use logging::{
    build_filter, init_logging, LogFormat, LogLevel, LoggingConfig, LoggingError, LOG_ENV,
};
