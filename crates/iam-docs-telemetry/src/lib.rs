//! Structured logging for the IAM API docs service.
//!
//! The service logs through `tracing` everywhere; this crate owns the
//! subscriber setup and the shared field names.
//!
//! - JSON output for production, pretty output for development
//! - `EnvFilter` directives (e.g. `info,iam_docs=debug`)
//! - Request logging macros with consistent field names
//!
//! # Example
//!
//! ```rust,ignore
//! use iam_docs_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production().service_name("iam-docs"))?;
//! tracing::info!("service starting");
//! ```

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
