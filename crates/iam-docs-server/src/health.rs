//! Health check endpoints.
//!
//! - `/health` - Liveness probe: is the process serving?
//! - `/ready` - Readiness probe: should traffic be routed here?
//!
//! # Example
//!
//! ```rust
//! use iam_docs_server::{HealthCheck, ReadinessCheck};
//!
//! let health = HealthCheck::new("iam-docs", "0.1.0");
//! assert_eq!(health.status().service(), "iam-docs");
//!
//! let readiness = ReadinessCheck::new().add_check("catalog", || true);
//! assert!(readiness.is_ready());
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Body of the `/health` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    status: String,
    service: String,
    version: String,
    uptime_seconds: u64,
}

impl HealthStatus {
    /// Healthy status for a running service.
    #[must_use]
    pub fn healthy(service: impl Into<String>, version: impl Into<String>, uptime: Duration) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
            version: version.into(),
            uptime_seconds: uptime.as_secs(),
        }
    }

    /// Returns the status string.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the service version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the uptime in seconds.
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.uptime_seconds
    }
}

/// Liveness probe.
///
/// Always healthy while the process is serving requests.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    service: String,
    version: String,
    start_time: Instant,
}

impl HealthCheck {
    /// Creates a health check reporting the given service and version.
    #[must_use]
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            start_time: Instant::now(),
        }
    }

    /// Returns the current health status.
    #[must_use]
    pub fn status(&self) -> HealthStatus {
        HealthStatus::healthy(&self.service, &self.version, self.start_time.elapsed())
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }
}

/// Body of the `/ready` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadinessStatus {
    ready: bool,
    checks: BTreeMap<String, bool>,
}

impl ReadinessStatus {
    /// Returns whether the service is ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns the result of a named check.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<bool> {
        self.checks.get(name).copied()
    }
}

type ReadinessCheckFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// Readiness probe.
///
/// Ready when the override flag is set and every registered check passes.
/// The server clears the flag as soon as shutdown begins.
#[derive(Clone)]
pub struct ReadinessCheck {
    checks: Vec<(String, ReadinessCheckFn)>,
    ready_override: Arc<AtomicBool>,
}

impl std::fmt::Debug for ReadinessCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessCheck")
            .field("checks", &self.checks.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("ready_override", &self.ready_override)
            .finish()
    }
}

impl ReadinessCheck {
    /// Creates a readiness check with no registered checks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            ready_override: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Registers a named check.
    #[must_use]
    pub fn add_check<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.checks.push((name.into(), Arc::new(check)));
        self
    }

    /// Returns whether the service is ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready_override.load(Ordering::SeqCst) && self.checks.iter().all(|(_, check)| check())
    }

    /// Returns the readiness status with individual check results.
    #[must_use]
    pub fn status(&self) -> ReadinessStatus {
        let checks: BTreeMap<String, bool> = self
            .checks
            .iter()
            .map(|(name, check)| (name.clone(), check()))
            .collect();

        let ready = self.ready_override.load(Ordering::SeqCst) && checks.values().all(|&v| v);

        ReadinessStatus { ready, checks }
    }

    /// Sets the ready override.
    pub fn set_ready(&self, ready: bool) {
        self.ready_override.store(ready, Ordering::SeqCst);
    }
}

impl Default for ReadinessCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::healthy("iam-docs", "0.1.0", Duration::from_secs(42));
        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "iam-docs");
        assert_eq!(json["version"], "0.1.0");
        assert_eq!(json["uptime_seconds"], 42);
    }

    #[test]
    fn test_health_check_status() {
        let health = HealthCheck::new("iam-docs", "1.2.3");
        let status = health.status();
        assert_eq!(status.status(), "healthy");
        assert_eq!(status.version(), "1.2.3");
        assert_eq!(status.uptime_seconds(), 0);
    }

    #[test]
    fn test_readiness_no_checks_ready() {
        assert!(ReadinessCheck::new().is_ready());
    }

    #[test]
    fn test_readiness_failing_check() {
        let readiness = ReadinessCheck::new()
            .add_check("catalog", || true)
            .add_check("assets", || false);

        let status = readiness.status();
        assert!(!status.is_ready());
        assert_eq!(status.check("catalog"), Some(true));
        assert_eq!(status.check("assets"), Some(false));
        assert_eq!(status.check("missing"), None);
    }

    #[test]
    fn test_readiness_override_shared_between_clones() {
        let readiness = ReadinessCheck::new();
        let clone = readiness.clone();

        clone.set_ready(false);
        assert!(!readiness.is_ready());
        assert!(!readiness.status().is_ready());
    }
}
