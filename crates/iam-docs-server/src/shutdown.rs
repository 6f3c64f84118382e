//! Graceful shutdown signal handling.
//!
//! A [`ShutdownSignal`] is shared between the accept loop, every connection
//! task, and whoever decides the process should stop (OS signals in
//! production, the test itself in tests). [`ConnectionTracker`] counts the
//! connections still draining.
//!
//! # Example
//!
//! ```rust,ignore
//! use iam_docs_server::ShutdownSignal;
//! use std::time::Duration;
//!
//! let shutdown = ShutdownSignal::new();
//!
//! tokio::select! {
//!     () = shutdown.recv() => println!("shutting down"),
//!     () = tokio::time::sleep(Duration::from_secs(60)) => println!("timeout"),
//! }
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Notify};

/// A signal used to trigger and await graceful shutdown.
///
/// Clones share state: triggering any clone wakes every waiter.
///
/// ```rust
/// use iam_docs_server::ShutdownSignal;
///
/// let shutdown = ShutdownSignal::new();
/// let clone = shutdown.clone();
///
/// clone.trigger();
/// assert!(shutdown.is_shutdown());
/// ```
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownSignal {
    /// Creates a new, untriggered shutdown signal.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Triggers shutdown. Idempotent.
    pub fn trigger(&self) {
        self.sender.send_if_modified(|triggered| !std::mem::replace(triggered, true));
    }

    /// Returns `true` if shutdown has been triggered.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        *self.sender.borrow()
    }

    /// Returns a future that completes once shutdown is triggered.
    ///
    /// Completes immediately if shutdown was already triggered. The future
    /// does not borrow `self`, so it can be moved into spawned tasks.
    pub fn recv(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut receiver = self.sender.subscribe();
        async move {
            // An error means every signal handle is gone; nothing can
            // trigger anymore, so treat it as shutdown.
            let _ = receiver.wait_for(|triggered| *triggered).await;
        }
    }

    /// Creates a shutdown signal triggered by SIGTERM or SIGINT.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn with_os_signals() -> Self {
        let signal = Self::new();
        let trigger = signal.clone();

        tokio::spawn(async move {
            wait_for_os_signal().await;
            trigger.trigger();
        });

        signal
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn wait_for_os_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(error = %e, "failed to register signal handlers");
                std::future::pending::<()>().await;
                return;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            tracing::info!("Received SIGINT, initiating graceful shutdown");
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_os_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

/// Counts open connections so shutdown can wait for them to drain.
///
/// ```rust
/// use iam_docs_server::ConnectionTracker;
///
/// let tracker = ConnectionTracker::new();
/// let token = tracker.acquire();
/// assert_eq!(tracker.active_connections(), 1);
///
/// drop(token);
/// assert_eq!(tracker.active_connections(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionTracker {
    active: Arc<AtomicUsize>,
    notify: Arc<Notify>,
}

impl ConnectionTracker {
    /// Creates a new connection tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Acquires a token held for the lifetime of one connection.
    #[must_use]
    pub fn acquire(&self) -> ConnectionToken {
        self.active.fetch_add(1, Ordering::SeqCst);
        ConnectionToken {
            active: Arc::clone(&self.active),
            notify: Arc::clone(&self.notify),
        }
    }

    /// Returns the number of active connections.
    #[must_use]
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Waits until every token has been dropped.
    pub async fn wait_for_drain(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking so a drop in between is not missed.
            notified.as_mut().enable();

            if self.active.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A token representing an active connection.
#[derive(Debug)]
pub struct ConnectionToken {
    active: Arc<AtomicUsize>,
    notify: Arc<Notify>,
}

impl Drop for ConnectionToken {
    fn drop(&mut self) {
        if self.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_signal_not_triggered() {
        let shutdown = ShutdownSignal::new();
        assert!(!shutdown.is_shutdown());
    }

    #[test]
    fn test_trigger_is_idempotent() {
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();
        shutdown.trigger();
        assert!(shutdown.is_shutdown());
    }

    #[tokio::test]
    async fn test_recv_after_trigger_completes() {
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_millis(100), shutdown.recv()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_recv_wakes_on_trigger_from_clone() {
        let shutdown = ShutdownSignal::new();
        let waiter = tokio::spawn(shutdown.recv());

        shutdown.clone().trigger();

        let result = tokio::time::timeout(Duration::from_secs(1), waiter).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_recv_pending_without_trigger() {
        let shutdown = ShutdownSignal::new();
        let result = tokio::time::timeout(Duration::from_millis(20), shutdown.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_tracker_wait_for_drain_empty() {
        let tracker = ConnectionTracker::new();
        let result = tokio::time::timeout(Duration::from_millis(100), tracker.wait_for_drain()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_tracker_wait_for_drain_after_drop() {
        let tracker = ConnectionTracker::new();
        let first = tracker.acquire();
        let second = tracker.acquire();
        assert_eq!(tracker.active_connections(), 2);

        let waiter = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.wait_for_drain().await })
        };

        drop(first);
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        drop(second);
        let result = tokio::time::timeout(Duration::from_secs(1), waiter).await;
        assert!(result.is_ok());
        assert_eq!(tracker.active_connections(), 0);
    }
}
