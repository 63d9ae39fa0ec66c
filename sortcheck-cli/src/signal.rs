//! SIGINT handling.
//!
//! The run loop checks the flag between test cases and again when the
//! program returns. A Ctrl+C reaches the program too, so a case interrupted
//! mid-run is discarded; its corpus directory is still dropped normally.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Trait for checking shutdown status.
pub trait ShutdownCheck: Send + Sync {
    /// Returns true if shutdown has been requested.
    fn should_stop(&self) -> bool;
}

/// Flag set by the Ctrl+C handler.
#[derive(Debug, Clone)]
pub struct ShutdownFlag {
    flag: Arc<AtomicBool>,
}

impl Default for ShutdownFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownFlag {
    /// Create a flag and register the SIGINT handler.
    ///
    /// If a handler is already registered the flag is still returned and can
    /// be triggered manually.
    pub fn new() -> Self {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = flag.clone();

        let _ = ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        });

        Self { flag }
    }

    /// Create a flag without registering a handler.
    pub fn manual() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl ShutdownCheck for ShutdownFlag {
    fn should_stop(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Never signals shutdown.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverShutdown;

impl ShutdownCheck for NeverShutdown {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Signals shutdown after `n` checks have returned false.
#[derive(Debug, Default)]
pub struct ShutdownAfter {
    remaining: AtomicUsize,
}

impl ShutdownAfter {
    pub fn new(checks: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(checks),
        }
    }
}

impl ShutdownCheck for ShutdownAfter {
    fn should_stop(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_flag_trigger() {
        let flag = ShutdownFlag::manual();
        assert!(!flag.should_stop());
        flag.trigger();
        assert!(flag.should_stop());
    }

    #[test]
    fn test_shutdown_flag_clone_shares_state() {
        let flag = ShutdownFlag::manual();
        let clone = flag.clone();
        flag.trigger();
        assert!(clone.should_stop());
    }

    #[test]
    fn test_shutdown_flag_new_does_not_panic() {
        let flag = ShutdownFlag::new();
        assert!(!flag.should_stop());
    }

    #[test]
    fn test_never_shutdown() {
        let checker = NeverShutdown;
        assert!(!checker.should_stop());
        assert!(!checker.should_stop());
    }

    #[test]
    fn test_shutdown_after() {
        let checker = ShutdownAfter::new(2);
        assert!(!checker.should_stop());
        assert!(!checker.should_stop());
        assert!(checker.should_stop());
        assert!(checker.should_stop());
    }

    #[test]
    fn test_shutdown_after_zero() {
        assert!(ShutdownAfter::new(0).should_stop());
    }
}
