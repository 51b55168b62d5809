//! Admission control for external model calls
//!
//! A fixed number of permits caps how many model calls run at once, and
//! every call has a deadline covering both the wait for a permit and the
//! call itself. A call that overruns keeps its permit until its worker
//! thread actually finishes, so slow models cannot pile up threads.

use crate::{Error, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Bounded-concurrency gate with a per-call timeout
#[derive(Debug, Clone)]
pub struct ModelGate {
    release: Sender<()>,
    acquire: Receiver<()>,
    capacity: usize,
    timeout: Duration,
}

/// Returns the permit when the worker thread exits, even on panic
struct PermitGuard {
    release: Sender<()>,
}

impl Drop for PermitGuard {
    fn drop(&mut self) {
        let _ = self.release.send(());
    }
}

impl ModelGate {
    /// Create a gate admitting `max_concurrent` calls (at least one)
    pub fn new(max_concurrent: usize, timeout: Duration) -> Self {
        let capacity = max_concurrent.max(1);
        let (release, acquire) = bounded(capacity);
        for _ in 0..capacity {
            let _ = release.send(());
        }
        Self {
            release,
            acquire,
            capacity,
            timeout,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Permits not currently held by a running call
    pub fn available(&self) -> usize {
        self.acquire.len()
    }

    /// Run `call` on a worker thread under the gate's limits
    pub fn run<T, F>(&self, model: &str, call: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let deadline = Instant::now() + self.timeout;
        let timeout_error = || Error::Timeout {
            model: model.to_string(),
            timeout_ms: self.timeout.as_millis() as u64,
        };

        self.acquire
            .recv_timeout(self.timeout)
            .map_err(|_| timeout_error())?;

        let guard = PermitGuard {
            release: self.release.clone(),
        };
        let (tx, rx) = bounded::<Result<T>>(1);

        thread::Builder::new()
            .name(format!("{}-call", model))
            .spawn(move || {
                let _guard = guard;
                let _ = tx.send(call());
            })
            .map_err(|e| Error::ExternalModel {
                model: model.to_string(),
                reason: format!("failed to spawn worker: {}", e),
            })?;

        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "{} call exceeded {:?}; permit held until the worker finishes",
                    model,
                    self.timeout
                );
                Err(timeout_error())
            }
            Err(RecvTimeoutError::Disconnected) => Err(Error::ExternalModel {
                model: model.to_string(),
                reason: "worker exited without a result".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_successful_call() {
        let gate = ModelGate::new(2, Duration::from_secs(1));
        let value = gate.run("echo", || Ok(41 + 1)).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_error_passes_through() {
        let gate = ModelGate::new(1, Duration::from_secs(1));
        let err = gate
            .run::<(), _>("broken", || {
                Err(Error::ExternalModel {
                    model: "broken".into(),
                    reason: "boom".into(),
                })
            })
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
        // The permit comes back once the worker exits
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(gate.available(), 1);
    }

    #[test]
    fn test_timeout() {
        let gate = ModelGate::new(1, Duration::from_millis(20));
        let err = gate
            .run("slow", || {
                std::thread::sleep(Duration::from_millis(200));
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_saturated_gate_times_out_on_admission() {
        let gate = ModelGate::new(1, Duration::from_millis(30));
        let _ = gate.run("slow", || {
            std::thread::sleep(Duration::from_millis(300));
            Ok(())
        });
        // The slow worker still holds the only permit
        assert_eq!(gate.available(), 0);
        let err = gate.run("fast", || Ok(())).unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[test]
    fn test_panicking_call_releases_permit() {
        let gate = ModelGate::new(1, Duration::from_secs(1));
        let err = gate
            .run::<(), _>("panics", || panic!("model crashed"))
            .unwrap_err();
        assert!(matches!(err, Error::ExternalModel { .. }));
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(gate.available(), 1);
    }

    #[test]
    fn test_concurrency_is_bounded() {
        let gate = ModelGate::new(2, Duration::from_secs(2));
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let gate = gate.clone();
                let running = running.clone();
                let peak = peak.clone();
                std::thread::spawn(move || {
                    gate.run("counted", move || {
                        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        std::thread::sleep(Duration::from_millis(20));
                        running.fetch_sub(1, Ordering::SeqCst);
                        Ok(())
                    })
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
