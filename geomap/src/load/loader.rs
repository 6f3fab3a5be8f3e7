//! Coalescing vendor loader.

use crate::error::GeoMapError;
use crate::map::BoxFuture;
use futures::future::{FutureExt, Shared};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, trace};

type SharedLoad<T> = Shared<BoxFuture<'static, Result<T, GeoMapError>>>;

/// Runs a vendor load at most once at a time and caches its success.
///
/// Concurrent callers join the in-flight load and observe the same result.
/// A successful load is reused by every later call. A failed load is
/// dropped once it completes, so the next call starts a fresh attempt.
pub struct ApiLoader<T> {
    slot: Mutex<Option<SharedLoad<T>>>,
    attempts: AtomicUsize,
}

impl<T> ApiLoader<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Returns the loaded value, starting a load with `start` if needed.
    pub async fn load<F>(&self, start: F) -> Result<T, GeoMapError>
    where
        F: FnOnce() -> BoxFuture<'static, Result<T, GeoMapError>>,
    {
        let shared = {
            let mut slot = self.slot.lock().unwrap();
            match slot.as_ref() {
                Some(existing) if !matches!(existing.peek(), Some(Err(_))) => {
                    trace!("Joining existing vendor load");
                    existing.clone()
                }
                _ => {
                    let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    debug!(attempt, "Starting vendor load");
                    let load = start().shared();
                    *slot = Some(load.clone());
                    load
                }
            }
        };

        shared.await
    }

    /// The loaded value, if a load has completed successfully.
    pub fn get(&self) -> Option<T> {
        let slot = self.slot.lock().unwrap();
        match slot.as_ref().and_then(|load| load.peek()) {
            Some(Ok(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Number of loads started so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl<T> Default for ApiLoader<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_success_is_cached() {
        let loader = ApiLoader::<u32>::new();
        let runs = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let runs = Arc::clone(&runs);
            let value = loader
                .load(move || {
                    Box::pin(async move {
                        runs.fetch_add(1, Ordering::SeqCst);
                        Ok(7)
                    })
                })
                .await;
            assert_eq!(value, Ok(7));
        }

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(loader.attempts(), 1);
        assert_eq!(loader.get(), Some(7));
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_coalesced() {
        let loader = Arc::new(ApiLoader::<u32>::new());
        let runs = Arc::new(AtomicUsize::new(0));

        let start = |runs: Arc<AtomicUsize>| {
            move || -> BoxFuture<'static, Result<u32, GeoMapError>> {
                Box::pin(async move {
                    runs.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(42)
                })
            }
        };

        let (a, b) = tokio::join!(
            loader.load(start(Arc::clone(&runs))),
            loader.load(start(Arc::clone(&runs)))
        );

        assert_eq!(a, Ok(42));
        assert_eq!(b, Ok(42));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_failure_seen_by_both() {
        let loader = ApiLoader::<u32>::new();
        let fail = || -> BoxFuture<'static, Result<u32, GeoMapError>> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Err(GeoMapError::ScriptLoad {
                    src: "sdk.js".to_string(),
                    reason: "404".to_string(),
                })
            })
        };

        let (a, b) = tokio::join!(loader.load(fail), loader.load(fail));
        assert_eq!(a, b);
        assert!(a.is_err());
        assert_eq!(loader.attempts(), 1);
        assert_eq!(loader.get(), None);
    }

    #[tokio::test]
    async fn test_failure_allows_retry() {
        let loader = ApiLoader::<u32>::new();
        let healthy = Arc::new(AtomicBool::new(false));

        let attempt = |healthy: Arc<AtomicBool>| {
            move || -> BoxFuture<'static, Result<u32, GeoMapError>> {
                Box::pin(async move {
                    if healthy.load(Ordering::SeqCst) {
                        Ok(1)
                    } else {
                        Err(GeoMapError::ScriptLoad {
                            src: "sdk.js".to_string(),
                            reason: "offline".to_string(),
                        })
                    }
                })
            }
        };

        assert!(loader.load(attempt(Arc::clone(&healthy))).await.is_err());
        healthy.store(true, Ordering::SeqCst);
        assert_eq!(loader.load(attempt(Arc::clone(&healthy))).await, Ok(1));
        assert_eq!(loader.attempts(), 2);
    }
}
