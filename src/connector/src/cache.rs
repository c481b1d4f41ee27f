//! Fetch-once cache for upstream collections
//!
//! A [`FetchOnce`] holds at most one value per discovery pass. The first
//! caller runs the fetch; callers arriving while it is in flight wait for it
//! instead of issuing their own request. A failed fetch leaves the cell
//! empty, so nothing partial is ever visible and a later call may retry.

use crate::error::Result;
use std::future::Future;
use tokio::sync::OnceCell;
use tracing::debug;

/// Single-flight, write-once cache cell
#[derive(Debug)]
pub struct FetchOnce<T> {
    name: &'static str,
    cell: OnceCell<T>,
}

impl<T> FetchOnce<T> {
    /// Create an empty cache; `name` is used in logs
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    /// Return the cached value, running `fetch` if the cache is empty
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<&T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }

        self.cell
            .get_or_try_init(|| async move {
                debug!("Populating {} cache", self.name);
                fetch().await
            })
            .await
    }

    /// Cached value, if populated
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_populated(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectorError;
    use redis_iam_client::ClientError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fetches_once() {
        let cache = FetchOnce::new("numbers");
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1, 2, 3])
            })
            .await
            .unwrap()
            .clone();

        let second = cache
            .get_or_fetch(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![4])
            })
            .await
            .unwrap()
            .clone();

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(second, first);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_populated());
    }

    #[tokio::test]
    async fn test_failure_leaves_cache_empty() {
        let cache: FetchOnce<Vec<u32>> = FetchOnce::new("numbers");

        let err = cache
            .get_or_fetch(|| async { Err(ConnectorError::Client(ClientError::Cancelled)) })
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(!cache.is_populated());
        assert!(cache.get().is_none());

        // A later call retries.
        let value = cache.get_or_fetch(|| async { Ok(vec![9]) }).await.unwrap();
        assert_eq!(value, &vec![9]);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let cache = Arc::new(FetchOnce::new("numbers"));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(|| async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(42u32)
                    })
                    .await
                    .map(|v| *v)
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
