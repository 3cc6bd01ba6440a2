use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use tokio::time::Instant;

use crate::fetch::errors::FetchError;
use crate::store::StoreSnapshot;

/// Asynchronous producer of one store value.
///
/// Receives the window's latest store snapshot, so it may read other keys,
/// but gets no ordering guarantee relative to concurrent writes. Must be safe
/// to invoke repeatedly.
pub trait FetchOperation: Send + Sync + 'static {
    fn fetch(&self, store: Arc<StoreSnapshot>) -> BoxFuture<'static, Result<Value, FetchError>>;
}

impl<F, Fut, T> FetchOperation for F
where
    F: Fn(Arc<StoreSnapshot>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    fn fetch(&self, store: Arc<StoreSnapshot>) -> BoxFuture<'static, Result<Value, FetchError>> {
        let fut = (self)(store);
        Box::pin(async move {
            let value = fut.await?;
            Ok(serde_json::to_value(value)?)
        })
    }
}

/// A named, periodically invoked data source feeding one store key.
///
/// Immutable once attached to a window.
#[derive(Clone)]
pub struct Fetcher {
    key: String,
    interval: Duration,
    timeout: Option<Duration>,
    operation: Arc<dyn FetchOperation>,
}

impl Fetcher {
    /// Create a fetcher whose result is stored under `key` and refreshed when
    /// more than `interval` has passed since its last successful run.
    pub fn new<F, Fut, T>(key: impl Into<String>, interval: Duration, operation: F) -> Self
    where
        F: Fn(Arc<StoreSnapshot>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        Self::from_operation(key, interval, operation)
    }

    /// Create a fetcher from a type implementing [`FetchOperation`].
    pub fn from_operation(
        key: impl Into<String>,
        interval: Duration,
        operation: impl FetchOperation,
    ) -> Self {
        Self {
            key: key.into(),
            interval,
            timeout: None,
            operation: Arc::new(operation),
        }
    }

    /// Bound a single run; the scheduler's configured timeout applies otherwise.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Never run, or strictly more than `interval` since the last success.
    pub fn is_due(&self, now: Instant, last_success: Option<Instant>) -> bool {
        match last_success {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        }
    }

    pub(crate) fn invoke(
        &self,
        store: Arc<StoreSnapshot>,
    ) -> BoxFuture<'static, Result<Value, FetchError>> {
        self.operation.fetch(store)
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("key", &self.key)
            .field("interval", &self.interval)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
