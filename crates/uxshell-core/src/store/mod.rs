//! Per-window data store shared between the render thread and the window's
//! refresh scheduler.
//!
//! Readers take an immutable [`StoreSnapshot`] without locking. Writers
//! serialize on one async lock per store and publish a whole new snapshot, so
//! a reader never observes a half-written update.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

/// Immutable view of a window's data at one point in time.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    values: HashMap<String, Value>,
    timestamps: HashMap<String, Instant>,
    refresh_period: Duration,
}

impl StoreSnapshot {
    fn new(refresh_period: Duration) -> Self {
        Self {
            values: HashMap::new(),
            timestamps: HashMap::new(),
            refresh_period,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Decode a value into `T`. Missing keys and values of the wrong shape
    /// both read as "no data yet".
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// When `key` was last fetched successfully.
    pub fn timestamp(&self, key: &str) -> Option<Instant> {
        self.timestamps.get(key).copied()
    }

    pub fn refresh_period(&self) -> Duration {
        self.refresh_period
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Lock-protected, snapshot-published data store for one window.
#[derive(Debug)]
pub struct SharedStore {
    current: ArcSwap<StoreSnapshot>,
    writer: Mutex<()>,
}

impl SharedStore {
    pub fn new(refresh_period: Duration) -> Self {
        Self {
            current: ArcSwap::from_pointee(StoreSnapshot::new(refresh_period)),
            writer: Mutex::new(()),
        }
    }

    /// Latest published snapshot. Never blocks.
    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        self.current.load_full()
    }

    /// Set a static value, e.g. configuration a window keeps next to its
    /// fetched data. Safe to call while the scheduler runs: every update is a
    /// read-copy-update on the current snapshot, so neither side loses the
    /// other's writes.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        self.current.rcu(|current| {
            let mut next = StoreSnapshot::clone(current);
            next.values.insert(key.clone(), value.clone());
            Arc::new(next)
        });
    }

    pub fn set_refresh_period(&self, refresh_period: Duration) {
        self.current.rcu(|current| {
            let mut next = StoreSnapshot::clone(current);
            next.refresh_period = refresh_period;
            Arc::new(next)
        });
    }

    /// Acquire exclusive write access for a scheduler cycle.
    pub async fn writer(&self) -> StoreWriter<'_> {
        StoreWriter {
            store: self,
            _guard: self.writer.lock().await,
        }
    }
}

/// Exclusive write access to a [`SharedStore`]. Dropping it releases the lock.
pub struct StoreWriter<'a> {
    store: &'a SharedStore,
    _guard: MutexGuard<'a, ()>,
}

impl StoreWriter<'_> {
    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        self.store.snapshot()
    }

    /// Publish a fetch result: the value and its timestamp become visible to
    /// readers together.
    pub fn publish_result(&self, key: &str, value: Value, fetched_at: Instant) {
        self.store.current.rcu(|current| {
            let mut next = StoreSnapshot::clone(current);
            next.values.insert(key.to_string(), value.clone());
            next.timestamps.insert(key.to_string(), fetched_at);
            Arc::new(next)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_store_is_empty() {
        let store = SharedStore::new(Duration::from_millis(100));
        let snapshot = store.snapshot();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.refresh_period(), Duration::from_millis(100));
        assert!(snapshot.timestamp("time").is_none());
    }

    #[test]
    fn test_set_static_value() {
        let store = SharedStore::new(Duration::from_millis(100));
        store.set("bar_size", 32);
        assert_eq!(store.snapshot().get_as::<u32>("bar_size"), Some(32));
        assert!(store.snapshot().timestamp("bar_size").is_none());
    }

    #[test]
    fn test_get_as_wrong_shape_is_none() {
        let store = SharedStore::new(Duration::from_millis(100));
        store.set("time", "Mon Jan 1");
        assert_eq!(store.snapshot().get_as::<u32>("time"), None);
        assert_eq!(
            store.snapshot().get_as::<String>("time").as_deref(),
            Some("Mon Jan 1")
        );
    }

    #[tokio::test]
    async fn test_old_snapshot_is_unaffected_by_publish() {
        let store = SharedStore::new(Duration::from_millis(100));
        let before = store.snapshot();

        let writer = store.writer().await;
        let now = Instant::now();
        writer.publish_result("time", json!("12:00"), now);
        drop(writer);

        assert!(!before.contains("time"));
        let after = store.snapshot();
        assert_eq!(after.get("time"), Some(&json!("12:00")));
        assert_eq!(after.timestamp("time"), Some(now));
    }

    #[tokio::test]
    async fn test_writer_is_exclusive() {
        let store = Arc::new(SharedStore::new(Duration::from_millis(100)));
        let writer = store.writer().await;

        let other = Arc::clone(&store);
        let pending = tokio::spawn(async move {
            let _w = other.writer().await;
        });
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        drop(writer);
        pending.await.unwrap();
    }

    #[test]
    fn test_set_survives_concurrent_publishes() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let store = Arc::new(SharedStore::new(Duration::from_millis(100)));
        for i in 0..2000 {
            store.set(format!("filler-{}", i), i);
        }

        let stop = Arc::new(AtomicBool::new(false));
        let publisher = {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .unwrap();
                runtime.block_on(async {
                    let mut tick = 0u64;
                    while !stop.load(Ordering::SeqCst) {
                        let writer = store.writer().await;
                        writer.publish_result("tick", json!(tick), Instant::now());
                        tick += 1;
                    }
                });
            })
        };

        let mut lost = 0;
        for i in 0..5000 {
            store.set("static", i);
            if store.snapshot().get_as::<i32>("static") != Some(i) {
                lost += 1;
            }
        }
        stop.store(true, Ordering::SeqCst);
        publisher.join().unwrap();

        assert_eq!(lost, 0, "static values overwritten by concurrent publishes");
        assert!(store.snapshot().contains("tick"));
    }
}
