//! Reactive map Actor implementation
//!
//! ActorMap wraps a `MutableBTreeMap<K, V>` and mutates it from relay events
//! inside one spawned processor task. BTreeMap backing gives deterministic
//! iteration order and efficient MapDiff updates.

use super::task::{Task, TaskHandle};
use futures_signals::signal::{Signal, SignalExt};
use futures_signals::signal_map::{MutableBTreeMap, SignalMapExt};
use futures_signals::signal_vec::{SignalVec, SignalVecExt};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

/// Reactive key-value map container.
///
/// The processor receives the underlying [`MutableBTreeMap`] and applies all
/// mutations; everything else binds through signals.
///
/// # Examples
///
/// ```rust
/// use wireflow::dataflow::{ActorMap, relay};
/// use futures::StreamExt;
/// use std::collections::BTreeMap;
///
/// # async fn example() {
/// let (device_added_relay, mut added_stream) = relay::<(String, u32)>();
///
/// let devices = ActorMap::new(BTreeMap::new(), async move |map| {
///     while let Some((id, bits)) = added_stream.next().await {
///         map.lock_mut().insert_cloned(id, bits);
///     }
/// });
///
/// device_added_relay.send(("dev0".to_string(), 8));
/// // UI binds via devices.signal_map()
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ActorMap<K, V>
where
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    map: MutableBTreeMap<K, V>,
    // Keeps the processor alive; aborted when the last clone drops.
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
    #[cfg(debug_assertions)]
    #[allow(dead_code)]
    creation_location: &'static std::panic::Location<'static>,
}

impl<K, V> ActorMap<K, V>
where
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new ActorMap with initial entries and a processor loop.
    ///
    /// Must be called from within a tokio runtime; the processor task is
    /// aborted when the last clone of the ActorMap drops.
    #[track_caller]
    pub fn new<F, Fut>(initial_map: BTreeMap<K, V>, processor: F) -> Self
    where
        F: FnOnce(MutableBTreeMap<K, V>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let map = MutableBTreeMap::new();
        {
            let mut lock = map.lock_mut();
            for (k, v) in initial_map {
                lock.insert_cloned(k, v);
            }
        }

        let task_handle = Arc::new(Task::start_droppable(processor(map.clone())));

        Self {
            map,
            task_handle,
            #[cfg(debug_assertions)]
            creation_location: std::panic::Location::caller(),
        }
    }

    /// Get an efficient MapDiff signal for reactive UI updates.
    pub fn signal_map(&self) -> impl SignalMapExt<Key = K, Value = V> + use<K, V> {
        self.map.signal_map_cloned()
    }

    /// Get a signal for a specific key's value.
    ///
    /// Emits `Option<V>` on insertion, update, and removal of that key.
    pub fn value_signal(&self, key: K) -> impl Signal<Item = Option<V>> + use<K, V> {
        self.map.signal_map_cloned().key_cloned(key)
    }

    /// Get a SignalVec of all entries in key order.
    ///
    /// Suits whole-map snapshots: `entries_signal_vec().to_signal_cloned()`.
    pub fn entries_signal_vec(&self) -> impl SignalVec<Item = (K, V)> + use<K, V> {
        self.map.entries_cloned()
    }

    /// Get a reactive signal for the entry count.
    pub fn count_signal(&self) -> impl Signal<Item = usize> + use<K, V> {
        self.map.entries_cloned().len()
    }

    /// Get a reactive signal indicating whether the map is empty.
    pub fn is_empty_signal(&self) -> impl Signal<Item = bool> + use<K, V> {
        self.count_signal().map(|count| count == 0)
    }

    /// Get the current entries directly.
    ///
    /// For event handlers and tests; prefer signals everywhere else.
    pub fn get_cloned(&self) -> BTreeMap<K, V> {
        self.map.lock_ref().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataflow::relay;
    use futures::{StreamExt, select};

    #[tokio::test]
    async fn test_actor_map_insert_and_remove() {
        let (set_relay, mut set_stream) = relay::<(String, u32)>();
        let (remove_relay, mut remove_stream) = relay::<String>();

        let cache = ActorMap::new(BTreeMap::new(), async move |map| {
            loop {
                select! {
                    entry = set_stream.next() => match entry {
                        Some((key, value)) => {
                            map.lock_mut().insert_cloned(key, value);
                        }
                        None => break,
                    },
                    key = remove_stream.next() => match key {
                        Some(key) => {
                            map.lock_mut().remove(&key);
                        }
                        None => break,
                    },
                }
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        set_relay.send(("a".to_string(), 1));
        set_relay.send(("b".to_string(), 2));
        remove_relay.send("a".to_string());

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        let entries = cache.get_cloned();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("b"), Some(&2));
    }

    #[tokio::test]
    async fn test_actor_map_value_signal() {
        let (set_relay, mut set_stream) = relay::<(String, u32)>();

        let cache = ActorMap::new(BTreeMap::new(), async move |map| {
            while let Some((key, value)) = set_stream.next().await {
                map.lock_mut().insert_cloned(key, value);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        set_relay.send(("watched".to_string(), 7));

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        let value = cache
            .value_signal("watched".to_string())
            .to_stream()
            .next()
            .await
            .unwrap();
        assert_eq!(value, Some(7));
    }

    #[tokio::test]
    async fn test_actor_map_initial_entries() {
        let initial: BTreeMap<String, u32> = [("x".to_string(), 1)].into();

        let cache = ActorMap::new(initial, async move |_map| {
            futures::future::pending::<()>().await;
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        assert_eq!(cache.get_cloned().get("x"), Some(&1));
    }
}
