//! Reactive collection Actor implementation
//!
//! ActorVec wraps a `MutableVec<T>` and mutates it from relay events inside
//! one spawned processor task, so collection updates stay sequential and UI
//! bindings receive efficient VecDiff signals.

use super::task::{Task, TaskHandle};
use futures_signals::signal::Signal;
use futures_signals::signal_vec::{MutableVec, MutableVecLockRef, SignalVec, SignalVecExt};
use std::future::Future;
use std::sync::Arc;

/// Reactive collection container.
///
/// The processor receives an [`ActorVecHandle`] giving it controlled access
/// to the underlying vector; everything else binds through signals.
///
/// # Examples
///
/// ```rust
/// use wireflow::dataflow::{ActorVec, relay};
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (item_added_relay, mut added_stream) = relay::<String>();
///
/// let items = ActorVec::new(Vec::new(), async move |items| {
///     while let Some(item) = added_stream.next().await {
///         items.push_cloned(item);
///     }
/// });
///
/// item_added_relay.send("wire0".to_string());
/// // UI binds via items.signal_vec()
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ActorVec<T>
where
    T: Clone + Send + Sync + 'static,
{
    vec: MutableVec<T>,
    // Keeps the processor alive; aborted when the last clone drops.
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
    #[cfg(debug_assertions)]
    #[allow(dead_code)]
    creation_location: &'static std::panic::Location<'static>,
}

impl<T> ActorVec<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new ActorVec with initial items and a processor loop.
    ///
    /// Must be called from within a tokio runtime; the processor task is
    /// aborted when the last clone of the ActorVec drops.
    #[track_caller]
    pub fn new<F, Fut>(initial_items: Vec<T>, processor: F) -> Self
    where
        F: FnOnce(ActorVecHandle<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let vec = MutableVec::new_with_values(initial_items);
        let handle = ActorVecHandle {
            mutable_vec: vec.clone(),
        };

        let task_handle = Arc::new(Task::start_droppable(processor(handle)));

        Self {
            vec,
            task_handle,
            #[cfg(debug_assertions)]
            creation_location: std::panic::Location::caller(),
        }
    }

    /// Get a signal emitting the full collection on every change.
    ///
    /// Prefer [`ActorVec::signal_vec`] for UI bindings; this whole-vector
    /// view suits snapshots and tests.
    pub fn signal(&self) -> impl Signal<Item = Vec<T>> + use<T> {
        self.vec.signal_vec_cloned().to_signal_cloned()
    }

    /// Get an efficient VecDiff signal for reactive UI updates.
    ///
    /// Emits only the changes (push, remove, update) instead of the whole
    /// collection.
    pub fn signal_vec(&self) -> impl SignalVec<Item = T> + use<T> {
        self.vec.signal_vec_cloned()
    }

    /// Get a reactive signal for the collection length.
    pub fn len_signal(&self) -> impl Signal<Item = usize> + use<T> {
        self.vec.signal_vec_cloned().len()
    }

    /// Get the current items directly.
    ///
    /// For event handlers and tests; prefer signals everywhere else.
    pub fn get_cloned(&self) -> Vec<T> {
        self.vec.lock_ref().to_vec()
    }
}

/// Handle for updating an ActorVec from within its processor.
///
/// Only the processor ever holds one, which is what keeps all mutation
/// sequential.
pub struct ActorVecHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    mutable_vec: MutableVec<T>,
}

impl<T> ActorVecHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Append an item to the end of the collection.
    pub fn push_cloned(&self, item: T) {
        self.mutable_vec.lock_mut().push_cloned(item);
    }

    /// Insert an item at a specific index.
    ///
    /// Panics if the index is out of bounds.
    pub fn insert_cloned(&self, index: usize, item: T) {
        self.mutable_vec.lock_mut().insert_cloned(index, item);
    }

    /// Remove the item at `index`, returning it, or `None` when out of
    /// bounds.
    pub fn remove(&self, index: usize) -> Option<T> {
        let mut lock = self.mutable_vec.lock_mut();
        if index < lock.len() {
            Some(lock.remove(index))
        } else {
            None
        }
    }

    /// Keep only the items matching the predicate.
    pub fn retain(&self, f: impl FnMut(&T) -> bool) {
        self.mutable_vec.lock_mut().retain(f);
    }

    /// Remove all items.
    pub fn clear(&self) {
        self.mutable_vec.lock_mut().clear();
    }

    /// Read access to the current items, e.g. for linear searches before a
    /// positional update.
    pub fn lock_ref(&self) -> MutableVecLockRef<'_, T> {
        self.mutable_vec.lock_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataflow::relay;
    use futures::{StreamExt, select};
    use futures_signals::signal::SignalExt;

    #[tokio::test]
    async fn test_actor_vec_push_and_remove() {
        let (added_relay, mut added_stream) = relay::<u32>();
        let (removed_relay, mut removed_stream) = relay::<usize>();

        let items = ActorVec::new(vec![1_u32], async move |items| {
            loop {
                select! {
                    item = added_stream.next() => match item {
                        Some(item) => items.push_cloned(item),
                        None => break,
                    },
                    index = removed_stream.next() => match index {
                        Some(index) => {
                            items.remove(index);
                        }
                        None => break,
                    },
                }
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        added_relay.send(2);
        added_relay.send(3);
        removed_relay.send(0);

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        assert_eq!(items.get_cloned(), vec![2, 3]);
    }

    #[tokio::test]
    async fn test_actor_vec_out_of_bounds_remove_is_noop() {
        let (removed_relay, mut removed_stream) = relay::<usize>();

        let items = ActorVec::new(vec!["a".to_string()], async move |items| {
            while let Some(index) = removed_stream.next().await {
                items.remove(index);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        removed_relay.send(5);

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        assert_eq!(items.get_cloned(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_actor_vec_len_signal() {
        let (added_relay, mut added_stream) = relay::<u32>();

        let items = ActorVec::new(Vec::new(), async move |items| {
            while let Some(item) = added_stream.next().await {
                items.push_cloned(item);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        added_relay.send(10);
        added_relay.send(20);

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        let len = items.len_signal().to_stream().next().await.unwrap();
        assert_eq!(len, 2);
    }
}
