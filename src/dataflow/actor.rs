//! Single-value Actor implementation
//!
//! Actor provides controlled state management with sequential event
//! processing. It owns a `Mutable<T>` and updates it from Relay streams
//! inside one spawned processor task.

use super::task::{Task, TaskHandle};
use futures_signals::signal::{Mutable, Signal};
use std::future::Future;
use std::sync::Arc;

/// Single-value reactive state container.
///
/// All mutation of the held value happens inside the processor future passed
/// to [`Actor::new`], which receives the underlying [`Mutable`] and consumes
/// events from relay streams one at a time. Everything outside the processor
/// reads the value through signals.
///
/// # Examples
///
/// ```rust
/// use wireflow::dataflow::{Actor, relay};
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (rotation_changed_relay, mut rotation_stream) = relay::<f64>();
///
/// let rotation = Actor::new(0.0_f64, async move |state| {
///     while let Some(angle) = rotation_stream.next().await {
///         state.set(angle);
///     }
/// });
///
/// rotation_changed_relay.send(90.0);
/// // UI binds via rotation.signal()
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    task_handle: Arc<TaskHandle>,
    #[cfg(debug_assertions)]
    #[allow(dead_code)]
    creation_location: &'static std::panic::Location<'static>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new Actor with initial state and a processor loop.
    ///
    /// The processor typically loops over `select!` arms, one per relay
    /// stream, so events are applied strictly in arrival order. The spawned
    /// task is aborted when the last clone of the Actor drops.
    ///
    /// Must be called from within a tokio runtime.
    #[track_caller]
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Mutable::new(initial_state);

        let task_handle = Arc::new(Task::start_droppable(processor(state.clone())));

        Self {
            state,
            task_handle,
            #[cfg(debug_assertions)]
            creation_location: std::panic::Location::caller(),
        }
    }

    /// Get a reactive signal for this Actor's state.
    ///
    /// The primary access path: emits the current value and every update.
    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }

    /// Get a reactive signal computed from a reference to the state.
    ///
    /// Avoids cloning the whole value when only a projection is needed, e.g.
    /// `rotations.signal_ref(|map| map.len())`.
    pub fn signal_ref<U, F>(&self, f: F) -> impl Signal<Item = U> + use<T, U, F>
    where
        F: Fn(&T) -> U + Send + Sync + 'static,
        U: PartialEq + Send + Sync + 'static,
    {
        self.state.signal_ref(f)
    }

    /// Get the current value directly.
    ///
    /// For event handlers and tests where signal-based access is impractical.
    /// Prefer [`Actor::signal`] everywhere else.
    pub fn get_cloned(&self) -> T {
        self.state.get_cloned()
    }
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Whether the processor task has stopped (all event streams ended).
    pub fn is_idle(&self) -> bool {
        self.task_handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataflow::relay;
    use futures::{StreamExt, select};
    use futures_signals::signal::SignalExt;

    #[tokio::test]
    async fn test_actor_basic_functionality() {
        let (increment_relay, mut increment_stream) = relay();

        let counter = Actor::new(0, async move |state| {
            while let Some(amount) = increment_stream.next().await {
                let current = state.get();
                state.set(current + amount);
            }
        });

        // Wait a moment for the processor to start
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        increment_relay.send(5);
        increment_relay.send(3);

        // Wait for processing
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        let final_value = counter.signal().to_stream().next().await.unwrap();
        assert_eq!(final_value, 8);
    }

    #[tokio::test]
    async fn test_actor_multiple_streams() {
        let (increment_relay, mut increment_stream) = relay();
        let (decrement_relay, mut decrement_stream) = relay();

        let counter = Actor::new(10_u32, async move |state| {
            loop {
                select! {
                    amount = increment_stream.next() => match amount {
                        Some(amount) => state.set(state.get() + amount),
                        None => break,
                    },
                    amount = decrement_stream.next() => match amount {
                        Some(amount) => {
                            let current = state.get();
                            state.set(current.saturating_sub(amount));
                        }
                        None => break,
                    },
                }
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        increment_relay.send(5);
        decrement_relay.send(3);

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        let final_value = counter.signal().to_stream().next().await.unwrap();
        assert_eq!(final_value, 12); // 10 + 5 - 3
    }

    #[tokio::test]
    async fn test_actor_signal_ref_projection() {
        let (event_relay, mut event_stream) = relay::<String>();

        let label = Actor::new("initial".to_string(), async move |state| {
            while let Some(value) = event_stream.next().await {
                state.set_neq(value);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        event_relay.send("renamed".to_string());

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        let len = label.signal_ref(|s| s.len()).to_stream().next().await.unwrap();
        assert_eq!(len, "renamed".len());
    }
}
