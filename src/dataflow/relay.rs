//! Event streaming Relay implementation
//!
//! Relay provides type-safe event streaming for the Actor+Relay architecture
//! using plain unbounded channels instead of a custom Stream implementation.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, OnceLock};

/// Type-safe event streaming relay.
///
/// Relays carry events from editor code (canvas callbacks, UI handlers) into
/// Actor processor loops over an unbounded channel.
///
/// # Event-Source Naming Convention
///
/// Relays are named `{source}_{event}_relay` after the event that feeds them:
/// - `anchor_linked_relay` - canvas reported one half of a new connection
/// - `device_removed_relay` - user deleted a device
///
/// # Examples
///
/// ```rust
/// use wireflow::dataflow::relay;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (device_removed_relay, mut stream) = relay::<String>();
///
/// device_removed_relay.send("dev42".to_string());
///
/// while let Some(device_id) = stream.next().await {
///     println!("device removed: {device_id}");
/// }
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

/// Error type for Relay operations
#[derive(Debug, Clone)]
pub enum RelayError {
    /// The channel has been closed (receiver dropped)
    ChannelClosed,
    /// Relay send called from multiple locations (debug builds only)
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new Relay with its receiver stream.
    ///
    /// Returns `(Relay, UnboundedReceiver)` following Rust's channel
    /// conventions. The free function [`relay()`] reads better at call sites.
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    /// Check that this relay is only sent from a single source location.
    ///
    /// Debug builds enforce the single-source constraint so every event kind
    /// has exactly one origin in the codebase.
    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        let previous = *self.emit_location.get_or_init(|| caller);
        if previous == caller {
            Ok(())
        } else {
            Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            })
        }
    }

    /// Send an event through the relay.
    ///
    /// If the receiver has been dropped the event is silently discarded; use
    /// [`Relay::try_send`] to observe send failures. In debug builds, a
    /// warning is logged when the relay is sent from more than one source
    /// location.
    #[track_caller]
    pub fn send(&self, value: T) {
        #[cfg(debug_assertions)]
        if let Err(RelayError::MultipleEmitters { previous, current }) = self.check_single_source()
        {
            tracing::warn!(%previous, %current, "relay sent from multiple source locations");
        }

        // Dropped events when no subscriber exists are by contract.
        let _ = self.sender.unbounded_send(value);
    }

    /// Send an event with explicit error handling.
    ///
    /// Returns [`RelayError::ChannelClosed`] when the receiver is gone, and in
    /// debug builds [`RelayError::MultipleEmitters`] on a single-source
    /// violation.
    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

impl<T> Default for Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a disconnected Relay whose events are silently discarded.
    ///
    /// Useful as placeholder wiring and in tests that never consume events.
    fn default() -> Self {
        let (relay, _receiver) = Self::new();
        relay
    }
}

/// Creates a new Relay with its receiver stream.
///
/// The idiomatic constructor for wiring relays into Actor processors.
///
/// # Examples
///
/// ```rust
/// use wireflow::dataflow::relay;
///
/// let (anchor_linked_relay, anchor_linked_stream) = relay::<String>();
/// ```
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_relay_basic_functionality() {
        let (relay, mut receiver) = Relay::new();

        relay.send("test_event".to_string());

        let received = receiver.next().await;
        assert_eq!(received, Some("test_event".to_string()));
    }

    #[tokio::test]
    async fn test_relay_try_send() {
        let (relay, mut receiver) = Relay::new();

        // Should succeed while receiver exists
        assert!(relay.try_send("test".to_string()).is_ok());
        assert_eq!(receiver.next().await, Some("test".to_string()));

        // Drop receiver
        drop(receiver);

        // Should fail after receiver dropped
        assert!(relay.try_send("fail".to_string()).is_err());
    }

    #[tokio::test]
    async fn test_relay_function() {
        let (relay, mut stream) = relay::<String>();

        relay.send("via_function".to_string());

        assert_eq!(stream.next().await, Some("via_function".to_string()));
    }

    #[tokio::test]
    async fn test_disconnected_relay_discards() {
        let relay = Relay::<u32>::default();
        // Must not panic or block.
        relay.send(7);
        assert!(relay.try_send(8).is_err());
    }
}
