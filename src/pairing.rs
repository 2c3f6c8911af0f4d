//! Anchor-connection pairing.
//!
//! The canvas reports the two ends of a wire as separate events that arrive
//! back to back. [`PairingSlot`] buffers the first half until the second
//! shows up, then merges them into one [`Connector`]. [`PairingTimeout`] is
//! the companion timer for expiring a half whose counterpart never arrives.

use crate::circuit::{Connector, ConnectorPiece, PieceKind};
use crate::dataflow::{Task, TaskHandle};
use std::time::Duration;

/// Single-slot buffer holding at most one unmatched connection half.
///
/// Correct pairing relies on the two halves of one logical connection
/// arriving consecutively; nothing in the event data identifies which
/// connection a half belongs to, so interleaved events from two different
/// connections will cross-pair. Owners keep exactly one slot per event
/// sequence to bound that risk.
#[derive(Debug, Default)]
pub struct PairingSlot {
    pending: Option<ConnectorPiece>,
}

impl PairingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one connection half into the slot.
    ///
    /// Returns `None` when the piece was buffered as the first half, or
    /// `Some(connector)` when it completed a pair; the slot is empty again
    /// afterwards.
    ///
    /// Two halves of the same kind (two `From`s or two `To`s) mean the
    /// canvas produced a malformed event sequence. They are still merged -
    /// the incoming piece supplies the endpoint for its own kind and the
    /// buffered piece the other - but a warning is logged since the result
    /// is as garbled as the input.
    pub fn accept(&mut self, piece: ConnectorPiece) -> Option<Connector> {
        let Some(pending) = self.pending.take() else {
            self.pending = Some(piece);
            return None;
        };

        if pending.kind() == piece.kind() {
            tracing::warn!(
                kind = ?piece.kind(),
                "both halves of a connection are the same kind; merging anyway"
            );
        }

        Some(merge(piece, pending))
    }

    /// Whether an unmatched half is currently buffered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    /// Kind of the buffered half, if any.
    pub fn pending_kind(&self) -> Option<PieceKind> {
        self.pending.as_ref().map(ConnectorPiece::kind)
    }

    /// Drop the buffered half, if any. Used when a half times out.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Merge two halves into a connector.
///
/// The incoming piece wins the endpoint matching its own kind; the buffered
/// piece fills the other endpoint. For a well-formed From/To pair this is
/// simply each half taking its own side.
fn merge(incoming: ConnectorPiece, pending: ConnectorPiece) -> Connector {
    let incoming_is_from = incoming.kind() == PieceKind::From;
    let (from, to) = if incoming_is_from {
        (incoming.into_link(), pending.into_link())
    } else {
        (pending.into_link(), incoming.into_link())
    };
    Connector { from, to }
}

/// Single pending timer with start/cancel semantics.
///
/// `start` always replaces any armed timer, so at most one callback is ever
/// pending. Intended for dropping a stale unmatched half after a delay; the
/// pairing path itself does not arm it.
#[derive(Debug, Default)]
pub struct PairingTimeout {
    handle: Option<TaskHandle>,
}

impl PairingTimeout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, cancelling any previously armed one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.handle = Some(Task::start_droppable(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    /// Disarm the pending timer, if any.
    pub fn cancel(&mut self) {
        self.handle = None;
    }

    /// Whether a timer is armed and has not fired yet.
    pub fn is_armed(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
