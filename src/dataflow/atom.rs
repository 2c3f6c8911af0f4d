//! Local UI state Atom helper
//!
//! Atom wraps Actor+Relay for simple local state - hover flags, dialog
//! visibility, input focus - where a full domain actor would be noise.

use crate::dataflow::{Actor, Relay, relay};
use futures::StreamExt;
use futures_signals::signal::Signal;

/// Internal update type for Atom operations
#[derive(Clone, Debug)]
enum AtomUpdate<T> {
    Set(T),
    SetNeq(T),
}

/// Convenient wrapper for local UI state using Actor+Relay internally.
///
/// Keeps simple state on the same architecture as the domains: mutation goes
/// through a relay into a processor, reads go through signals. Use it for
/// truly local state; circuit data belongs in the domain actors.
///
/// # Examples
///
/// ```rust
/// use wireflow::dataflow::Atom;
///
/// # async fn example() {
/// let anchor_hovered = Atom::new(false);
/// anchor_hovered.set(true);
/// anchor_hovered.toggle();
/// // UI binds via anchor_hovered.signal()
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Atom<T>
where
    T: Clone + Send + Sync + 'static,
{
    actor: Actor<T>,
    setter: Relay<AtomUpdate<T>>,
}

impl<T> Atom<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new Atom with an initial value.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(initial: T) -> Self
    where
        T: PartialEq,
    {
        let (setter, mut setter_stream) = relay();

        let actor = Actor::new(initial, async move |state| {
            while let Some(update) = setter_stream.next().await {
                match update {
                    AtomUpdate::Set(new_value) => state.set(new_value),
                    AtomUpdate::SetNeq(new_value) => state.set_neq(new_value),
                }
            }
        });

        Self { actor, setter }
    }

    // Single call site for the setter relay so the debug single-emitter
    // check holds across set/set_neq/toggle.
    fn send_update(&self, update: AtomUpdate<T>) {
        self.setter.send(update);
    }

    /// Update the Atom's value.
    pub fn set(&self, value: T) {
        self.send_update(AtomUpdate::Set(value));
    }

    /// Update the Atom's value only if it differs from the current value,
    /// avoiding redundant signal emissions.
    pub fn set_neq(&self, value: T)
    where
        T: PartialEq,
    {
        self.send_update(AtomUpdate::SetNeq(value));
    }

    /// Get a reactive signal for this Atom's value.
    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.actor.signal()
    }

    /// Get a reactive signal computed from a reference to the value.
    pub fn signal_ref<U, F>(&self, f: F) -> impl Signal<Item = U> + use<T, U, F>
    where
        F: Fn(&T) -> U + Send + Sync + 'static,
        U: PartialEq + Send + Sync + 'static,
    {
        self.actor.signal_ref(f)
    }

    /// Get the current value (for event handlers only).
    ///
    /// Prefer signal-based access when possible.
    pub fn get_cloned(&self) -> T {
        self.actor.get_cloned()
    }
}

/// Boolean-specific methods for `Atom<bool>`
impl Atom<bool> {
    /// Flip the boolean value.
    ///
    /// Read-then-set; fine for single-threaded UI event handlers, which is
    /// the only intended caller.
    pub fn toggle(&self) {
        let flipped = !self.get_cloned();
        self.send_update(AtomUpdate::Set(flipped));
    }
}

impl<T> Default for Atom<T>
where
    T: Clone + Send + Sync + Default + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
