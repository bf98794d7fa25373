//=========================================================================
// Signals
//=========================================================================
//
// A signal is a per-object event channel: a set of subscriber callables
// (slots) invoked synchronously on emission, with optional pre- and
// post-emission hooks.
//
// Architecture:
//   Signal<A>   — one channel carrying payload type A
//   SignalTable — declared-event-name → channel, owned by a GameObject
//
// Emission policy (documented contract): the slot set is snapshotted at
// emission start. A slot may connect or disconnect slots on the same
// channel while the emission is in progress; the change takes effect on
// the next emission, never the current one.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

//=== Module Declarations =================================================

mod table;

//=== Public API ==========================================================

pub use table::SignalTable;

//=== SignalError =========================================================

/// Errors from signal-table operations.
#[derive(Debug)]
pub enum SignalError {
    /// The named channel is not a declared, emission-capable channel of
    /// the requested payload type.
    InvalidSignal { name: String, reason: &'static str },
}

impl SignalError {
    pub(crate) fn undeclared(name: &str) -> Self {
        Self::InvalidSignal {
            name: name.to_string(),
            reason: "channel is not declared",
        }
    }

    pub(crate) fn wrong_payload(name: &str) -> Self {
        Self::InvalidSignal {
            name: name.to_string(),
            reason: "channel carries a different payload type",
        }
    }
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSignal { name, reason } => {
                write!(f, "invalid signal '{}': {}", name, reason)
            }
        }
    }
}

impl std::error::Error for SignalError {}

//=== Signal ==============================================================

/// Shared, reentrancy-safe slot callable.
///
/// Slots are `Rc`-held so the subscriber map's borrow can be released
/// before any slot runs.
type SlotFn<A> = Rc<RefCell<dyn FnMut(&A)>>;

/// A single event channel carrying payloads of type `A`.
///
/// Slots are keyed by a caller-supplied string: connecting the same key
/// twice is a no-op (set semantics — a slot is never invoked more than
/// once per emission), and disconnecting an absent key is a no-op, not an
/// error. Slot iteration order is unspecified; tests must not depend on
/// invocation order across slots.
///
/// # Examples
///
/// ```
/// use umbra_engine::core::signal::Signal;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let fired = Rc::new(Cell::new(0));
/// let signal: Signal<()> = Signal::new();
///
/// let counter = fired.clone();
/// signal.connect("count", move |_| counter.set(counter.get() + 1));
///
/// signal.emit(&());
/// assert_eq!(fired.get(), 1);
/// ```
pub struct Signal<A = ()> {
    slots: RefCell<HashMap<String, SlotFn<A>>>,
    before: Option<SlotFn<A>>,
    after: Option<SlotFn<A>>,
}

impl<A> Signal<A> {
    //--- Construction -----------------------------------------------------

    /// Creates a channel with no subscribers and no hooks.
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(HashMap::new()),
            before: None,
            after: None,
        }
    }

    /// Installs the pre-emission hook, replacing any previous one.
    pub fn set_before_hook(&mut self, hook: impl FnMut(&A) + 'static) {
        self.before = Some(Rc::new(RefCell::new(hook)));
    }

    /// Installs the post-emission hook, replacing any previous one.
    pub fn set_after_hook(&mut self, hook: impl FnMut(&A) + 'static) {
        self.after = Some(Rc::new(RefCell::new(hook)));
    }

    //--- Subscription -----------------------------------------------------

    /// Registers `slot` under `key` for every future emission.
    ///
    /// Returns `false` (and leaves the existing slot in place) when `key`
    /// is already connected — duplicate subscriptions are no-ops.
    pub fn connect(&self, key: impl Into<String>, slot: impl FnMut(&A) + 'static) -> bool {
        let key = key.into();
        let mut slots = self.slots.borrow_mut();
        if slots.contains_key(&key) {
            return false;
        }
        slots.insert(key, Rc::new(RefCell::new(slot)));
        true
    }

    /// Removes the slot registered under `key`, if present.
    ///
    /// Removing an absent key is a no-op; returns whether a slot was
    /// actually removed.
    pub fn disconnect(&self, key: &str) -> bool {
        self.slots.borrow_mut().remove(key).is_some()
    }

    /// Whether a slot is currently registered under `key`.
    pub fn is_connected(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(key)
    }

    /// Number of currently registered slots.
    pub fn slot_count(&self) -> usize {
        self.slots.borrow().len()
    }

    //--- Emission ---------------------------------------------------------

    /// Emits the channel: pre-hook, then every slot registered at emission
    /// start exactly once, then post-hook.
    ///
    /// The slot set is snapshotted before any slot runs, so slots may
    /// connect/disconnect on this channel mid-emission; such changes apply
    /// from the next emission onward.
    pub fn emit(&self, args: &A) {
        if let Some(before) = &self.before {
            (before.borrow_mut())(args);
        }

        // Snapshot: the map borrow is dropped before slots are invoked.
        let snapshot: Vec<SlotFn<A>> = self.slots.borrow().values().cloned().collect();
        for slot in &snapshot {
            (slot.borrow_mut())(args);
        }

        if let Some(after) = &self.after {
            (after.borrow_mut())(args);
        }
    }
}

impl<A> Default for Signal<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Signal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.borrow().len())
            .field("has_before", &self.before.is_some())
            .field("has_after", &self.after.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> Rc<Cell<u32>> {
        Rc::new(Cell::new(0))
    }

    #[test]
    fn new_signal_has_no_slots() {
        let signal: Signal<()> = Signal::new();
        assert_eq!(signal.slot_count(), 0);
    }

    #[test]
    fn emit_with_zero_subscribers_is_fine() {
        let signal: Signal<()> = Signal::new();
        signal.emit(&());
    }

    #[test]
    fn connected_slot_fires_on_every_emission() {
        let fired = counter();
        let signal: Signal<()> = Signal::new();

        let c = fired.clone();
        assert!(signal.connect("count", move |_| c.set(c.get() + 1)));

        signal.emit(&());
        signal.emit(&());
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn duplicate_connect_is_a_no_op() {
        let fired = counter();
        let signal: Signal<()> = Signal::new();

        let c = fired.clone();
        assert!(signal.connect("count", move |_| c.set(c.get() + 1)));
        let c = fired.clone();
        assert!(!signal.connect("count", move |_| c.set(c.get() + 10)));

        signal.emit(&());
        // The first slot stays; the duplicate never registers.
        assert_eq!(fired.get(), 1);
        assert_eq!(signal.slot_count(), 1);
    }

    #[test]
    fn connect_twice_disconnect_once_leaves_nothing() {
        let signal: Signal<()> = Signal::new();
        signal.connect("slot", |_| {});
        signal.connect("slot", |_| {});
        assert!(signal.disconnect("slot"));
        assert_eq!(signal.slot_count(), 0);
        assert!(!signal.is_connected("slot"));
    }

    #[test]
    fn disconnect_absent_is_a_no_op() {
        let signal: Signal<()> = Signal::new();
        assert!(!signal.disconnect("never-connected"));
    }

    #[test]
    fn disconnected_slot_does_not_fire() {
        let fired = counter();
        let signal: Signal<()> = Signal::new();

        let c = fired.clone();
        signal.connect("count", move |_| c.set(c.get() + 1));
        signal.emit(&());
        signal.disconnect("count");
        signal.emit(&());

        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn hooks_bracket_every_slot_exactly_once() {
        // Records a strictly increasing sequence: before < each slot < after.
        let trace: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let mut signal: Signal<()> = Signal::new();

        let t = trace.clone();
        signal.set_before_hook(move |_| t.borrow_mut().push("before"));
        let t = trace.clone();
        signal.set_after_hook(move |_| t.borrow_mut().push("after"));

        let t = trace.clone();
        signal.connect("a", move |_| t.borrow_mut().push("slot"));
        let t = trace.clone();
        signal.connect("b", move |_| t.borrow_mut().push("slot"));

        signal.emit(&());

        let trace = trace.borrow();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.first(), Some(&"before"));
        assert_eq!(trace.last(), Some(&"after"));
        assert_eq!(trace.iter().filter(|s| **s == "slot").count(), 2);
    }

    #[test]
    fn hooks_fire_even_with_zero_subscribers() {
        let fired = counter();
        let mut signal: Signal<()> = Signal::new();

        let c = fired.clone();
        signal.set_before_hook(move |_| c.set(c.get() + 1));
        let c = fired.clone();
        signal.set_after_hook(move |_| c.set(c.get() + 1));

        signal.emit(&());
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn payload_reaches_slots() {
        let seen = Rc::new(Cell::new(0i32));
        let signal: Signal<i32> = Signal::new();

        let s = seen.clone();
        signal.connect("capture", move |value| s.set(*value));

        signal.emit(&42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn mid_emission_connect_applies_next_emission() {
        let fired = counter();
        let signal: Rc<Signal<()>> = Rc::new(Signal::new());

        let sig = signal.clone();
        let c = fired.clone();
        signal.connect("spawner", move |_| {
            let c = c.clone();
            sig.connect("late", move |_| c.set(c.get() + 1));
        });

        // Snapshot policy: the freshly connected slot must not fire now.
        signal.emit(&());
        assert_eq!(fired.get(), 0);

        signal.emit(&());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn mid_emission_disconnect_applies_next_emission() {
        let fired = counter();
        let signal: Rc<Signal<()>> = Rc::new(Signal::new());

        let c = fired.clone();
        signal.connect("victim", move |_| c.set(c.get() + 1));

        let sig = signal.clone();
        signal.connect("reaper", move |_| {
            sig.disconnect("victim");
        });

        // Both slots were registered at emission start, so both run once.
        signal.emit(&());
        assert_eq!(fired.get(), 1);

        signal.emit(&());
        assert_eq!(fired.get(), 1);
    }
}
