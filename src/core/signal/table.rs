//=========================================================================
// Signal Table
//=========================================================================
//
// Declared-event-name → channel map owned by each GameObject.
//
// Channels are declared eagerly by the constructing entity type (one per
// event it produces) and stored type-erased; access downcasts back to the
// concrete `Signal<A>`.
//
// Pattern: declare at construction → channel()/connect()/emit() at runtime
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

//=== External Crates =====================================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::{Signal, SignalError};

//=== SignalTable =========================================================

/// The per-entity table of declared signal channels.
///
/// Looking up a name that was never declared, or declaring it with one
/// payload type and accessing it with another, fails with
/// [`SignalError::InvalidSignal`] — the typed equivalent of connecting to
/// something that is not a bound, emission-capable channel.
pub struct SignalTable {
    channels: HashMap<&'static str, Box<dyn Any>>,
}

impl SignalTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
        }
    }

    //--- Declaration ------------------------------------------------------

    /// Declares a channel carrying payloads of type `A`.
    ///
    /// Redeclaring an existing name replaces the channel (and drops its
    /// subscribers) — logged, as it is almost always a construction bug.
    pub fn declare<A: 'static>(&mut self, name: &'static str) {
        if self
            .channels
            .insert(name, Box::new(Signal::<A>::new()))
            .is_some()
        {
            warn!("signal channel '{}' was redeclared; subscribers dropped", name);
        }
    }

    /// Declares a channel with a pre-installed pre-emission hook.
    pub fn declare_with_before<A: 'static>(
        &mut self,
        name: &'static str,
        hook: impl FnMut(&A) + 'static,
    ) {
        let mut signal = Signal::<A>::new();
        signal.set_before_hook(hook);
        if self.channels.insert(name, Box::new(signal)).is_some() {
            warn!("signal channel '{}' was redeclared; subscribers dropped", name);
        }
    }

    //--- Access -----------------------------------------------------------

    /// Returns the channel declared under `name` with payload type `A`.
    ///
    /// # Errors
    ///
    /// [`SignalError::InvalidSignal`] when the name is undeclared or the
    /// payload type differs from the declaration.
    pub fn channel<A: 'static>(&self, name: &str) -> Result<&Signal<A>, SignalError> {
        let boxed = self
            .channels
            .get(name)
            .ok_or_else(|| SignalError::undeclared(name))?;

        boxed
            .downcast_ref::<Signal<A>>()
            .ok_or_else(|| SignalError::wrong_payload(name))
    }

    /// Whether a channel of any payload type is declared under `name`.
    pub fn is_declared(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Iterates the declared channel names (order unspecified).
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.channels.keys().copied()
    }

    //--- Convenience ------------------------------------------------------

    /// Connects `slot` to the named channel.
    pub fn connect<A: 'static>(
        &self,
        name: &str,
        key: impl Into<String>,
        slot: impl FnMut(&A) + 'static,
    ) -> Result<bool, SignalError> {
        Ok(self.channel::<A>(name)?.connect(key, slot))
    }

    /// Disconnects the slot registered under `key` from the named channel.
    pub fn disconnect<A: 'static>(&self, name: &str, key: &str) -> Result<bool, SignalError> {
        Ok(self.channel::<A>(name)?.disconnect(key))
    }

    /// Emits the named channel.
    pub fn emit<A: 'static>(&self, name: &str, args: &A) -> Result<(), SignalError> {
        self.channel::<A>(name)?.emit(args);
        Ok(())
    }
}

impl Default for SignalTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SignalTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalTable")
            .field("channels", &self.channels.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
