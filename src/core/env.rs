//=========================================================================
// Global Environment
//=========================================================================
//
// A name-to-value table of shared engine services handed to every scene
// at construction: the game handle ("root"), the frame clock ("clock"),
// the target frame rate ("frame_rate"), and any integrator-supplied
// entries.
//
// Values are stored type-erased behind `Rc<dyn Any>` and recovered with
// a typed lookup, the same shape the signal table uses for payloads.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

//=== Constants ===========================================================

/// Frame rate used when the environment carries no "frame_rate" entry.
pub const DEFAULT_FRAME_RATE: u32 = 60;

//=== GlobalEnv ===========================================================

/// Shared, read-mostly engine environment.
///
/// Built once by the game before the first scene starts, then shared as
/// `Rc<GlobalEnv>`. Well-known entries:
///
/// | Name         | Type         | Meaning                          |
/// |--------------|--------------|----------------------------------|
/// | `root`       | `GameHandle` | Window metadata and quit flag    |
/// | `frame_rate` | `u32`        | Target frames per second         |
///
/// # Examples
///
/// ```
/// use umbra_engine::core::env::GlobalEnv;
///
/// let mut env = GlobalEnv::new();
/// env.insert("frame_rate", 30u32);
/// assert_eq!(env.frame_rate(), 30);
/// assert!(env.get::<String>("frame_rate").is_none()); // wrong type
/// ```
#[derive(Default)]
pub struct GlobalEnv {
    entries: HashMap<String, Rc<dyn Any>>,
}

impl GlobalEnv {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Stores `value` under `name`, replacing any previous entry.
    pub fn insert<T: Any>(&mut self, name: impl Into<String>, value: T) {
        self.entries.insert(name.into(), Rc::new(value));
    }

    /// Stores an already-shared value under `name`.
    pub fn insert_shared(&mut self, name: impl Into<String>, value: Rc<dyn Any>) {
        self.entries.insert(name.into(), value);
    }

    /// Typed lookup. `None` if the name is absent or holds another type.
    pub fn get<T: Any>(&self, name: &str) -> Option<Rc<T>> {
        let entry = self.entries.get(name)?;
        Rc::clone(entry).downcast::<T>().ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The configured target frame rate, or [`DEFAULT_FRAME_RATE`].
    pub fn frame_rate(&self) -> u32 {
        self.get::<u32>("frame_rate")
            .map(|rate| *rate)
            .unwrap_or(DEFAULT_FRAME_RATE)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_typed_get() {
        let mut env = GlobalEnv::new();
        env.insert("greeting", String::from("hello"));

        let value = env.get::<String>("greeting").unwrap();
        assert_eq!(*value, "hello");
    }

    #[test]
    fn wrong_type_lookup_is_none() {
        let mut env = GlobalEnv::new();
        env.insert("count", 7u32);

        assert!(env.get::<String>("count").is_none());
        assert!(env.get::<u32>("count").is_some());
    }

    #[test]
    fn missing_name_is_none() {
        let env = GlobalEnv::new();
        assert!(env.get::<u32>("absent").is_none());
        assert!(!env.contains("absent"));
    }

    #[test]
    fn frame_rate_defaults_and_overrides() {
        let mut env = GlobalEnv::new();
        assert_eq!(env.frame_rate(), DEFAULT_FRAME_RATE);

        env.insert("frame_rate", 144u32);
        assert_eq!(env.frame_rate(), 144);
    }

    #[test]
    fn insert_replaces_previous_entry() {
        let mut env = GlobalEnv::new();
        env.insert("frame_rate", 30u32);
        env.insert("frame_rate", 90u32);
        assert_eq!(env.frame_rate(), 90);
    }
}
