//=========================================================================
// Game Objects
//=========================================================================
//
// Every engine entity is (or contains) a GameObject: a process-unique
// identity, a name, an active flag, a tag bag, and a table of declared
// signal channels.
//
// Architecture:
//   ObjectId   — opaque identity, assigned once at construction
//   Tag        — name/description/payload/active metadata
//   GameObject — identity + name + active + tags + signals
//
// Objects compare by identity, never by name or attribute equality.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::signal::SignalTable;

//=== Module Declarations =================================================

mod tag;

//=== Public API ==========================================================

pub use tag::{Tag, TagSpec};

//=== ObjectId ============================================================

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque, process-unique identity for engine entities.
///
/// Generated once at construction and never reassigned. Used only for
/// equality and lookup; deliberately not `Ord` — ids carry no ordering
/// semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Allocates the next process-unique id.
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== ObjectError =========================================================

/// Errors from game-object operations.
#[derive(Debug)]
pub enum ObjectError {
    /// A call shape was malformed (e.g. `add_tag` with an empty name).
    InvalidArgument(String),

    /// No tag with the given name exists in the tag bag.
    TagNotFound(String),
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Self::TagNotFound(name) => write!(f, "no tag named '{}'", name),
        }
    }
}

impl std::error::Error for ObjectError {}

//=== GameObject ==========================================================

/// The identified, named, activatable entity base.
///
/// A GameObject owns its tag bag and its signal-channel table. Channels
/// are declared eagerly by the constructing type (one per event the type
/// produces), so a typo'd event name fails at the declaration site rather
/// than at emission time.
///
/// # Identity
///
/// `PartialEq` compares ids only: two objects are the same object, not
/// merely alike.
pub struct GameObject {
    id: ObjectId,
    name: String,
    active: bool,
    tags: HashMap<String, Tag>,
    signals: SignalTable,
}

impl GameObject {
    //--- Construction -----------------------------------------------------

    /// Creates an object with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let id = ObjectId::next();
        Self {
            id,
            name: name.into(),
            active: true,
            tags: HashMap::new(),
            signals: SignalTable::new(),
        }
    }

    /// Creates an object with a generated unique name token.
    pub fn anonymous() -> Self {
        let id = ObjectId::next();
        Self {
            id,
            name: format!("object_{}", id),
            active: true,
            tags: HashMap::new(),
            signals: SignalTable::new(),
        }
    }

    /// Creates an object named `<prefix>_<id>`, unique per process.
    ///
    /// Scenes use this so every live instance is distinguishable even when
    /// two share a display name.
    pub fn with_unique_name(prefix: &str) -> Self {
        let id = ObjectId::next();
        Self {
            id,
            name: format!("{}_{}", prefix, id),
            active: true,
            tags: HashMap::new(),
            signals: SignalTable::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The declared signal-channel table.
    pub fn signals(&self) -> &SignalTable {
        &self.signals
    }

    /// Mutable access for declaring channels at construction time.
    pub fn signals_mut(&mut self) -> &mut SignalTable {
        &mut self.signals
    }

    //--- Tag Management ---------------------------------------------------

    /// The full tag bag.
    pub fn tags(&self) -> &HashMap<String, Tag> {
        &self.tags
    }

    /// Looks up a tag by name.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::TagNotFound`] on a miss — lookups are never
    /// silently defaulted.
    pub fn tag(&self, name: &str) -> Result<&Tag, ObjectError> {
        self.tags
            .get(name)
            .ok_or_else(|| ObjectError::TagNotFound(name.to_string()))
    }

    /// Mutable tag lookup.
    pub fn tag_mut(&mut self, name: &str) -> Result<&mut Tag, ObjectError> {
        self.tags
            .get_mut(name)
            .ok_or_else(|| ObjectError::TagNotFound(name.to_string()))
    }

    /// Adds a tag from either accepted shape.
    ///
    /// An existing tag of the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::InvalidArgument`] when the shape is malformed
    /// (a `New` spec with an empty name).
    pub fn add_tag(&mut self, spec: impl Into<TagSpec>) -> Result<(), ObjectError> {
        let tag = match spec.into() {
            TagSpec::Existing(tag) => {
                if tag.name().is_empty() {
                    return Err(ObjectError::InvalidArgument(
                        "tag has an empty name".to_string(),
                    ));
                }
                tag
            }
            TagSpec::New {
                name,
                description,
                data,
            } => {
                if name.is_empty() {
                    return Err(ObjectError::InvalidArgument(
                        "add_tag requires a non-empty name".to_string(),
                    ));
                }
                let mut tag = Tag::new(name);
                if let Some(description) = description {
                    tag.set_description(description);
                }
                if let Some(data) = data {
                    tag.set_data(data);
                }
                tag
            }
        };

        self.tags.insert(tag.name().to_string(), tag);
        Ok(())
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for GameObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GameObject {}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("active", &self.active)
            .field("tags", &self.tags.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
