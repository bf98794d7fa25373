//=========================================================================
// Tags
//=========================================================================
//
// A tag is an ad hoc piece of metadata attached to a game object: a name,
// a human-readable description, an arbitrary payload, and an active flag.
// Tags live in their owning object's tag bag, keyed by name.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;
use std::fmt;

//=== Tag =================================================================

/// A named, describable piece of metadata with an arbitrary payload.
///
/// Every field is mutable for the tag's full lifetime. A tag is owned by
/// exactly one entity's tag bag; inserting a tag under an existing name
/// replaces the previous one.
pub struct Tag {
    name: String,
    description: String,
    data: Option<Box<dyn Any>>,
    active: bool,
}

impl Tag {
    /// Creates a tag with a name only.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            data: None,
            active: true,
        }
    }

    /// Creates a tag with a name, description, and payload.
    pub fn with_data(
        name: impl Into<String>,
        description: impl Into<String>,
        data: impl Any,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            data: Some(Box::new(data)),
            active: true,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Returns the payload downcast to `T`, or `None` if there is no
    /// payload or it holds a different type.
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|d| d.downcast_ref::<T>())
    }

    pub fn set_data(&mut self, data: impl Any) {
        self.data = Some(Box::new(data));
    }

    pub fn clear_data(&mut self) {
        self.data = None;
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("has_data", &self.data.is_some())
            .field("active", &self.active)
            .finish()
    }
}

//=== TagSpec =============================================================

/// The two accepted call shapes for [`GameObject::add_tag`].
///
/// Either a fully constructed tag, or a name plus optional description and
/// payload from which a new tag is built.
///
/// [`GameObject::add_tag`]: super::GameObject::add_tag
pub enum TagSpec {
    /// Insert this tag as-is, keyed by its own name.
    Existing(Tag),

    /// Construct a new tag from the given parts.
    New {
        name: String,
        description: Option<String>,
        data: Option<Box<dyn Any>>,
    },
}

impl TagSpec {
    /// Convenience constructor for the name-only shape.
    pub fn named(name: impl Into<String>) -> Self {
        Self::New {
            name: name.into(),
            description: None,
            data: None,
        }
    }
}

impl From<Tag> for TagSpec {
    fn from(tag: Tag) -> Self {
        Self::Existing(tag)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
