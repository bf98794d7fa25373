//=========================================================================
// Widget Tree
//=========================================================================
//
// A hierarchy of drawable, positioned entities. Each widget exclusively
// owns its children; positions are absolute, resolved from the parent's
// position once at attach time.
//
// Architecture:
//   Widget       — the tree-node trait (process_event / update / draw)
//   WidgetBase   — identity, position, children, canvas, sprite
//   Sprite       — image + mask + overlap-mask compositing component
//   StaticWidget — a plain image widget
//   Button       — pressed/hover state machine with event channels
//
// Occlusion context flows down the tree: a parent passes its own position
// and mask to children as the `Occluder`, so no child ever needs to reach
// back up through shared references.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::event::Event;
use crate::core::gfx::{Canvas, Image, Mask, Point, Rect};
use crate::core::object::{GameObject, ObjectId};

//=== Module Declarations =================================================

mod button;
mod sprite;
mod static_widget;

//=== Public API ==========================================================

pub use button::Button;
pub use sprite::Sprite;
pub use static_widget::StaticWidget;

//=== Occluder ============================================================

/// The occlusion context a parent hands to each child during `update`.
///
/// Carries the occluding widget's absolute position and mask by
/// reference; [`Occluder::NONE`] means "nothing occludes you" and leaves
/// the child drawing its full image.
#[derive(Debug, Clone, Copy)]
pub struct Occluder<'a> {
    pub position: Point,
    pub mask: Option<&'a Mask>,
}

impl<'a> Occluder<'a> {
    /// No occluder configured.
    pub const NONE: Occluder<'static> = Occluder {
        position: Point::ZERO,
        mask: None,
    };

    pub fn new(position: Point, mask: &'a Mask) -> Self {
        Self {
            position,
            mask: Some(mask),
        }
    }
}

//=== Widget Trait ========================================================

/// A node in the widget tree.
///
/// Concrete widgets embed a [`WidgetBase`] and expose it through
/// `base`/`base_mut`; the default trait methods then run the standard
/// tree recursion. Types with their own behavior (buttons, animated
/// widgets) override the relevant method and delegate the recursion back
/// to the base.
pub trait Widget {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Handles one input event, then forwards it to every child.
    fn process_event(&mut self, event: &Event) {
        self.base_mut().propagate_event(event);
    }

    /// Recomputes this widget's overlap mask against `occluder`, then
    /// updates every child with this widget as their occluder.
    fn update(&mut self, occluder: &Occluder<'_>) {
        self.base_mut().update_tree(occluder);
    }

    /// Paints this widget's visible region, then every child.
    fn draw(&self) {
        self.base().draw_tree();
    }
}

//=== WidgetBase ==========================================================

/// The state every widget carries: entity identity, absolute position,
/// parent back-reference, exclusively-owned children, the shared canvas,
/// and the sprite component.
pub struct WidgetBase {
    object: GameObject,
    position: Point,
    parent: Option<ObjectId>,
    children: Vec<Box<dyn Widget>>,
    canvas: Rc<RefCell<Canvas>>,
    sprite: Sprite,
}

impl WidgetBase {
    //--- Construction -----------------------------------------------------

    /// Creates a widget base at the given absolute position.
    ///
    /// `image` may be `None` for purely structural widgets; such widgets
    /// have no hit-rect and draw nothing themselves.
    pub fn new(
        name: impl Into<String>,
        canvas: Rc<RefCell<Canvas>>,
        image: Option<Image>,
        position: Point,
    ) -> Self {
        Self {
            object: GameObject::new(name),
            position,
            parent: None,
            children: Vec::new(),
            canvas,
            sprite: Sprite::new(image),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn object(&self) -> &GameObject {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut GameObject {
        &mut self.object
    }

    pub fn id(&self) -> ObjectId {
        self.object.id()
    }

    pub fn name(&self) -> &str {
        self.object.name()
    }

    /// Absolute position, top-left of the widget's image.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn translate(&mut self, delta: Point) {
        self.position = self.position + delta;
    }

    /// Identity of the parent this widget is attached to, if any.
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    pub fn canvas(&self) -> &Rc<RefCell<Canvas>> {
        &self.canvas
    }

    /// The widget's hit-rect: its image's bounds at the current position,
    /// or `None` when there is no image.
    pub fn rect(&self) -> Option<Rect> {
        self.sprite
            .image()
            .map(|image| Rect::from_image(self.position, image))
    }

    //--- Children ---------------------------------------------------------

    /// Attaches `child`, taking exclusive ownership.
    ///
    /// The child's position is translated by this widget's position once,
    /// here; moving this widget afterwards does not move already-attached
    /// children. Returns the child's id for later lookup or removal.
    pub fn add_widget(&mut self, mut child: Box<dyn Widget>) -> ObjectId {
        let base = child.base_mut();
        base.position = base.position + self.position;
        base.parent = Some(self.object.id());

        let id = base.id();
        self.children.push(child);
        id
    }

    /// Detaches and drops the child with the given id.
    ///
    /// Returns whether the child was present; absence is not an error.
    pub fn remove_widget(&mut self, id: ObjectId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| child.base().id() != id);
        self.children.len() != before
    }

    /// Children in attach order, which is also their draw order.
    pub fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    /// Mutable lookup of a direct child by id.
    pub fn child_mut(&mut self, id: ObjectId) -> Option<&mut Box<dyn Widget>> {
        self.children
            .iter_mut()
            .find(|child| child.base().id() == id)
    }

    //--- Tree Recursion ---------------------------------------------------

    /// Forwards an event to every child.
    pub fn propagate_event(&mut self, event: &Event) {
        for child in &mut self.children {
            child.process_event(event);
        }
    }

    /// Standard update recursion: recompute this widget's overlap mask,
    /// then update every child with this widget as occluder.
    pub fn update_tree(&mut self, occluder: &Occluder<'_>) {
        self.sprite.update_overlap(self.position, occluder);

        let child_occluder = Occluder {
            position: self.position,
            mask: self.sprite.mask(),
        };
        for child in &mut self.children {
            child.update(&child_occluder);
        }
    }

    /// Standard draw recursion: paint this widget, then every child on
    /// top, in attach order. An inactive widget hides its whole subtree.
    pub fn draw_tree(&self) {
        if !self.object.is_active() {
            return;
        }
        {
            let mut canvas = self.canvas.borrow_mut();
            self.sprite.draw(&mut canvas, self.position);
        }
        for child in &self.children {
            child.draw();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
