//=========================================================================
// Engine Core
//=========================================================================
//
// All backend-agnostic engine systems.
//
// Architecture:
//   object  — identity, tags, the GameObject entity base
//   signal  — per-event subscriber channels and the per-entity table
//   gfx     — software pixel substrate (images, masks, the canvas)
//   widget  — the parent-relative widget tree and mask compositor
//   scene   — scene lifecycle, transition commands, the registry
//   event   — portable input event types
//   env     — the shared cross-scene environment
//   clock   — frame pacing and elapsed-time queries
//
//=========================================================================

pub mod clock;
pub mod env;
pub mod event;
pub mod gfx;
pub mod object;
pub mod scene;
pub mod signal;
pub mod widget;
