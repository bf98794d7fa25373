//=========================================================================
// Backend Interface
//=========================================================================
//
// The seam between the engine core and whatever owns the window: the
// loop asks a Backend for its canvas, drains input events from it once
// per tick, and hands the painted canvas back for presentation.
//
// Two implementations ship:
//   WinitBackend    — real window, events relayed from the winit thread
//   HeadlessBackend — scripted events, no window; tests and CI
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::clock::Clock;
use crate::core::event::Event;
use crate::core::gfx::Canvas;

//=== Module Declarations =================================================

mod headless;

//=== Public API ==========================================================

pub use headless::{HeadlessBackend, HeadlessStats};

//=== Backend Trait =======================================================

/// The platform collaborator the game loop drives.
pub trait Backend {
    /// Creates the drawing surface for a window of the given size.
    ///
    /// Called once, before the first scene starts.
    fn create_canvas(&mut self, width: u32, height: u32, title: &str) -> Canvas;

    /// Drains every input event queued since the previous call.
    ///
    /// Non-blocking: returns an empty batch when nothing is pending. A
    /// backend that can no longer deliver events must yield
    /// [`Event::Quit`] so the loop winds down instead of spinning
    /// forever.
    fn poll_events(&mut self) -> Vec<Event>;

    /// Presents the painted canvas (the end-of-tick flip).
    fn present(&mut self, canvas: &Canvas);

    /// The pacing clock matching this backend.
    fn clock(&self) -> Box<dyn Clock>;
}
