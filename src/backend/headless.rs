//=========================================================================
// Headless Backend
//=========================================================================
//
// A windowless backend for tests, CI, and scripted runs: input events
// come from a pre-loaded script (one batch per tick), presentation
// records the frame instead of flipping a surface, and the clock never
// sleeps.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::clock::{Clock, ManualClock};
use crate::core::event::Event;
use crate::core::gfx::{Canvas, Image};

use super::Backend;

//=== HeadlessStats =======================================================

/// Observations recorded by a [`HeadlessBackend`], shared with the test
/// that scripted it.
#[derive(Default)]
pub struct HeadlessStats {
    /// Frames presented so far.
    pub presents: usize,

    /// Copy of the most recently presented frame.
    pub last_frame: Option<Image>,
}

//=== HeadlessBackend =====================================================

/// Scripted, windowless backend.
///
/// Each `poll_events` call pops the next scripted batch; once the script
/// runs dry the backend reports no events, leaving the scene to end
/// itself.
pub struct HeadlessBackend {
    script: VecDeque<Vec<Event>>,
    stats: Rc<RefCell<HeadlessStats>>,
}

impl HeadlessBackend {
    /// A backend with no scripted input.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            stats: Rc::new(RefCell::new(HeadlessStats::default())),
        }
    }

    /// A backend that plays back `batches`, one batch per tick.
    pub fn with_script(batches: Vec<Vec<Event>>) -> Self {
        Self {
            script: batches.into(),
            stats: Rc::new(RefCell::new(HeadlessStats::default())),
        }
    }

    /// Appends one more tick's worth of events to the script.
    pub fn push_batch(&mut self, batch: Vec<Event>) {
        self.script.push_back(batch);
    }

    /// A handle onto the backend's observations, valid after the backend
    /// itself has been moved into the game.
    pub fn stats(&self) -> Rc<RefCell<HeadlessStats>> {
        Rc::clone(&self.stats)
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HeadlessBackend {
    fn create_canvas(&mut self, width: u32, height: u32, _title: &str) -> Canvas {
        Canvas::new(width, height)
    }

    fn poll_events(&mut self) -> Vec<Event> {
        self.script.pop_front().unwrap_or_default()
    }

    fn present(&mut self, canvas: &Canvas) {
        let mut stats = self.stats.borrow_mut();
        stats.presents += 1;
        stats.last_frame = Some(canvas.image().clone());
    }

    fn clock(&self) -> Box<dyn Clock> {
        Box::new(ManualClock::new(Duration::ZERO))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_plays_back_one_batch_per_poll() {
        let mut backend = HeadlessBackend::with_script(vec![
            vec![Event::MouseMoved { x: 1, y: 1 }],
            vec![],
            vec![Event::Quit],
        ]);

        assert_eq!(
            backend.poll_events(),
            vec![Event::MouseMoved { x: 1, y: 1 }]
        );
        assert_eq!(backend.poll_events(), vec![]);
        assert_eq!(backend.poll_events(), vec![Event::Quit]);
        assert_eq!(backend.poll_events(), vec![]); // script exhausted
    }

    #[test]
    fn present_records_frames() {
        let mut backend = HeadlessBackend::new();
        let stats = backend.stats();
        let canvas = backend.create_canvas(2, 2, "test");

        backend.present(&canvas);
        backend.present(&canvas);

        let stats = stats.borrow();
        assert_eq!(stats.presents, 2);
        assert_eq!(stats.last_frame.as_ref().unwrap().width(), 2);
    }
}
