//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's game loop via MPSC.
//
// Architecture:
// ```text
//  Main Thread:                     Loop Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Game Loop       │
//  │   ↓                      │    │                  │
//  │  WinitPlatform           │    │  WinitBackend    │
//  │   ├─ Converts Winit      │    │  ↓               │
//  │   └─ Tracks cursor       │    │  Scene           │
//  │   ↓                      │    │  ↓               │
//  │  MPSC Channel ───────────┼───▶│  Widget Tree     │
//  └──────────────────────────┘    └──────────────────┘
// ```
//
// Key Design Decisions:
// - **Cursor tracking on the platform side**: Winit reports the cursor
//   position only on `CursorMoved`, so the platform remembers it and
//   stamps it onto every button event the widget layer will hit-test
// - **Graceful channel disconnect**: if the loop thread dies, the
//   platform logs a warning but keeps running so the window can close;
//   conversely the backend synthesizes a quit when the platform is gone
// - **Main thread requirement**: Winit mandates main thread on
//   macOS/iOS, so `WinitPlatform::run()` must be called there
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::backend::Backend;
use crate::core::clock::{Clock, SystemClock};
use crate::core::event::Event;
use crate::core::gfx::Canvas;

//=== Constants ===========================================================

/// Capacity of the platform → loop event channel. A frame's worth of
/// input is far below this; the bound only guards a stalled loop thread.
const EVENT_CHANNEL_CAPACITY: usize = 256;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal - if the event loop can't be created,
/// the game cannot open a window.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Channel =============================================================

/// Creates the platform → backend pair: run the [`WinitPlatform`] on the
/// main thread, hand the [`WinitBackend`] to the game loop.
pub fn winit_pair(title: &str, width: u32, height: u32) -> (WinitPlatform, WinitBackend) {
    let (sender, receiver) = crossbeam_channel::bounded(EVENT_CHANNEL_CAPACITY);
    (
        WinitPlatform::new(title, width, height, sender),
        WinitBackend::new(receiver),
    )
}

//=== WinitPlatform =======================================================

/// Window manager and input relay.
///
/// Runs on the main thread (Winit requirement on macOS/iOS) and sends
/// engine events to the game loop via MPSC channel.
///
/// # Lifecycle
///
/// 1. **Construction**: `winit_pair(..)` - pairs platform and backend
/// 2. **Execution**: `platform.run()` - starts event loop (never returns)
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: User closes window → sends `Event::Quit` → exits
///
/// # Thread Safety
///
/// This type is NOT Send/Sync - it must remain on the main thread.
/// Communication with the loop occurs exclusively via the MPSC sender.
pub struct WinitPlatform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Channel to send events to the game loop.
    event_sender: Sender<Event>,

    /// Last reported cursor position, stamped onto button events.
    cursor: (i32, i32),

    title: String,
    width: u32,
    height: u32,
}

impl WinitPlatform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance with the given event sender.
    ///
    /// Does not create the window yet - that happens lazily in
    /// `resumed()`.
    pub fn new(title: &str, width: u32, height: u32, event_sender: Sender<Event>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            event_sender,
            cursor: (0, 0),
            title: title.to_string(),
            width,
            height,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Starts the event loop (never returns normally).
    ///
    /// Blocks forever running the Winit event loop; only returns if the
    /// loop cannot be created or fails internally.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] on event loop creation or execution
    /// failure.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit
    /// requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends one event to the loop thread.
    ///
    /// If the channel is disconnected (loop thread panicked or exited
    /// early), logs a warning and drops the event so the window can still
    /// close normally.
    fn send(&self, event: Event) {
        if self.event_sender.try_send(event).is_err() {
            warn!(target: "platform::input", "Channel unavailable, dropping {:?}", event);
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WinitPlatform {
    /// Called when the app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                // Notify the loop of the fatal error
                self.send(Event::Quit);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send(Event::Quit);
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as i32, position.y as i32);
                self.send(Event::MouseMoved {
                    x: self.cursor.0,
                    y: self.cursor.1,
                });
            }

            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                self.send(event_mapper::map_key(
                    key_event.physical_key,
                    key_event.state,
                ));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.send(event_mapper::map_mouse_button(button, state, self.cursor));
            }

            WindowEvent::RedrawRequested => {
                // Keep the pump alive so input latency stays bounded.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Resized, Focused, etc. (not needed for input)
            }
        }
    }
}

//=== WinitBackend ========================================================

/// The loop-side half of the winit bridge.
///
/// Drains relayed events each tick; when the platform side disappears it
/// synthesizes a single [`Event::Quit`] so the loop winds down instead
/// of spinning on a dead channel.
pub struct WinitBackend {
    receiver: Receiver<Event>,
    disconnected: bool,
}

impl WinitBackend {
    pub fn new(receiver: Receiver<Event>) -> Self {
        Self {
            receiver,
            disconnected: false,
        }
    }
}

impl Backend for WinitBackend {
    fn create_canvas(&mut self, width: u32, height: u32, title: &str) -> Canvas {
        debug!(target: "platform", "Canvas created for '{}' ({}x{})", title, width, height);
        Canvas::new(width, height)
    }

    fn poll_events(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        warn!(target: "platform", "Platform channel disconnected; quitting");
                        self.disconnected = true;
                        events.push(Event::Quit);
                    }
                    break;
                }
            }
        }
        events
    }

    fn present(&mut self, _canvas: &Canvas) {
        // Surface upload is the renderer's concern; nothing to flip here.
    }

    fn clock(&self) -> Box<dyn Clock> {
        Box::new(SystemClock::new())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
