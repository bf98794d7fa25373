//=========================================================================
// Scene Lifecycle
//=========================================================================
//
// One scene is one self-contained game state (a menu, a level) with a
// bounded lifecycle:
//
//   Idle ──start_scene──▶ Running ──is_valid=false──▶ Ended
//
// While Running, the game loop ticks the scene: process every pending
// input event, update, draw. When the scene invalidates itself the loop
// calls `end_scene`, whose returned command tells the loop whether to
// quit the game or switch scenes.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

//=== Internal Dependencies ===============================================

use crate::core::env::GlobalEnv;
use crate::core::event::Event;
use crate::core::gfx::Canvas;
use crate::core::object::GameObject;

//=== Module Declarations =================================================

pub mod registry;

pub use registry::{RegistryError, SceneDecl, SceneRegistry};

//=== SceneCommand ========================================================

/// The transition command a scene returns from `end_scene` — the sole
/// contract between a scene and the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneCommand {
    /// Stop the whole game.
    QuitGame,

    /// Switch to the named scene. The scene that just ended is
    /// reconstructed before the switch, so its state never leaks into the
    /// next visit.
    ChangeScene(String),
}

//=== SceneBase ===========================================================

/// Channel a scene emits when ending because the player quit.
pub const QUIT_GAME: &str = "quit_game";

/// The state every scene carries: entity identity, the shared canvas,
/// the global environment, the frame-rate target, validity and quit
/// flags, and a clock baseline for elapsed-time queries.
///
/// The frame rate is read from the environment once at construction and
/// is immutable afterwards.
pub struct SceneBase {
    object: GameObject,
    canvas: Rc<RefCell<Canvas>>,
    env: Rc<GlobalEnv>,
    frame_rate: u32,
    is_valid: bool,
    quit: bool,
    started_at: Instant,
}

impl SceneBase {
    //--- Construction -----------------------------------------------------

    /// Creates the base. The entity name is `<name>_<id>` so every live
    /// instance is distinguishable across reinitializations.
    pub fn new(name: &str, canvas: Rc<RefCell<Canvas>>, env: Rc<GlobalEnv>) -> Self {
        let mut object = GameObject::with_unique_name(name);
        object.signals_mut().declare::<()>(QUIT_GAME);

        let frame_rate = env.frame_rate();
        Self {
            object,
            canvas,
            env,
            frame_rate,
            is_valid: true,
            quit: false,
            started_at: Instant::now(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn object(&self) -> &GameObject {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut GameObject {
        &mut self.object
    }

    pub fn canvas(&self) -> &Rc<RefCell<Canvas>> {
        &self.canvas
    }

    pub fn env(&self) -> &Rc<GlobalEnv> {
        &self.env
    }

    /// Target frames per second, fixed at construction.
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// While true, the inner tick loop continues.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Invalidating ends the scene at the top of the next tick; scenes
    /// wanting a transition clear this and return a command from
    /// `end_scene`.
    pub fn set_valid(&mut self, valid: bool) {
        self.is_valid = valid;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Marks the scene as quitting and invalidates it.
    pub fn request_quit(&mut self) {
        self.quit = true;
        self.is_valid = false;
    }

    //--- Clock ------------------------------------------------------------

    /// Resets the scene clock; the loop does this on every scene entry.
    pub fn reset_clock(&mut self) {
        self.started_at = Instant::now();
    }

    /// Time since the scene clock was last reset.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    //--- Default Hook Bodies ----------------------------------------------

    /// Default event handling: a terminate-window event requests quit.
    /// This is the sole built-in way to leave Running.
    pub fn default_process_event(&mut self, event: &Event) {
        if matches!(event, Event::Quit) {
            self.request_quit();
        }
    }

    /// Default end-of-life: a quitting scene announces `quit_game` and
    /// commands the loop to stop; a scene that merely invalidated itself
    /// returns no command (its override is expected to supply one).
    pub fn default_end_scene(&mut self) -> Option<SceneCommand> {
        if self.quit {
            self.object
                .signals()
                .emit(QUIT_GAME, &())
                .expect("quit_game channel declared at construction");
            return Some(SceneCommand::QuitGame);
        }
        None
    }
}

//=== Scene Trait =========================================================

/// One game state with a bounded lifecycle.
///
/// Concrete scenes embed a [`SceneBase`] and override the hooks they
/// need; every default delegates to the base. A scene owns its whole
/// widget subtree — widgets never outlive their scene.
pub trait Scene {
    fn base(&self) -> &SceneBase;

    fn base_mut(&mut self) -> &mut SceneBase;

    /// Called once on every entry into Running, after the clock reset.
    fn start_scene(&mut self) {}

    /// Called for every pending input event, each tick.
    fn process_event(&mut self, event: &Event) {
        self.base_mut().default_process_event(event);
    }

    /// Per-tick state update, after events.
    fn update_scene(&mut self) {}

    /// Per-tick paint, after update. The loop presents the canvas
    /// afterwards.
    fn draw(&mut self) {}

    /// Called once when the scene leaves Running; the returned command
    /// drives the loop's transition decision.
    fn end_scene(&mut self) -> Option<SceneCommand> {
        self.base_mut().default_end_scene()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct BareScene {
        base: SceneBase,
    }

    impl BareScene {
        fn new() -> Self {
            let canvas = Rc::new(RefCell::new(Canvas::new(8, 8)));
            let env = Rc::new(GlobalEnv::new());
            Self {
                base: SceneBase::new("bare", canvas, env),
            }
        }
    }

    impl Scene for BareScene {
        fn base(&self) -> &SceneBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SceneBase {
            &mut self.base
        }
    }

    #[test]
    fn frame_rate_comes_from_the_environment() {
        let canvas = Rc::new(RefCell::new(Canvas::new(8, 8)));

        let default_env = Rc::new(GlobalEnv::new());
        let base = SceneBase::new("a", Rc::clone(&canvas), default_env);
        assert_eq!(base.frame_rate(), 60);

        let mut env = GlobalEnv::new();
        env.insert("frame_rate", 30u32);
        let base = SceneBase::new("b", canvas, Rc::new(env));
        assert_eq!(base.frame_rate(), 30);
    }

    #[test]
    fn scene_names_are_unique_per_instance() {
        let a = BareScene::new();
        let b = BareScene::new();
        assert_ne!(a.base().object().name(), b.base().object().name());
    }

    #[test]
    fn quit_event_invalidates_the_scene() {
        let mut scene = BareScene::new();
        assert!(scene.base().is_valid());

        scene.process_event(&Event::Quit);

        assert!(!scene.base().is_valid());
        assert!(scene.base().quit_requested());
    }

    #[test]
    fn non_quit_events_leave_the_scene_running() {
        let mut scene = BareScene::new();
        scene.process_event(&Event::MouseMoved { x: 1, y: 1 });
        assert!(scene.base().is_valid());
    }

    #[test]
    fn quitting_scene_emits_and_commands_quit() {
        let mut scene = BareScene::new();

        let announced = Rc::new(Cell::new(false));
        let a = announced.clone();
        scene
            .base()
            .object()
            .signals()
            .connect(QUIT_GAME, "observer", move |_: &()| a.set(true))
            .unwrap();

        scene.process_event(&Event::Quit);
        let command = scene.end_scene();

        assert_eq!(command, Some(SceneCommand::QuitGame));
        assert!(announced.get());
    }

    #[test]
    fn invalidation_without_quit_yields_no_command() {
        let mut scene = BareScene::new();
        scene.base_mut().set_valid(false);
        assert_eq!(scene.end_scene(), None);
    }
}
