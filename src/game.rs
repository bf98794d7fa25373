//=========================================================================
// Game Loop
//=========================================================================
//
// The scene-registry game loop: fetch the current scene, run its tick
// loop until it invalidates itself, then dispatch on the transition
// command it returns.
//
// ```text
// while !game_over:
//   scene = registry[current]
//   scene.reset_clock(); scene.start_scene()
//   while scene.is_valid:
//     clock.tick(scene.frame_rate)
//     for event in backend.poll_events(): scene.process_event(event)
//     scene.update_scene(); scene.draw(); backend.present(canvas)
//   match scene.end_scene():
//     QuitGame          → game_over = true
//     ChangeScene(next) → reinitialize current, switch to next
//     (no command)      → error: the scene ended without saying why
// ```
//
// The registry's live instances only ever change between ticks, at
// transition boundaries — never inside the inner loop.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

//=== External Crates =====================================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::backend::{Backend, HeadlessBackend};
use crate::core::clock::Clock;
use crate::core::env::GlobalEnv;
use crate::core::gfx::Canvas;
use crate::core::scene::{RegistryError, Scene, SceneCommand, SceneDecl, SceneRegistry, QUIT_GAME};

//=== GameError ===========================================================

/// Errors from game construction and the main loop.
#[derive(Debug)]
pub enum GameError {
    /// The scene registry could not be assembled.
    Registry(RegistryError),

    /// The loop was pointed at a scene name that is not registered.
    SceneNotFound(String),

    /// A scene ended without quitting and without naming a successor.
    /// The loop fails loudly here instead of spinning forever.
    MissingCommand(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(e) => write!(f, "scene registry error: {}", e),
            Self::SceneNotFound(name) => write!(f, "no scene named '{}'", name),
            Self::MissingCommand(name) => {
                write!(f, "scene '{}' ended without a transition command", name)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegistryError> for GameError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::SceneNotFound(name) => Self::SceneNotFound(name),
            other => Self::Registry(other),
        }
    }
}

//=== GameHandle ==========================================================

/// The handle scenes find in the global environment under `"root"`:
/// window metadata plus a way to flag the whole game for shutdown.
#[derive(Clone)]
pub struct GameHandle {
    title: String,
    window_size: (u32, u32),
    game_over: Rc<Cell<bool>>,
}

impl GameHandle {
    pub fn window_title(&self) -> &str {
        &self.title
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.get()
    }

    /// Ends the outer loop after the current scene finishes.
    pub fn request_quit(&self) {
        self.game_over.set(true);
    }
}

//=== GameBuilder =========================================================

/// Assembles a [`Game`]: window parameters, scene declarations, global
/// environment entries, and the backend.
///
/// Without an explicit backend the game runs headless; windowed games
/// pass the loop half of [`crate::platform::winit_pair`].
pub struct GameBuilder {
    title: String,
    width: u32,
    height: u32,
    frame_rate: Option<u32>,
    globals: Vec<(String, Rc<dyn Any>)>,
    decls: Vec<SceneDecl>,
    first_scene: Option<String>,
    backend: Option<Box<dyn Backend>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            title: "Umbra Game".to_string(),
            width: 800,
            height: 600,
            frame_rate: None,
            globals: Vec::new(),
            decls: Vec::new(),
            first_scene: None,
            backend: None,
        }
    }

    /// Window size and title.
    pub fn with_window(mut self, width: u32, height: u32, title: &str) -> Self {
        self.width = width;
        self.height = height;
        self.title = title.to_string();
        self
    }

    /// Target frame rate for every scene (the environment's
    /// `"frame_rate"` entry; scenes read it once at construction).
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }

    /// Adds a caller-supplied global environment entry. Entries land
    /// after the built-ins, so callers can override them.
    pub fn with_global<T: Any>(mut self, name: &str, value: T) -> Self {
        self.globals.push((name.to_string(), Rc::new(value)));
        self
    }

    /// Declares one scene.
    pub fn with_scene(mut self, decl: SceneDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Names the scene the loop starts on; unknown names fall back to
    /// the registry's default ordering (logged, not fatal).
    pub fn with_first_scene(mut self, name: &str) -> Self {
        self.first_scene = Some(name.to_string());
        self
    }

    /// The platform backend driving events and presentation.
    pub fn with_backend(mut self, backend: Box<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Builds the game: creates the canvas, assembles the environment,
    /// constructs every scene, and wires their quit channels to the
    /// loop's shutdown flag.
    ///
    /// # Errors
    ///
    /// [`GameError::Registry`] when the scene table cannot be built.
    pub fn build(self) -> Result<Game, GameError> {
        let mut backend = self
            .backend
            .unwrap_or_else(|| Box::new(HeadlessBackend::new()));

        let canvas = Rc::new(RefCell::new(backend.create_canvas(
            self.width,
            self.height,
            &self.title,
        )));
        let clock = backend.clock();

        let game_over = Rc::new(Cell::new(false));

        let mut env = GlobalEnv::new();
        env.insert(
            "root",
            GameHandle {
                title: self.title,
                window_size: (self.width, self.height),
                game_over: Rc::clone(&game_over),
            },
        );
        if let Some(frame_rate) = self.frame_rate {
            env.insert("frame_rate", frame_rate);
        }
        for (name, value) in self.globals {
            env.insert_shared(name, value);
        }
        let env = Rc::new(env);

        let registry = SceneRegistry::build(
            self.decls,
            Rc::clone(&canvas),
            Rc::clone(&env),
            self.first_scene.as_deref(),
        )?;

        for scene in registry.scenes() {
            wire_quit(scene, &game_over);
        }

        let current = registry.first_scene().to_string();
        info!("game assembled; {} scene(s), starting at '{}'",
            registry.names().count(), current);

        Ok(Game {
            registry,
            backend,
            clock,
            canvas,
            env,
            game_over,
            current,
        })
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscribes the loop's shutdown flag to a scene's `quit_game` channel.
fn wire_quit(scene: &dyn Scene, game_over: &Rc<Cell<bool>>) {
    let flag = Rc::clone(game_over);
    scene
        .base()
        .object()
        .signals()
        .connect(QUIT_GAME, "game_loop", move |_: &()| flag.set(true))
        .expect("quit_game channel declared by SceneBase");
}

//=== Game ================================================================

/// The assembled game: registry, backend, clock, canvas, environment.
///
/// `run` drives everything; a clean quit returns `Ok(())` (the process
/// exit code is the caller's concern).
pub struct Game {
    registry: SceneRegistry,
    backend: Box<dyn Backend>,
    clock: Box<dyn Clock>,
    canvas: Rc<RefCell<Canvas>>,
    env: Rc<GlobalEnv>,
    game_over: Rc<Cell<bool>>,
    current: String,
}

impl Game {
    //--- Accessors --------------------------------------------------------

    pub fn env(&self) -> &Rc<GlobalEnv> {
        &self.env
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// Name of the scene the loop will (re)enter next.
    pub fn current_scene(&self) -> &str {
        &self.current
    }

    //--- Main Loop --------------------------------------------------------

    /// Runs the game until a scene commands `QuitGame` (or something
    /// requests shutdown through its [`GameHandle`]).
    ///
    /// # Errors
    ///
    /// [`GameError::SceneNotFound`] when the current scene name is not
    /// registered, and [`GameError::MissingCommand`] when a scene ends
    /// without quitting and without naming a successor.
    pub fn run(&mut self) -> Result<(), GameError> {
        info!("entering game loop at scene '{}'", self.current);

        while !self.game_over.get() {
            let scene = self.registry.scene_mut(&self.current)?;
            scene.base_mut().reset_clock();
            scene.start_scene();

            let frame_rate = scene.base().frame_rate();
            while scene.base().is_valid() {
                self.clock.tick(frame_rate);
                for event in self.backend.poll_events() {
                    scene.process_event(&event);
                }
                scene.update_scene();
                scene.draw();
                self.backend.present(&self.canvas.borrow());
            }

            match scene.end_scene() {
                Some(SceneCommand::QuitGame) => {
                    debug!("scene '{}' commanded quit", self.current);
                    self.game_over.set(true);
                }
                Some(SceneCommand::ChangeScene(next)) => {
                    debug!("scene '{}' commanded change to '{}'", self.current, next);
                    // Rebuild the scene that just ended so its state never
                    // leaks into a later visit, then rewire its quit channel.
                    let fresh = self.registry.reinitialize(&self.current)?;
                    wire_quit(fresh, &self.game_over);
                    self.current = next;
                }
                None => {
                    return Err(GameError::MissingCommand(self.current.clone()));
                }
            }
        }

        info!("game loop finished");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::Event;
    use crate::core::scene::SceneBase;

    //--- Test Scenes ------------------------------------------------------

    /// Ends itself on the first update and commands quit.
    struct QuitScene {
        base: SceneBase,
    }

    impl Scene for QuitScene {
        fn base(&self) -> &SceneBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SceneBase {
            &mut self.base
        }

        fn update_scene(&mut self) {
            self.base.request_quit();
        }
    }

    fn quit_decl(stem: &'static str) -> SceneDecl {
        SceneDecl::new(stem, move |canvas, env| {
            Box::new(QuitScene {
                base: SceneBase::new(stem, canvas, env),
            })
        })
    }

    /// Ends itself on the first update and changes to `target`.
    struct HopScene {
        base: SceneBase,
        target: &'static str,
    }

    impl Scene for HopScene {
        fn base(&self) -> &SceneBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SceneBase {
            &mut self.base
        }

        fn update_scene(&mut self) {
            self.base.set_valid(false);
        }

        fn end_scene(&mut self) -> Option<SceneCommand> {
            self.base
                .default_end_scene()
                .or(Some(SceneCommand::ChangeScene(self.target.to_string())))
        }
    }

    fn hop_decl(stem: &'static str, target: &'static str) -> SceneDecl {
        SceneDecl::new(stem, move |canvas, env| {
            Box::new(HopScene {
                base: SceneBase::new(stem, canvas, env),
                target,
            })
        })
    }

    /// Ends itself without ever producing a command.
    struct StallScene {
        base: SceneBase,
    }

    impl Scene for StallScene {
        fn base(&self) -> &SceneBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SceneBase {
            &mut self.base
        }

        fn update_scene(&mut self) {
            self.base.set_valid(false);
        }
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn quitting_scene_ends_the_run_cleanly() {
        let mut game = GameBuilder::new()
            .with_scene(quit_decl("exit_scene"))
            .build()
            .unwrap();

        assert!(game.run().is_ok());
    }

    #[test]
    fn root_handle_carries_window_metadata() {
        let game = GameBuilder::new()
            .with_window(320, 240, "Handle Test")
            .with_scene(quit_decl("exit_scene"))
            .build()
            .unwrap();

        let handle = game.env().get::<GameHandle>("root").unwrap();
        assert_eq!(handle.window_title(), "Handle Test");
        assert_eq!(handle.window_size(), (320, 240));
        assert!(!handle.is_game_over());
    }

    #[test]
    fn frame_rate_flows_into_scenes() {
        let mut game = GameBuilder::new()
            .with_frame_rate(30)
            .with_scene(quit_decl("exit_scene"))
            .build()
            .unwrap();

        {
            let scene = game.registry.scene_mut("ExitScene").unwrap();
            assert_eq!(scene.base().frame_rate(), 30);
        }
        assert!(game.run().is_ok());
    }

    #[test]
    fn quit_event_from_the_backend_ends_the_game() {
        let backend = HeadlessBackend::with_script(vec![vec![Event::Quit]]);
        let stats = backend.stats();

        // This scene never ends itself; only the scripted Quit stops it.
        struct IdleScene {
            base: SceneBase,
        }
        impl Scene for IdleScene {
            fn base(&self) -> &SceneBase {
                &self.base
            }
            fn base_mut(&mut self) -> &mut SceneBase {
                &mut self.base
            }
        }

        let mut game = GameBuilder::new()
            .with_backend(Box::new(backend))
            .with_scene(SceneDecl::new("idle_scene", |canvas, env| {
                Box::new(IdleScene {
                    base: SceneBase::new("idle", canvas, env),
                })
            }))
            .build()
            .unwrap();

        assert!(game.run().is_ok());
        assert_eq!(stats.borrow().presents, 1);
    }

    #[test]
    fn change_scene_switches_and_replaces_the_old_instance() {
        let mut game = GameBuilder::new()
            .with_scene(hop_decl("alpha_scene", "OmegaScene"))
            .with_scene(quit_decl("omega_scene"))
            .with_first_scene("AlphaScene")
            .build()
            .unwrap();

        let before = game
            .registry
            .scene_mut("AlphaScene")
            .unwrap()
            .base()
            .object()
            .id();

        assert!(game.run().is_ok());
        assert_eq!(game.current_scene(), "OmegaScene");

        let after = game
            .registry
            .scene_mut("AlphaScene")
            .unwrap()
            .base()
            .object()
            .id();
        assert_ne!(before, after, "exited scene must be rebuilt fresh");
    }

    #[test]
    fn reinitialized_scene_keeps_its_quit_wiring() {
        // Alpha and Omega hop back and forth; the second Alpha visit runs
        // a fresh instance and signals quit_game without returning the
        // QuitGame command, so the game only stops if the loop rewired the
        // reinitialized instance's channel to its shutdown flag.
        struct CountedScene {
            base: SceneBase,
            target: &'static str,
            visits: Rc<Cell<u32>>,
        }

        impl Scene for CountedScene {
            fn base(&self) -> &SceneBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut SceneBase {
                &mut self.base
            }

            fn update_scene(&mut self) {
                self.visits.set(self.visits.get() + 1);
                if self.visits.get() == 3 {
                    self.base
                        .object()
                        .signals()
                        .emit(QUIT_GAME, &())
                        .unwrap();
                }
                // Safety net so a broken wiring fails the assertion below
                // instead of hanging the test.
                if self.visits.get() >= 6 {
                    self.base.request_quit();
                    return;
                }
                self.base.set_valid(false);
            }

            fn end_scene(&mut self) -> Option<SceneCommand> {
                self.base
                    .default_end_scene()
                    .or(Some(SceneCommand::ChangeScene(self.target.to_string())))
            }
        }

        fn counted_decl(
            stem: &'static str,
            target: &'static str,
            visits: &Rc<Cell<u32>>,
        ) -> SceneDecl {
            let visits = Rc::clone(visits);
            SceneDecl::new(stem, move |canvas, env| {
                Box::new(CountedScene {
                    base: SceneBase::new(stem, canvas, env),
                    target,
                    visits: Rc::clone(&visits),
                })
            })
        }

        let visits = Rc::new(Cell::new(0u32));
        let mut game = GameBuilder::new()
            .with_scene(counted_decl("alpha_scene", "OmegaScene", &visits))
            .with_scene(counted_decl("omega_scene", "AlphaScene", &visits))
            .with_first_scene("AlphaScene")
            .build()
            .unwrap();

        assert!(game.run().is_ok());
        // Visit 3 is the reinitialized Alpha: its signal must have reached
        // the loop, ending the run right there.
        assert_eq!(visits.get(), 3);
    }

    #[test]
    fn scene_ending_without_a_command_is_an_error() {
        let mut game = GameBuilder::new()
            .with_scene(SceneDecl::new("stall_scene", |canvas, env| {
                Box::new(StallScene {
                    base: SceneBase::new("stall", canvas, env),
                })
            }))
            .build()
            .unwrap();

        assert!(matches!(game.run(), Err(GameError::MissingCommand(name)) if name == "StallScene"));
    }

    #[test]
    fn change_to_an_unknown_scene_fails() {
        let mut game = GameBuilder::new()
            .with_scene(hop_decl("alpha_scene", "GhostScene"))
            .build()
            .unwrap();

        assert!(matches!(
            game.run(),
            Err(GameError::SceneNotFound(name)) if name == "GhostScene"
        ));
    }

    #[test]
    fn registry_failure_surfaces_at_build() {
        let result = GameBuilder::new()
            .with_scene(quit_decl("not-a-valid-stem"))
            .build();
        assert!(matches!(result, Err(GameError::Registry(_))));
    }

    #[test]
    fn empty_builder_fails_to_build() {
        assert!(matches!(
            GameBuilder::new().build(),
            Err(GameError::Registry(RegistryError::Configuration(_)))
        ));
    }
}
