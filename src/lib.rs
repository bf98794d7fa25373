//=========================================================================
// Umbra Engine — Library Root
//
// This crate defines the public API surface of the Umbra Engine.
//
// Responsibilities:
// - Expose the game loop facade (`Game`, `GameBuilder`)
// - Expose the engine core (objects, signals, widgets, scenes)
// - Keep the winit integration in its own `platform` module so the
//   core stays backend-agnostic
//
// Typical usage:
// ```no_run
// use umbra_engine::GameBuilder;
// use umbra_engine::backend::HeadlessBackend;
// use umbra_engine::core::scene::registry::SceneDecl;
// use umbra_engine::core::scene::{Scene, SceneBase};
//
// struct MenuScene { base: SceneBase }
// impl Scene for MenuScene {
//     fn base(&self) -> &SceneBase { &self.base }
//     fn base_mut(&mut self) -> &mut SceneBase { &mut self.base }
// }
//
// let mut game = GameBuilder::new()
//     .with_window(800, 600, "My Game")
//     .with_backend(Box::new(HeadlessBackend::new()))
//     .with_scene(SceneDecl::new("menu_scene", |canvas, env| {
//         Box::new(MenuScene { base: SceneBase::new("MenuScene", canvas, env) })
//     }))
//     .build()
//     .unwrap();
//
// game.run().unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all engine systems and logic (objects, signals, the
// widget tree, scenes). `backend` holds the collaborator interface the
// loop drives, plus a headless implementation for tests and embedding.
// `platform` contains the winit window/input adapter.
//
pub mod backend;
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `game` defines the scene-registry game loop and its builder.
//
mod game;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the loop types as the main entry points for applications.
//
pub use game::{Game, GameBuilder, GameError, GameHandle};
