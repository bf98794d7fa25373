//=========================================================================
// Prelude
//
// One-stop import for game code:
//
// ```
// use umbra_engine::prelude::*;
// ```
//
//=========================================================================

pub use crate::backend::{Backend, HeadlessBackend};
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::env::GlobalEnv;
pub use crate::core::event::{Event, KeyCode, MouseButton};
pub use crate::core::gfx::{Canvas, Image, Mask, Point, Rect, Rgba};
pub use crate::core::object::{GameObject, ObjectError, ObjectId, Tag, TagSpec};
pub use crate::core::scene::{
    RegistryError, Scene, SceneBase, SceneCommand, SceneDecl, SceneRegistry, QUIT_GAME,
};
pub use crate::core::signal::{Signal, SignalError, SignalTable};
pub use crate::core::widget::{Button, Occluder, Sprite, StaticWidget, Widget, WidgetBase};
pub use crate::platform::{winit_pair, PlatformError, WinitBackend, WinitPlatform};
pub use crate::{Game, GameBuilder, GameError, GameHandle};
