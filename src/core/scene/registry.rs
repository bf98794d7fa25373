//=========================================================================
// Scene Registry
//=========================================================================
//
// The name → scene table the game loop runs against.
//
// Scenes are declared statically: each declaration pairs a snake-case
// stem (`menu_scene`) with a factory closure. The registry derives the
// scene's public name from the stem (`menu_scene` → `MenuScene`),
// validates the naming convention, builds one live instance per
// declaration, and can rebuild a single instance on demand so scene
// state never leaks across visits.
//
// Construction is all-or-nothing: one bad declaration and the registry
// refuses to start rather than run with a partial scene table.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

//=== External Crates =====================================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::env::GlobalEnv;
use crate::core::gfx::Canvas;

use super::Scene;

//=== Constants ===========================================================

/// Required suffix of every scene stem.
const STEM_SUFFIX: &str = "_scene";

//=== RegistryError =======================================================

/// Errors from registry construction and scene lookup.
#[derive(Debug)]
pub enum RegistryError {
    /// A declaration's stem violates the `<snake_case>_scene` convention.
    InvalidScene { stem: String, reason: String },

    /// Two declarations resolve to the same scene name.
    DuplicateScene(String),

    /// The registry cannot be assembled (e.g. no scenes declared).
    Configuration(String),

    /// No scene registered under the requested name.
    SceneNotFound(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScene { stem, reason } => {
                write!(f, "invalid scene declaration '{}': {}", stem, reason)
            }
            Self::DuplicateScene(name) => write!(f, "scene '{}' declared twice", name),
            Self::Configuration(msg) => write!(f, "registry configuration error: {}", msg),
            Self::SceneNotFound(name) => write!(f, "no scene named '{}'", name),
        }
    }
}

impl std::error::Error for RegistryError {}

//=== SceneDecl ===========================================================

/// Factory building a fresh scene instance over the shared canvas and
/// environment.
pub type SceneFactory = Box<dyn Fn(Rc<RefCell<Canvas>>, Rc<GlobalEnv>) -> Box<dyn Scene>>;

/// One static scene declaration: a snake-case stem plus the factory.
///
/// The stem must end in `_scene`; the registry derives the public scene
/// name from it (`pause_menu_scene` → `PauseMenuScene`).
pub struct SceneDecl {
    stem: &'static str,
    factory: SceneFactory,
}

impl SceneDecl {
    pub fn new(
        stem: &'static str,
        factory: impl Fn(Rc<RefCell<Canvas>>, Rc<GlobalEnv>) -> Box<dyn Scene> + 'static,
    ) -> Self {
        Self {
            stem,
            factory: Box::new(factory),
        }
    }

    pub fn stem(&self) -> &'static str {
        self.stem
    }
}

//--- Stem Validation ------------------------------------------------------

/// Checks the `<snake_case>_scene` convention: lowercase words separated
/// by single underscores, a non-empty prefix, the `_scene` suffix.
fn validate_stem(stem: &str) -> Result<(), RegistryError> {
    let invalid = |reason: &str| RegistryError::InvalidScene {
        stem: stem.to_string(),
        reason: reason.to_string(),
    };

    if !stem.ends_with(STEM_SUFFIX) {
        return Err(invalid("stem must end with '_scene'"));
    }
    if stem.len() == STEM_SUFFIX.len() {
        return Err(invalid("stem needs a name before '_scene'"));
    }

    for part in stem.split('_') {
        if part.is_empty() {
            return Err(invalid("empty word between underscores"));
        }
        if !part
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(invalid("words must be lowercase ascii or digits"));
        }
    }

    Ok(())
}

/// Derives the public scene name: `menu_scene` → `MenuScene`.
fn derive_name(stem: &str) -> String {
    stem.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

//=== SceneRegistry =======================================================

struct SceneEntry {
    factory: SceneFactory,
    scene: Box<dyn Scene>,
}

/// The live name → scene table, plus the factories to rebuild entries.
pub struct SceneRegistry {
    entries: HashMap<String, SceneEntry>,
    first: String,
    canvas: Rc<RefCell<Canvas>>,
    env: Rc<GlobalEnv>,
}

impl SceneRegistry {
    //--- Construction -----------------------------------------------------

    /// Validates every declaration, then builds one live instance per
    /// scene.
    ///
    /// The first scene is `first_override` when that name exists;
    /// otherwise (logged, not fatal) the case-insensitively smallest
    /// scene name.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidScene`] on a convention violation,
    /// [`RegistryError::DuplicateScene`] on a name collision, and
    /// [`RegistryError::Configuration`] when no scenes are declared. Any
    /// failure registers nothing.
    pub fn build(
        decls: Vec<SceneDecl>,
        canvas: Rc<RefCell<Canvas>>,
        env: Rc<GlobalEnv>,
        first_override: Option<&str>,
    ) -> Result<Self, RegistryError> {
        if decls.is_empty() {
            return Err(RegistryError::Configuration(
                "no scenes declared".to_string(),
            ));
        }

        let mut names = Vec::with_capacity(decls.len());
        for decl in &decls {
            validate_stem(decl.stem)?;
            let name = derive_name(decl.stem);
            if names.contains(&name) {
                return Err(RegistryError::DuplicateScene(name));
            }
            names.push(name);
        }

        let mut entries = HashMap::with_capacity(decls.len());
        for (decl, name) in decls.into_iter().zip(names.iter()) {
            let scene = (decl.factory)(Rc::clone(&canvas), Rc::clone(&env));
            debug!("registered scene '{}' (stem '{}')", name, decl.stem);
            entries.insert(
                name.clone(),
                SceneEntry {
                    factory: decl.factory,
                    scene,
                },
            );
        }

        let first = match first_override {
            Some(requested) if entries.contains_key(requested) => requested.to_string(),
            Some(requested) => {
                let fallback = default_first(&names);
                warn!(
                    "first scene override '{}' not registered; falling back to '{}'",
                    requested, fallback
                );
                fallback
            }
            None => default_first(&names),
        };

        Ok(Self {
            entries,
            first,
            canvas,
            env,
        })
    }

    //--- Accessors --------------------------------------------------------

    /// Name of the scene the loop starts on.
    pub fn first_scene(&self) -> &str {
        &self.first
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered scene names (order unspecified).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The live instances, for wiring cross-cutting subscriptions.
    pub fn scenes(&self) -> impl Iterator<Item = &dyn Scene> {
        self.entries.values().map(|entry| entry.scene.as_ref())
    }

    /// The live instance registered under `name`.
    pub fn scene_mut(&mut self, name: &str) -> Result<&mut dyn Scene, RegistryError> {
        match self.entries.get_mut(name) {
            Some(entry) => Ok(entry.scene.as_mut()),
            None => Err(RegistryError::SceneNotFound(name.to_string())),
        }
    }

    //--- Reinitialization -------------------------------------------------

    /// Discards the live instance under `name` and builds a fresh one
    /// from its factory, returning the new instance so callers can rewire
    /// subscriptions.
    pub fn reinitialize(&mut self, name: &str) -> Result<&mut dyn Scene, RegistryError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| RegistryError::SceneNotFound(name.to_string()))?;

        debug!("reinitializing scene '{}'", name);
        entry.scene = (entry.factory)(Rc::clone(&self.canvas), Rc::clone(&self.env));
        Ok(entry.scene.as_mut())
    }
}

/// Case-insensitively smallest scene name.
fn default_first(names: &[String]) -> String {
    names
        .iter()
        .min_by_key(|name| name.to_lowercase())
        .cloned()
        .unwrap_or_default()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneBase;

    struct StubScene {
        base: SceneBase,
    }

    impl Scene for StubScene {
        fn base(&self) -> &SceneBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SceneBase {
            &mut self.base
        }
    }

    fn decl(stem: &'static str) -> SceneDecl {
        SceneDecl::new(stem, move |canvas, env| {
            Box::new(StubScene {
                base: SceneBase::new(stem, canvas, env),
            })
        })
    }

    fn build(
        decls: Vec<SceneDecl>,
        first_override: Option<&str>,
    ) -> Result<SceneRegistry, RegistryError> {
        let canvas = Rc::new(RefCell::new(Canvas::new(8, 8)));
        let env = Rc::new(GlobalEnv::new());
        SceneRegistry::build(decls, canvas, env, first_override)
    }

    #[test]
    fn derives_pascal_case_names() {
        assert_eq!(derive_name("menu_scene"), "MenuScene");
        assert_eq!(derive_name("pause_menu_scene"), "PauseMenuScene");
    }

    #[test]
    fn builds_one_instance_per_declaration() {
        let registry = build(vec![decl("menu_scene"), decl("arena_scene")], None).unwrap();

        assert!(registry.contains("MenuScene"));
        assert!(registry.contains("ArenaScene"));
        assert_eq!(registry.names().count(), 2);
    }

    #[test]
    fn first_scene_defaults_to_case_insensitive_minimum() {
        let registry = build(vec![decl("menu_scene"), decl("arena_scene")], None).unwrap();
        assert_eq!(registry.first_scene(), "ArenaScene");
    }

    #[test]
    fn first_scene_override_wins_when_registered() {
        let registry =
            build(vec![decl("menu_scene"), decl("arena_scene")], Some("MenuScene")).unwrap();
        assert_eq!(registry.first_scene(), "MenuScene");
    }

    #[test]
    fn missing_override_falls_back_to_default_order() {
        let registry =
            build(vec![decl("menu_scene"), decl("arena_scene")], Some("BossScene")).unwrap();
        assert_eq!(registry.first_scene(), "ArenaScene");
    }

    #[test]
    fn stem_without_suffix_is_invalid() {
        let result = build(vec![decl("menu")], None);
        assert!(matches!(result, Err(RegistryError::InvalidScene { .. })));
    }

    #[test]
    fn bare_suffix_is_invalid() {
        let result = build(vec![decl("_scene")], None);
        assert!(matches!(result, Err(RegistryError::InvalidScene { .. })));
    }

    #[test]
    fn non_snake_case_stem_is_invalid() {
        let result = build(vec![decl("MenuScene_scene")], None);
        assert!(matches!(result, Err(RegistryError::InvalidScene { .. })));
    }

    #[test]
    fn one_bad_declaration_fails_the_whole_build() {
        let result = build(
            vec![decl("menu_scene"), decl("arena_scene"), decl("broken")],
            None,
        );
        assert!(matches!(result, Err(RegistryError::InvalidScene { .. })));
    }

    #[test]
    fn duplicate_names_fail_the_build() {
        let result = build(vec![decl("menu_scene"), decl("menu_scene")], None);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateScene(name)) if name == "MenuScene"
        ));
    }

    #[test]
    fn empty_registry_is_a_configuration_error() {
        let result = build(Vec::new(), None);
        assert!(matches!(result, Err(RegistryError::Configuration(_))));
    }

    #[test]
    fn lookup_miss_is_scene_not_found() {
        let mut registry = build(vec![decl("menu_scene")], None).unwrap();
        assert!(matches!(
            registry.scene_mut("BossScene"),
            Err(RegistryError::SceneNotFound(_))
        ));
    }

    #[test]
    fn reinitialize_replaces_the_live_instance() {
        let mut registry = build(vec![decl("menu_scene")], None).unwrap();

        let before = registry.scene_mut("MenuScene").unwrap().base().object().id();
        registry.reinitialize("MenuScene").unwrap();
        let after = registry.scene_mut("MenuScene").unwrap().base().object().id();

        assert_ne!(before, after);
    }
}
