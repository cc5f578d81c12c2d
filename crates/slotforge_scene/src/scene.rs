//! # Scenes
//!
//! A scene is one stage of the game (menu, level, ...). The director gives it
//! an [`EntityManager`] on activation; the scene must not keep handles past
//! [`Scene::unload`], and any it does keep stop working once the session is
//! torn down.

use slotforge_core::EntityManager;

use crate::error::SceneResult;

/// Per-frame context handed to [`Scene::update`].
pub struct Frame<'a> {
    entities: &'a EntityManager,
    index: u64,
    done: bool,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(entities: &'a EntityManager, index: u64) -> Self {
        Self {
            entities,
            index,
            done: false,
        }
    }

    /// The active session's entities.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &'a EntityManager {
        self.entities
    }

    /// Frames elapsed since the scene was activated, starting at 0.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// Ends the scene after this frame; the director switches to [`Scene::next_scene`].
    #[inline]
    pub fn go_to_next_scene(&mut self) {
        self.done = true;
    }

    /// Whether the scene asked to finish during this frame.
    #[inline]
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }
}

/// One stage of the game driven by a [`SceneDirector`](crate::SceneDirector).
pub trait Scene {
    /// Called on activation with a fresh, empty session.
    ///
    /// # Errors
    ///
    /// Any failure aborts the activation and tears the session down.
    fn init(&mut self, entities: &EntityManager) -> SceneResult<()>;

    /// Called once per frame while the scene is active.
    ///
    /// # Errors
    ///
    /// Failures propagate out of [`SceneDirector::step`](crate::SceneDirector::step).
    fn update(&mut self, frame: &mut Frame<'_>) -> SceneResult<()>;

    /// Called before the scene's session is torn down.
    fn unload(&mut self) {}

    /// Name of the scene to activate once this one finishes.
    fn next_scene(&self) -> &str;
}

/// A named scene, as registered with the director.
pub struct SceneConfig {
    pub(crate) name: String,
    pub(crate) scene: Box<dyn Scene>,
}

impl SceneConfig {
    /// Pairs `scene` with the name other scenes use to switch to it.
    #[must_use]
    pub fn new(name: impl Into<String>, scene: impl Scene + 'static) -> Self {
        Self {
            name: name.into(),
            scene: Box::new(scene),
        }
    }

    /// The scene's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
