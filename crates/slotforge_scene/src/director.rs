//! # Scene Director
//!
//! Owns every registered scene plus a template storage engine (capacity and
//! component registrations, no entities). Activating a scene builds a fresh
//! session from the template; finishing it unloads the scene and tears the
//! session down before the next one starts.

use std::collections::HashMap;

use slotforge_core::{EntityManager, StorageEngine};
use tracing::{debug, info};

use crate::error::{SceneError, SceneResult};
use crate::scene::{Frame, Scene, SceneConfig};

/// Outcome of one [`SceneDirector::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The active scene keeps running.
    Stay,
    /// The active scene finished and `to` was activated in its place.
    Switched {
        /// The scene that finished.
        from: String,
        /// The scene now active.
        to: String,
    },
}

struct ActiveScene {
    name: String,
    entities: EntityManager,
    frames: u64,
}

/// Drives scenes and the storage sessions they run in.
pub struct SceneDirector {
    scenes: HashMap<String, Box<dyn Scene>>,
    template: StorageEngine,
    active: Option<ActiveScene>,
}

impl SceneDirector {
    /// Creates a director over `configs`, cloning sessions from `template`.
    ///
    /// # Errors
    ///
    /// [`SceneError::DuplicateScene`] if two configs share a name.
    pub fn new(configs: Vec<SceneConfig>, template: StorageEngine) -> SceneResult<Self> {
        let mut scenes = HashMap::with_capacity(configs.len());
        for config in configs {
            if scenes.contains_key(&config.name) {
                return Err(SceneError::DuplicateScene(config.name));
            }
            scenes.insert(config.name, config.scene);
        }

        Ok(Self {
            scenes,
            template,
            active: None,
        })
    }

    /// Name of the active scene.
    #[must_use]
    pub fn active_scene(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.name.as_str())
    }

    /// The active scene's entities.
    #[must_use]
    pub fn entities(&self) -> Option<&EntityManager> {
        self.active.as_ref().map(|active| &active.entities)
    }

    /// Whether `name` is the scene currently loaded.
    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.active_scene() == Some(name)
    }

    /// Tears down the active scene, if any, and activates `name` in a fresh session.
    ///
    /// The previous scene is always torn down first, so on any error no scene
    /// is active.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownScene`], or whatever [`Scene::init`] returns.
    pub fn activate(&mut self, name: &str) -> SceneResult<()> {
        self.deactivate();

        let scene = self
            .scenes
            .get_mut(name)
            .ok_or_else(|| SceneError::UnknownScene(name.to_owned()))?;
        let entities = EntityManager::new(self.template.fresh_session());

        if let Err(err) = scene.init(&entities) {
            scene.unload();
            entities.teardown();
            return Err(err);
        }

        info!(scene = name, "scene activated");
        self.active = Some(ActiveScene {
            name: name.to_owned(),
            entities,
            frames: 0,
        });
        Ok(())
    }

    /// Unloads the active scene and tears its session down.
    pub fn deactivate(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let Some(scene) = self.scenes.get_mut(&active.name) {
            scene.unload();
        }
        info!(scene = %active.name, frames = active.frames, "scene unloaded");
        active.entities.teardown();
    }

    /// Runs one frame of the active scene, switching scenes if it finished.
    ///
    /// # Errors
    ///
    /// [`SceneError::NoActiveScene`], any error from [`Scene::update`], or an
    /// activation failure of the next scene. After a failed switch no scene is
    /// active.
    pub fn step(&mut self) -> SceneResult<Transition> {
        let active = self.active.as_mut().ok_or(SceneError::NoActiveScene)?;
        let scene = self
            .scenes
            .get_mut(&active.name)
            .ok_or_else(|| SceneError::UnknownScene(active.name.clone()))?;

        let mut frame = Frame::new(&active.entities, active.frames);
        scene.update(&mut frame)?;
        let done = frame.is_done();
        active.frames += 1;

        if !done {
            return Ok(Transition::Stay);
        }

        let from = active.name.clone();
        let to = scene.next_scene().to_owned();
        debug!(%from, %to, "scene finished");
        self.activate(&to)?;
        Ok(Transition::Switched { from, to })
    }

    /// Activates `start` and steps up to `max_frames` frames, then shuts down.
    ///
    /// Returns the number of scene switches that happened.
    ///
    /// # Errors
    ///
    /// The first error from [`activate`](Self::activate) or [`step`](Self::step).
    pub fn run(&mut self, start: &str, max_frames: u64) -> SceneResult<usize> {
        self.activate(start)?;
        let mut switches = 0;
        for _ in 0..max_frames {
            if let Transition::Switched { .. } = self.step()? {
                switches += 1;
            }
        }
        self.deactivate();
        Ok(switches)
    }
}
