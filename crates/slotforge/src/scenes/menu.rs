//! Title screen: a single cursor entity, then on to the arena.

use glam::DVec2;
use slotforge_core::{EntityHandle, EntityManager};
use slotforge_scene::{Frame, Scene, SceneResult};

use crate::components::{Transform, TRANSFORM};

/// Waits a fixed number of frames, nudging the cursor, then switches to `main`.
pub struct MenuScene {
    frames: u64,
    cursor: Option<EntityHandle>,
}

impl MenuScene {
    /// A menu that lasts `frames` frames.
    #[must_use]
    pub fn new(frames: u64) -> Self {
        Self {
            frames,
            cursor: None,
        }
    }
}

impl Scene for MenuScene {
    fn init(&mut self, entities: &EntityManager) -> SceneResult<()> {
        let cursor = entities.create_entity("cursor")?;
        cursor.add_component(TRANSFORM, Transform::at(DVec2::ZERO))?;
        self.cursor = Some(cursor);
        Ok(())
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> SceneResult<()> {
        if let Some(cursor) = &self.cursor {
            cursor.update_component::<Transform, _>(TRANSFORM, |t| t.position.y += 1.0)?;
        }
        if frame.index() + 1 >= self.frames {
            frame.go_to_next_scene();
        }
        Ok(())
    }

    fn unload(&mut self) {
        self.cursor = None;
    }

    fn next_scene(&self) -> &str {
        "main"
    }
}
