//! The playable scene: a player circling while enemies wear down and respawn.

use glam::DVec2;
use slotforge_core::{EntityManager, PoolError};
use slotforge_scene::{Frame, Scene, SceneResult};
use tracing::{debug, warn};

use crate::components::{Health, Transform, HEALTH, TRANSFORM};

const PLAYER_SPEED: f64 = 2.0;
const TURN_RATE: f64 = 0.05;
const ENEMY_HP: i32 = 30;
const ENEMY_COUNT: usize = 3;

/// Player plus a few enemies that lose one hit point per frame.
pub struct ArenaScene {
    frames: u64,
    kills: usize,
}

impl ArenaScene {
    /// An arena that lasts `frames` frames.
    #[must_use]
    pub fn new(frames: u64) -> Self {
        Self { frames, kills: 0 }
    }

    fn spawn_enemy(entities: &EntityManager, slot: usize) -> SceneResult<()> {
        #[allow(clippy::cast_precision_loss)]
        let x = 10.0 * (slot as f64 + 1.0);
        match entities.create_entity("enemy") {
            Ok(enemy) => {
                enemy
                    .add_component(TRANSFORM, Transform::at(DVec2::new(x, 5.0)))?
                    .add_component(HEALTH, Health { hp: ENEMY_HP })?;
                Ok(())
            }
            Err(PoolError::CapacityExhausted { capacity }) => {
                warn!(capacity, "no room to spawn enemy");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Scene for ArenaScene {
    fn init(&mut self, entities: &EntityManager) -> SceneResult<()> {
        self.kills = 0;
        entities
            .create_entity("player")?
            .add_component(TRANSFORM, Transform::at(DVec2::ZERO))?
            .add_component(HEALTH, Health { hp: 100 })?;

        for slot in 0..ENEMY_COUNT {
            Self::spawn_enemy(entities, slot)?;
        }
        Ok(())
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> SceneResult<()> {
        let entities = frame.entities();

        for player in entities.entities_with_tag("player")? {
            player.update_component::<Transform, _>(TRANSFORM, |t| {
                t.angle += TURN_RATE;
                t.position += DVec2::from_angle(t.angle) * PLAYER_SPEED;
            })?;
        }

        for (slot, enemy) in entities.entities_with_tag("enemy")?.into_iter().enumerate() {
            enemy.update_component::<Health, _>(HEALTH, |h| h.hp -= 1)?;
            if !enemy.has_component::<Health>(HEALTH) {
                enemy.destroy()?;
                self.kills += 1;
                Self::spawn_enemy(entities, slot)?;
            }
        }

        if frame.index() + 1 >= self.frames {
            debug!(kills = self.kills, "arena finished");
            frame.go_to_next_scene();
        }
        Ok(())
    }

    fn next_scene(&self) -> &str {
        "menu"
    }
}
