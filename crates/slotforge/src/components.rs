//! Game components and their registered type identifiers.

use glam::DVec2;
use slotforge_core::{Component, ComponentTypeId, StorageEngine};

/// Identifier of [`Transform`].
pub const TRANSFORM: ComponentTypeId = ComponentTypeId::new(0);
/// Identifier of [`Health`].
pub const HEALTH: ComponentTypeId = ComponentTypeId::new(1);

/// Position and facing of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    /// World position.
    pub position: DVec2,
    /// Facing, in radians.
    pub angle: f64,
    active: bool,
}

impl Transform {
    /// A transform at `position` facing angle 0.
    #[must_use]
    pub fn at(position: DVec2) -> Self {
        Self {
            position,
            angle: 0.0,
            active: true,
        }
    }
}

impl Component for Transform {
    fn exists(&self) -> bool {
        self.active
    }
}

/// Hit points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Health {
    /// Remaining hit points; the entity is dead at 0.
    pub hp: i32,
}

impl Component for Health {
    fn exists(&self) -> bool {
        self.hp > 0
    }
}

/// Registers every game component on `engine`.
pub fn register_all(engine: &mut StorageEngine) {
    engine.register::<Transform>(TRANSFORM);
    engine.register::<Health>(HEALTH);
}
