//! # Slotforge Core
//!
//! Fixed-capacity entity component storage for scene-driven games:
//! - Components are plain `Copy` records in dense, per-type arrays
//! - Entities are slot indices shared by every array
//! - No allocation per component access
//!
//! ## Architecture Rules
//!
//! 1. **Capacity is fixed** - the pool never grows; exhaustion is an error value
//! 2. **Freshly created entities see defaults** - every store is re-defaulted at the new slot
//! 3. **Freed slots are unreadable** - component access checks liveness first
//!
//! ## Example
//!
//! ```rust,ignore
//! use slotforge_core::{EntityManager, StorageEngine};
//!
//! let mut engine = StorageEngine::new(1000);
//! engine.register::<Transform>(TRANSFORM);
//!
//! let entities = EntityManager::new(engine);
//! entities
//!     .create_entity("player")?
//!     .add_component(TRANSFORM, Transform::at(DVec2::ZERO))?;
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod ecs;
pub mod error;

pub use config::PoolConfig;
pub use ecs::{
    Component, ComponentRegistry, ComponentStore, ComponentTypeId, EntityHandle, EntityId,
    EntityManager, EntitySlotTable, StorageEngine,
};
pub use error::{ConfigError, PoolError, PoolResult, RegistrationError};
