//! # Entity Component Storage
//!
//! Fixed-capacity storage for heterogeneous components keyed by entity slot.
//!
//! ## Design Philosophy
//!
//! - All storage is allocated when the engine is built and when a component
//!   type is registered; nothing grows afterwards
//! - Components live in dense per-type arrays indexed by entity slot
//! - Entity IDs are plain indices; handles add a generation check
//! - Type erasure stops at the registry; callers always work with concrete types

mod component;
mod engine;
mod entity;
mod handle;
mod manager;
mod registry;
mod storage;

pub use component::{Component, ComponentTypeId};
pub use engine::StorageEngine;
pub use entity::{EntityId, EntitySlotTable};
pub use handle::EntityHandle;
pub use manager::EntityManager;
pub use registry::ComponentRegistry;
pub use storage::ComponentStore;
