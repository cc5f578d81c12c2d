//! # Storage Engine Error Types
//!
//! All recoverable failures are returned to the immediate caller. The only
//! condition that aborts is a conflicting component registration, which is a
//! startup-time programmer error (see [`RegistrationError`]).

use thiserror::Error;

use crate::ecs::{ComponentTypeId, EntityId};

/// Errors returned by entity and component operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// No free entity slot is left in the pool.
    #[error("entity pool exhausted: all {capacity} slots are active")]
    CapacityExhausted {
        /// The fixed capacity of the pool.
        capacity: usize,
    },

    /// No store is bound to the requested component type identifier.
    #[error("component type {0} is not registered")]
    UnregisteredComponentType(ComponentTypeId),

    /// The store bound to the identifier holds a different concrete type.
    #[error("component type {type_id} stores `{stored}`, requested `{requested}`")]
    TypeMismatch {
        /// The identifier that was looked up.
        type_id: ComponentTypeId,
        /// The concrete type the store actually holds.
        stored: &'static str,
        /// The concrete type the caller asked for.
        requested: &'static str,
    },

    /// The entity identifier lies outside `[0, capacity)`.
    #[error("entity {entity} is out of range for capacity {capacity}")]
    IndexOutOfRange {
        /// The offending identifier.
        entity: EntityId,
        /// The fixed capacity of the pool.
        capacity: usize,
    },

    /// The slot is free; its component data is stale.
    #[error("entity {0} is not active")]
    InactiveEntityAccess(EntityId),

    /// The slot was recycled for another logical entity since the handle was issued.
    #[error("handle to entity {entity} (generation {generation}) is stale")]
    StaleHandle {
        /// The slot index the handle points at.
        entity: EntityId,
        /// The generation the handle was issued with.
        generation: u32,
    },

    /// The session that owned the storage engine has been torn down.
    #[error("storage engine has been torn down")]
    EngineTornDown,

    /// The storage engine is already borrowed by an outer accessor.
    #[error("storage engine is already borrowed")]
    EngineBusy,
}

/// Result type for storage engine operations.
pub type PoolResult<T> = Result<T, PoolError>;

/// Conflicting component registrations.
///
/// [`StorageEngine::register`](crate::StorageEngine::register) turns these into a
/// panic; [`StorageEngine::try_register`](crate::StorageEngine::try_register)
/// hands them back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The identifier is already bound to another concrete type.
    #[error("component type {type_id} is already bound to `{bound}`, cannot bind `{requested}`")]
    IdAlreadyBound {
        /// The identifier being registered.
        type_id: ComponentTypeId,
        /// The concrete type already bound to it.
        bound: &'static str,
        /// The concrete type that was offered.
        requested: &'static str,
    },

    /// The concrete type is already registered under another identifier.
    #[error("`{type_name}` is already registered as {existing}, cannot register it as {requested}")]
    TypeAlreadyRegistered {
        /// The concrete type.
        type_name: &'static str,
        /// The identifier it is bound to.
        existing: ComponentTypeId,
        /// The identifier that was offered.
        requested: ComponentTypeId,
    },
}

/// Errors raised while loading a pool configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid TOML for the expected schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
