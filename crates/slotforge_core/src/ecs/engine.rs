//! # Storage Engine
//!
//! The central container for one scene's entities and components.
//! All memory is allocated at construction and at registration.

use tracing::{debug, info, trace, warn};

use super::component::{Component, ComponentTypeId};
use super::entity::{EntityId, EntitySlotTable};
use super::registry::ComponentRegistry;
use crate::config::PoolConfig;
use crate::error::{ConfigError, PoolError, PoolResult, RegistrationError};

/// The storage engine ("memory pool") for one scene or session.
///
/// # Capacity
///
/// The engine has a fixed capacity set at creation. It is never resized;
/// creating an entity with every slot active fails with
/// [`PoolError::CapacityExhausted`].
///
/// # Example
///
/// ```rust
/// use slotforge_core::{Component, ComponentTypeId, StorageEngine};
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// struct Health {
///     hp: i32,
/// }
///
/// impl Component for Health {
///     fn exists(&self) -> bool {
///         self.hp > 0
///     }
/// }
///
/// const HEALTH: ComponentTypeId = ComponentTypeId::new(0);
///
/// let mut engine = StorageEngine::new(16);
/// engine.register::<Health>(HEALTH);
///
/// let player = engine.create_entity("player")?;
/// engine.set_component(player, HEALTH, Health { hp: 10 })?;
/// assert_eq!(engine.get_component::<Health>(player, HEALTH)?, Health { hp: 10 });
/// # Ok::<(), slotforge_core::PoolError>(())
/// ```
pub struct StorageEngine {
    slots: EntitySlotTable,
    registry: ComponentRegistry,
    capacity: usize,
}

impl StorageEngine {
    /// Creates an engine with room for `capacity` entities.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        info!(capacity, "storage engine created");
        Self {
            slots: EntitySlotTable::new(capacity),
            registry: ComponentRegistry::new(capacity),
            capacity,
        }
    }

    /// Creates an engine sized by a validated [`PoolConfig`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if the configured capacity is unusable.
    pub fn from_config(config: &PoolConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.estimate_max_entities))
    }

    /// Builds an empty engine with the same capacity and registrations.
    ///
    /// Used to hand each scene activation its own session: nothing created in
    /// an earlier session is visible in the new one.
    #[must_use]
    pub fn fresh_session(&self) -> Self {
        debug!(
            capacity = self.capacity,
            component_types = self.registry.len(),
            "fresh storage session"
        );
        Self {
            slots: EntitySlotTable::new(self.capacity),
            registry: self.registry.fresh(),
            capacity: self.capacity,
        }
    }

    /// Returns the maximum number of simultaneously active entities.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of active entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.slots.alive_count()
    }

    /// Returns the component registry.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Binds component type `C` to `type_id`.
    ///
    /// Registering the same pair again is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `type_id` is bound to another type, or `C` is registered
    /// under another identifier. Both are programming errors caught at startup.
    pub fn register<C: Component>(&mut self, type_id: ComponentTypeId) {
        if let Err(err) = self.try_register::<C>(type_id) {
            panic!("component registration failed: {err}");
        }
    }

    /// Binds component type `C` to `type_id`, reporting conflicts instead of panicking.
    ///
    /// # Errors
    ///
    /// [`RegistrationError`] when the binding conflicts with an existing one.
    pub fn try_register<C: Component>(
        &mut self,
        type_id: ComponentTypeId,
    ) -> Result<(), RegistrationError> {
        self.registry.register::<C>(type_id)?;
        debug!(%type_id, component = std::any::type_name::<C>(), "component registered");
        Ok(())
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Claims the lowest free slot for a new entity tagged `tag`.
    ///
    /// Every registered store is reset to its default at the new index, so
    /// the entity never sees a previous occupant's data.
    ///
    /// # Errors
    ///
    /// [`PoolError::CapacityExhausted`] if every slot is active.
    pub fn create_entity(&mut self, tag: &str) -> PoolResult<EntityId> {
        let id = match self.slots.allocate(tag) {
            Ok(id) => id,
            Err(err) => {
                warn!(tag, capacity = self.capacity, "entity pool exhausted");
                return Err(err);
            }
        };

        self.registry.reset_slot(id.index());
        trace!(%id, tag, "entity created");
        Ok(id)
    }

    /// Releases an entity's slot.
    ///
    /// Component data is not cleared; it is unreachable through the engine
    /// until the slot is reissued and re-defaulted.
    ///
    /// # Errors
    ///
    /// [`PoolError::IndexOutOfRange`] or [`PoolError::InactiveEntityAccess`].
    pub fn destroy_entity(&mut self, id: EntityId) -> PoolResult<()> {
        self.slots.deallocate(id)?;
        trace!(%id, "entity destroyed");
        Ok(())
    }

    /// Returns whether `id` is an active entity.
    #[inline]
    #[must_use]
    pub fn is_active(&self, id: EntityId) -> bool {
        self.slots.is_active(id)
    }

    /// Returns the slot's current generation.
    #[inline]
    #[must_use]
    pub fn generation(&self, id: EntityId) -> Option<u32> {
        self.slots.generation(id)
    }

    /// Returns the tag recorded when the entity was created; `None` for free slots.
    #[inline]
    #[must_use]
    pub fn tag(&self, id: EntityId) -> Option<&str> {
        self.slots.tag(id)
    }

    /// Iterates over active entities in index order.
    pub fn alive_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter_active()
    }

    // =========================================================================
    // Component access
    // =========================================================================

    /// Returns a copy of entity `id`'s component of type `C`.
    ///
    /// # Errors
    ///
    /// [`PoolError::IndexOutOfRange`], [`PoolError::InactiveEntityAccess`],
    /// [`PoolError::UnregisteredComponentType`] or [`PoolError::TypeMismatch`].
    pub fn get_component<C: Component>(
        &self,
        id: EntityId,
        type_id: ComponentTypeId,
    ) -> PoolResult<C> {
        self.slots.check_active(id)?;
        let store = self.registry.store::<C>(type_id)?;
        store.get(id.index()).ok_or(PoolError::IndexOutOfRange {
            entity: id,
            capacity: self.capacity,
        })
    }

    /// Overwrites entity `id`'s component of type `C`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`get_component`](Self::get_component).
    pub fn set_component<C: Component>(
        &mut self,
        id: EntityId,
        type_id: ComponentTypeId,
        value: C,
    ) -> PoolResult<()> {
        self.update_component::<C, ()>(id, type_id, |slot| *slot = value)
    }

    /// Mutates entity `id`'s component of type `C` in place.
    ///
    /// The slot reference only lives for the duration of `f`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`get_component`](Self::get_component).
    pub fn update_component<C: Component, R>(
        &mut self,
        id: EntityId,
        type_id: ComponentTypeId,
        f: impl FnOnce(&mut C) -> R,
    ) -> PoolResult<R> {
        self.slots.check_active(id)?;
        let capacity = self.capacity;
        let store = self.registry.store_mut::<C>(type_id)?;
        store.update(id.index(), f).ok_or(PoolError::IndexOutOfRange {
            entity: id,
            capacity,
        })
    }

    /// Returns whether `id` is active and its `C` component reports [`Component::exists`].
    #[must_use]
    pub fn has_component<C: Component>(&self, id: EntityId, type_id: ComponentTypeId) -> bool {
        self.get_component::<C>(id, type_id)
            .is_ok_and(|component| component.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Position {
        x: f64,
        y: f64,
        placed: bool,
    }

    impl Component for Position {
        fn exists(&self) -> bool {
            self.placed
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Health(i32);

    impl Default for Health {
        fn default() -> Self {
            Self(100)
        }
    }

    impl Component for Health {
        fn exists(&self) -> bool {
            self.0 > 0
        }
    }

    const POSITION: ComponentTypeId = ComponentTypeId::new(0);
    const HEALTH: ComponentTypeId = ComponentTypeId::new(1);

    fn engine(capacity: usize) -> StorageEngine {
        let mut engine = StorageEngine::new(capacity);
        engine.register::<Position>(POSITION);
        engine.register::<Health>(HEALTH);
        engine
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine(1000);
        assert_eq!(engine.capacity(), 1000);
        assert_eq!(engine.alive_count(), 0);
        assert_eq!(engine.registry().len(), 2);
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than zero")]
    fn test_zero_capacity_panics() {
        let _ = StorageEngine::new(0);
    }

    #[test]
    #[should_panic(expected = "component registration failed")]
    fn test_conflicting_registration_panics() {
        let mut engine = engine(4);
        engine.register::<Health>(POSITION);
    }

    #[test]
    fn test_try_register_reports_conflict() {
        let mut engine = engine(4);
        assert!(engine.try_register::<Position>(POSITION).is_ok());
        assert!(matches!(
            engine.try_register::<Position>(ComponentTypeId::new(9)),
            Err(RegistrationError::TypeAlreadyRegistered { .. })
        ));
    }

    #[test]
    fn test_spawn_despawn() {
        let mut engine = engine(100);

        let id1 = engine.create_entity("a").unwrap();
        assert!(engine.is_active(id1));
        assert_eq!(engine.alive_count(), 1);

        let id2 = engine.create_entity("b").unwrap();
        assert_eq!(engine.alive_count(), 2);

        engine.destroy_entity(id1).unwrap();
        assert!(!engine.is_active(id1));
        assert_eq!(engine.alive_count(), 1);

        // Spawn again - should reuse the slot
        let id3 = engine.create_entity("c").unwrap();
        assert_eq!(id3, id1);
        assert_ne!(id3, id2);
        assert_eq!(engine.tag(id3), Some("c"));
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut engine = engine(4);
        let id = engine.create_entity("mover").unwrap();
        let pos = Position {
            x: 1.5,
            y: -2.0,
            placed: true,
        };

        engine.set_component(id, POSITION, pos).unwrap();
        assert_eq!(engine.get_component::<Position>(id, POSITION), Ok(pos));
        assert!(engine.has_component::<Position>(id, POSITION));
    }

    #[test]
    fn test_update_in_place() {
        let mut engine = engine(4);
        let id = engine.create_entity("target").unwrap();

        let remaining = engine
            .update_component::<Health, _>(id, HEALTH, |h| {
                h.0 -= 30;
                h.0
            })
            .unwrap();

        assert_eq!(remaining, 70);
        assert_eq!(engine.get_component::<Health>(id, HEALTH), Ok(Health(70)));
    }

    #[test]
    fn test_recycled_slot_is_defaulted() {
        let mut engine = engine(2);
        let id = engine.create_entity("old").unwrap();
        engine.set_component(id, HEALTH, Health(1)).unwrap();
        engine.destroy_entity(id).unwrap();

        let reused = engine.create_entity("new").unwrap();
        assert_eq!(reused, id);
        assert_eq!(engine.get_component::<Health>(reused, HEALTH), Ok(Health(100)));
        assert_eq!(
            engine.get_component::<Position>(reused, POSITION),
            Ok(Position::default())
        );
    }

    #[test]
    fn test_inactive_access_fails() {
        let mut engine = engine(2);
        let id = engine.create_entity("ghost").unwrap();
        engine.set_component(id, HEALTH, Health(5)).unwrap();
        engine.destroy_entity(id).unwrap();

        assert_eq!(
            engine.get_component::<Health>(id, HEALTH),
            Err(PoolError::InactiveEntityAccess(id))
        );
        assert_eq!(
            engine.set_component(id, HEALTH, Health(1)),
            Err(PoolError::InactiveEntityAccess(id))
        );
        assert!(!engine.has_component::<Health>(id, HEALTH));
        assert_eq!(engine.tag(id), None);
    }

    #[test]
    fn test_lookup_failures() {
        let mut engine = engine(2);
        let id = engine.create_entity("e").unwrap();

        assert_eq!(
            engine.get_component::<Health>(id, ComponentTypeId::new(7)),
            Err(PoolError::UnregisteredComponentType(ComponentTypeId::new(7)))
        );
        assert!(matches!(
            engine.get_component::<Health>(id, POSITION),
            Err(PoolError::TypeMismatch { .. })
        ));
        assert!(matches!(
            engine.set_component(id, POSITION, Health(3)),
            Err(PoolError::TypeMismatch { .. })
        ));
        assert_eq!(
            engine.get_component::<Health>(EntityId::new(2), HEALTH),
            Err(PoolError::IndexOutOfRange {
                entity: EntityId::new(2),
                capacity: 2
            })
        );
    }

    #[test]
    fn test_write_path_failures() {
        let mut engine = engine(2);
        let id = engine.create_entity("e").unwrap();
        let far = EntityId::new(5);
        let out_of_range = PoolError::IndexOutOfRange {
            entity: far,
            capacity: 2,
        };

        assert_eq!(
            engine.set_component(far, HEALTH, Health(1)),
            Err(out_of_range.clone())
        );
        assert_eq!(
            engine.update_component::<Health, _>(far, HEALTH, |h| h.0 = 1),
            Err(out_of_range.clone())
        );
        assert_eq!(engine.destroy_entity(far), Err(out_of_range));
        assert_eq!(
            engine.set_component(id, ComponentTypeId::new(9), Health(1)),
            Err(PoolError::UnregisteredComponentType(ComponentTypeId::new(9)))
        );
        assert_eq!(
            engine.update_component::<Health, _>(id, ComponentTypeId::new(9), |h| h.0 = 1),
            Err(PoolError::UnregisteredComponentType(ComponentTypeId::new(9)))
        );
        assert_eq!(engine.get_component::<Health>(id, HEALTH), Ok(Health(100)));
        assert_eq!(engine.alive_count(), 1);
    }

    #[test]
    fn test_late_registration_reads_default() {
        let mut engine = StorageEngine::new(3);
        engine.register::<Position>(POSITION);
        let a = engine.create_entity("a").unwrap();
        let b = engine.create_entity("b").unwrap();

        engine.register::<Health>(HEALTH);

        assert_eq!(engine.get_component::<Health>(a, HEALTH), Ok(Health(100)));
        assert_eq!(engine.get_component::<Health>(b, HEALTH), Ok(Health(100)));
        engine.set_component(b, HEALTH, Health(4)).unwrap();
        assert_eq!(engine.get_component::<Health>(b, HEALTH), Ok(Health(4)));
    }

    #[test]
    fn test_fresh_session() {
        let mut engine = engine(3);
        let id = engine.create_entity("kept").unwrap();
        engine.set_component(id, HEALTH, Health(1)).unwrap();

        let session = engine.fresh_session();
        assert_eq!(session.capacity(), 3);
        assert_eq!(session.alive_count(), 0);
        assert_eq!(session.registry().type_id_of::<Health>(), Some(HEALTH));
        assert!(engine.is_active(id));
    }
}
