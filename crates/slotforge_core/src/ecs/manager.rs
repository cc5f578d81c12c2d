//! # Entity Manager
//!
//! The per-scene facade over one storage engine. Scene code creates
//! entities only through the manager; dropping or tearing down the manager
//! ends the session and invalidates every handle it issued.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use super::engine::StorageEngine;
use super::entity::EntityId;
use super::handle::EntityHandle;
use crate::error::{PoolError, PoolResult};

/// Session object owning one [`StorageEngine`].
///
/// # Example
///
/// ```rust
/// use slotforge_core::{EntityManager, StorageEngine};
///
/// let entities = EntityManager::new(StorageEngine::new(2));
/// let player = entities.create_entity("player")?;
/// let enemy = entities.create_entity("enemy")?;
/// assert!(entities.create_entity("extra").is_err());
///
/// enemy.destroy()?;
/// assert_eq!(entities.alive_entities()?, vec![player]);
/// # Ok::<(), slotforge_core::PoolError>(())
/// ```
pub struct EntityManager {
    engine: Rc<RefCell<StorageEngine>>,
}

impl EntityManager {
    /// Takes ownership of `engine` for the lifetime of the session.
    #[must_use]
    pub fn new(engine: StorageEngine) -> Self {
        Self {
            engine: Rc::new(RefCell::new(engine)),
        }
    }

    /// Creates an entity tagged `tag` and returns a handle to it.
    ///
    /// # Errors
    ///
    /// [`PoolError::CapacityExhausted`] if every slot is active,
    /// [`PoolError::EngineBusy`] if called while the engine is borrowed.
    pub fn create_entity(&self, tag: &str) -> PoolResult<EntityHandle> {
        let mut engine = self.borrow_mut()?;
        let id = engine.create_entity(tag)?;
        let generation = engine.generation(id).unwrap_or_default();
        Ok(EntityHandle::new(id, generation, &self.engine))
    }

    /// Destroys the entity at `id`.
    ///
    /// # Errors
    ///
    /// As [`StorageEngine::destroy_entity`], or [`PoolError::EngineBusy`].
    pub fn destroy_entity(&self, id: EntityId) -> PoolResult<()> {
        self.borrow_mut()?.destroy_entity(id)
    }

    /// Returns a handle to the entity currently occupying `id`.
    ///
    /// # Errors
    ///
    /// [`PoolError::IndexOutOfRange`], [`PoolError::InactiveEntityAccess`] or
    /// [`PoolError::EngineBusy`].
    pub fn handle(&self, id: EntityId) -> PoolResult<EntityHandle> {
        let engine = self.borrow()?;
        let generation = match engine.generation(id) {
            Some(generation) if engine.is_active(id) => generation,
            Some(_) => return Err(PoolError::InactiveEntityAccess(id)),
            None => {
                return Err(PoolError::IndexOutOfRange {
                    entity: id,
                    capacity: engine.capacity(),
                })
            }
        };
        Ok(EntityHandle::new(id, generation, &self.engine))
    }

    /// Handles for every active entity, in slot order.
    ///
    /// Computed from the slot table on each call.
    ///
    /// # Errors
    ///
    /// [`PoolError::EngineBusy`] if called while the engine is borrowed.
    pub fn alive_entities(&self) -> PoolResult<Vec<EntityHandle>> {
        let engine = self.borrow()?;
        Ok(engine
            .alive_entities()
            .map(|id| self.issue(&engine, id))
            .collect())
    }

    /// Handles for every active entity created with `tag`.
    ///
    /// # Errors
    ///
    /// [`PoolError::EngineBusy`] if called while the engine is borrowed.
    pub fn entities_with_tag(&self, tag: &str) -> PoolResult<Vec<EntityHandle>> {
        let engine = self.borrow()?;
        Ok(engine
            .alive_entities()
            .filter(|id| engine.tag(*id) == Some(tag))
            .map(|id| self.issue(&engine, id))
            .collect())
    }

    /// Runs `f` with shared access to the engine, for bulk reads.
    ///
    /// # Errors
    ///
    /// [`PoolError::EngineBusy`] if the engine is mutably borrowed.
    pub fn read<R>(&self, f: impl FnOnce(&StorageEngine) -> R) -> PoolResult<R> {
        let engine = self.borrow()?;
        Ok(f(&engine))
    }

    /// Runs `f` with exclusive access to the engine, for bulk updates.
    ///
    /// # Errors
    ///
    /// [`PoolError::EngineBusy`] if the engine is already borrowed.
    pub fn write<R>(&self, f: impl FnOnce(&mut StorageEngine) -> R) -> PoolResult<R> {
        let mut engine = self.borrow_mut()?;
        Ok(f(&mut engine))
    }

    /// Ends the session, releasing the engine.
    ///
    /// Every handle issued by this manager fails with
    /// [`PoolError::EngineTornDown`] afterwards.
    pub fn teardown(self) {
        let alive = self.engine.try_borrow().map(|e| e.alive_count()).ok();
        info!(?alive, "entity session torn down");
    }

    fn issue(&self, engine: &StorageEngine, id: EntityId) -> EntityHandle {
        let generation = engine.generation(id).unwrap_or_default();
        EntityHandle::new(id, generation, &self.engine)
    }

    fn borrow(&self) -> PoolResult<std::cell::Ref<'_, StorageEngine>> {
        self.engine.try_borrow().map_err(|_| PoolError::EngineBusy)
    }

    fn borrow_mut(&self) -> PoolResult<std::cell::RefMut<'_, StorageEngine>> {
        self.engine.try_borrow_mut().map_err(|_| PoolError::EngineBusy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Component, ComponentTypeId};

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Health {
        hp: i32,
    }

    impl Component for Health {
        fn exists(&self) -> bool {
            self.hp > 0
        }
    }

    const HEALTH: ComponentTypeId = ComponentTypeId::new(0);

    fn manager(capacity: usize) -> EntityManager {
        let mut engine = StorageEngine::new(capacity);
        engine.register::<Health>(HEALTH);
        EntityManager::new(engine)
    }

    #[test]
    fn test_chained_attachment() {
        let entities = manager(4);
        let player = entities.create_entity("player").unwrap();
        player.add_component(HEALTH, Health { hp: 3 }).unwrap();

        assert_eq!(player.get_component::<Health>(HEALTH), Ok(Health { hp: 3 }));
        assert!(player.has_component::<Health>(HEALTH));
        assert_eq!(player.tag().unwrap(), "player");
    }

    #[test]
    fn test_alive_entities_tracks_create_and_destroy() {
        let entities = manager(4);
        assert!(entities.alive_entities().unwrap().is_empty());

        let a = entities.create_entity("a").unwrap();
        let b = entities.create_entity("b").unwrap();
        let c = entities.create_entity("c").unwrap();
        assert_eq!(entities.alive_entities().unwrap().len(), 3);

        b.destroy().unwrap();
        assert_eq!(entities.alive_entities().unwrap(), vec![a, c]);
    }

    #[test]
    fn test_stale_handle_after_recycle() {
        let entities = manager(1);
        let first = entities.create_entity("first").unwrap();
        let copy = first.clone();
        first.destroy().unwrap();

        assert_eq!(
            copy.get_component::<Health>(HEALTH),
            Err(PoolError::InactiveEntityAccess(copy.id()))
        );

        let second = entities.create_entity("second").unwrap();
        assert_eq!(second.id(), copy.id());
        assert_eq!(
            copy.tag(),
            Err(PoolError::StaleHandle {
                entity: copy.id(),
                generation: 0
            })
        );
        assert!(!copy.is_alive());
        assert!(second.is_alive());
    }

    #[test]
    fn test_teardown_invalidates_handles() {
        let entities = manager(2);
        let player = entities.create_entity("player").unwrap();
        entities.teardown();

        assert_eq!(
            player.get_component::<Health>(HEALTH),
            Err(PoolError::EngineTornDown)
        );
        assert!(!player.is_alive());
    }

    #[test]
    fn test_reentrant_access_is_busy() {
        let entities = manager(2);
        let a = entities.create_entity("a").unwrap();
        let b = entities.create_entity("b").unwrap();

        let inner = a
            .update_component::<Health, _>(HEALTH, |_| b.get_component::<Health>(HEALTH))
            .unwrap();
        assert_eq!(inner, Err(PoolError::EngineBusy));
    }

    #[test]
    fn test_bulk_read_and_write() {
        let entities = manager(4);
        let a = entities.create_entity("a").unwrap();

        entities
            .write(|engine| engine.set_component(a.id(), HEALTH, Health { hp: 9 }))
            .unwrap()
            .unwrap();
        let hp = entities
            .read(|engine| engine.get_component::<Health>(a.id(), HEALTH))
            .unwrap();
        assert_eq!(hp, Ok(Health { hp: 9 }));
        assert_eq!(entities.read(StorageEngine::alive_count), Ok(1));

        let nested = a
            .update_component::<Health, _>(HEALTH, |_| entities.read(StorageEngine::alive_count))
            .unwrap();
        assert_eq!(nested, Err(PoolError::EngineBusy));
    }

    #[test]
    fn test_lookup_by_tag_and_id() {
        let entities = manager(4);
        let _ = entities.create_entity("enemy").unwrap();
        let p = entities.create_entity("player").unwrap();
        let _ = entities.create_entity("enemy").unwrap();

        assert_eq!(entities.entities_with_tag("enemy").unwrap().len(), 2);
        assert_eq!(entities.handle(p.id()).unwrap(), p);
        assert_eq!(
            entities.handle(EntityId::new(3)),
            Err(PoolError::InactiveEntityAccess(EntityId::new(3)))
        );
        assert!(matches!(
            entities.handle(EntityId::new(9)),
            Err(PoolError::IndexOutOfRange { .. })
        ));
    }
}
