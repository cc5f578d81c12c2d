//! # Entity Handles
//!
//! A handle pairs an entity slot with a non-owning reference to the engine
//! that issued it. Every access re-checks that the engine still exists, that
//! the slot is active, and that it has not been recycled since the handle was
//! issued.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::component::{Component, ComponentTypeId};
use super::engine::StorageEngine;
use super::entity::EntityId;
use crate::error::{PoolError, PoolResult};

/// Transient accessor for one entity.
///
/// Handles carry no component data and can be cloned and dropped freely.
/// Once the owning [`EntityManager`](crate::EntityManager) is torn down every
/// call fails with [`PoolError::EngineTornDown`].
#[derive(Clone)]
pub struct EntityHandle {
    id: EntityId,
    generation: u32,
    engine: Weak<RefCell<StorageEngine>>,
}

impl EntityHandle {
    pub(crate) fn new(id: EntityId, generation: u32, engine: &Rc<RefCell<StorageEngine>>) -> Self {
        Self {
            id,
            generation,
            engine: Rc::downgrade(engine),
        }
    }

    /// The entity's slot index.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// The slot generation this handle was issued for.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Writes a component onto the entity, returning the handle so calls chain.
    ///
    /// # Errors
    ///
    /// Handle liveness failures plus those of [`StorageEngine::set_component`].
    pub fn add_component<C: Component>(
        &self,
        type_id: ComponentTypeId,
        value: C,
    ) -> PoolResult<&Self> {
        self.write(|engine| engine.set_component(self.id, type_id, value))?;
        Ok(self)
    }

    /// Returns a copy of one of the entity's components.
    ///
    /// # Errors
    ///
    /// Handle liveness failures plus those of [`StorageEngine::get_component`].
    pub fn get_component<C: Component>(&self, type_id: ComponentTypeId) -> PoolResult<C> {
        self.read(|engine| engine.get_component(self.id, type_id))
    }

    /// Mutates one of the entity's components in place.
    ///
    /// The engine stays borrowed while `f` runs; touching any handle of the
    /// same engine from inside `f` fails with [`PoolError::EngineBusy`].
    ///
    /// # Errors
    ///
    /// Handle liveness failures plus those of [`StorageEngine::update_component`].
    pub fn update_component<C: Component, R>(
        &self,
        type_id: ComponentTypeId,
        f: impl FnOnce(&mut C) -> R,
    ) -> PoolResult<R> {
        self.write(|engine| engine.update_component(self.id, type_id, f))
    }

    /// Whether the entity is live and its `C` component reports [`Component::exists`].
    #[must_use]
    pub fn has_component<C: Component>(&self, type_id: ComponentTypeId) -> bool {
        self.read(|engine| Ok(engine.has_component::<C>(self.id, type_id)))
            .unwrap_or(false)
    }

    /// The tag the entity was created with.
    ///
    /// # Errors
    ///
    /// Handle liveness failures.
    pub fn tag(&self) -> PoolResult<String> {
        self.read(|engine| Ok(engine.tag(self.id).unwrap_or_default().to_owned()))
    }

    /// Whether the handle still refers to a live entity.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.read(|_| Ok(())).is_ok()
    }

    /// Destroys the entity, consuming the handle.
    ///
    /// # Errors
    ///
    /// Handle liveness failures.
    pub fn destroy(self) -> PoolResult<()> {
        self.write(|engine| engine.destroy_entity(self.id))
    }

    fn read<R>(&self, f: impl FnOnce(&StorageEngine) -> PoolResult<R>) -> PoolResult<R> {
        let engine = self.engine.upgrade().ok_or(PoolError::EngineTornDown)?;
        let engine = engine.try_borrow().map_err(|_| PoolError::EngineBusy)?;
        self.check_live(&engine)?;
        f(&engine)
    }

    fn write<R>(&self, f: impl FnOnce(&mut StorageEngine) -> PoolResult<R>) -> PoolResult<R> {
        let engine = self.engine.upgrade().ok_or(PoolError::EngineTornDown)?;
        let mut engine = engine.try_borrow_mut().map_err(|_| PoolError::EngineBusy)?;
        self.check_live(&engine)?;
        f(&mut engine)
    }

    fn check_live(&self, engine: &StorageEngine) -> PoolResult<()> {
        if !engine.is_active(self.id) {
            return Err(PoolError::InactiveEntityAccess(self.id));
        }
        if engine.generation(self.id) != Some(self.generation) {
            return Err(PoolError::StaleHandle {
                entity: self.id,
                generation: self.generation,
            });
        }
        Ok(())
    }
}

impl PartialEq for EntityHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.generation == other.generation
            && Weak::ptr_eq(&self.engine, &other.engine)
    }
}

impl Eq for EntityHandle {}

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityHandle({}v{})", self.id, self.generation)
    }
}
