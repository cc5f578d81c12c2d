//! # Component Type Registry
//!
//! Binds each [`ComponentTypeId`] to one concrete component type and its
//! store. Bindings are checked in both directions so two types can never
//! share an identifier and one type can never appear under two.

use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, HashMap};

use super::component::{Component, ComponentTypeId};
use super::storage::{ComponentStore, ErasedStore};
use crate::error::{PoolError, PoolResult, RegistrationError};

/// Map from component type identifier to its type-erased store.
///
/// Outside the crate the registry only answers questions about bindings.
/// Component data is reachable solely through [`StorageEngine`](crate::StorageEngine)
/// accessors, which check the slot is active first:
///
/// ```rust,compile_fail
/// use slotforge_core::{Component, ComponentTypeId, StorageEngine};
///
/// #[derive(Clone, Copy, Default)]
/// struct Health(i32);
///
/// impl Component for Health {
///     fn exists(&self) -> bool {
///         self.0 > 0
///     }
/// }
///
/// let mut engine = StorageEngine::new(1);
/// engine.register::<Health>(ComponentTypeId::new(0));
/// let _ = engine.registry().store::<Health>(ComponentTypeId::new(0));
/// ```
pub struct ComponentRegistry {
    stores: BTreeMap<ComponentTypeId, Box<dyn ErasedStore>>,
    by_type: HashMap<TypeId, ComponentTypeId>,
    capacity: usize,
}

impl ComponentRegistry {
    /// Creates an empty registry whose stores will hold `capacity` slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            stores: BTreeMap::new(),
            by_type: HashMap::new(),
            capacity,
        }
    }

    /// Binds `C` to `type_id`, creating its store.
    ///
    /// Registering the same pair twice is a no-op and keeps the existing data.
    ///
    /// # Errors
    ///
    /// [`RegistrationError`] if either side of the pair is already bound elsewhere.
    pub fn register<C: Component>(
        &mut self,
        type_id: ComponentTypeId,
    ) -> Result<(), RegistrationError> {
        if let Some(existing) = self.stores.get(&type_id) {
            if existing.component_type() == TypeId::of::<C>() {
                return Ok(());
            }
            return Err(RegistrationError::IdAlreadyBound {
                type_id,
                bound: existing.component_name(),
                requested: type_name::<C>(),
            });
        }

        if let Some(&existing) = self.by_type.get(&TypeId::of::<C>()) {
            return Err(RegistrationError::TypeAlreadyRegistered {
                type_name: type_name::<C>(),
                existing,
                requested: type_id,
            });
        }

        self.stores
            .insert(type_id, Box::new(ComponentStore::<C>::new(self.capacity)));
        self.by_type.insert(TypeId::of::<C>(), type_id);
        Ok(())
    }

    /// Returns the typed store bound to `type_id`.
    ///
    /// # Errors
    ///
    /// [`PoolError::UnregisteredComponentType`] or [`PoolError::TypeMismatch`].
    pub(crate) fn store<C: Component>(
        &self,
        type_id: ComponentTypeId,
    ) -> PoolResult<&ComponentStore<C>> {
        let erased = self
            .stores
            .get(&type_id)
            .ok_or(PoolError::UnregisteredComponentType(type_id))?;
        erased
            .as_any()
            .downcast_ref::<ComponentStore<C>>()
            .ok_or_else(|| mismatch::<C>(type_id, erased.component_name()))
    }

    /// Returns the typed store bound to `type_id` for writing.
    ///
    /// # Errors
    ///
    /// [`PoolError::UnregisteredComponentType`] or [`PoolError::TypeMismatch`].
    pub(crate) fn store_mut<C: Component>(
        &mut self,
        type_id: ComponentTypeId,
    ) -> PoolResult<&mut ComponentStore<C>> {
        let erased = self
            .stores
            .get_mut(&type_id)
            .ok_or(PoolError::UnregisteredComponentType(type_id))?;
        let stored = erased.component_name();
        erased
            .as_any_mut()
            .downcast_mut::<ComponentStore<C>>()
            .ok_or_else(|| mismatch::<C>(type_id, stored))
    }

    /// Re-defaults slot `index` in every registered store.
    pub(crate) fn reset_slot(&mut self, index: usize) {
        for store in self.stores.values_mut() {
            store.reset_at(index);
        }
    }

    /// Returns the identifier `C` is registered under, if any.
    #[must_use]
    pub fn type_id_of<C: Component>(&self) -> Option<ComponentTypeId> {
        self.by_type.get(&TypeId::of::<C>()).copied()
    }

    /// Returns whether `type_id` is bound.
    #[inline]
    #[must_use]
    pub fn contains(&self, type_id: ComponentTypeId) -> bool {
        self.stores.contains_key(&type_id)
    }

    /// Number of registered component types.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether no component type is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Registered identifiers in ascending order.
    pub fn type_ids(&self) -> impl Iterator<Item = ComponentTypeId> + '_ {
        self.stores.keys().copied()
    }

    /// A registry with the same bindings and every store at its defaults.
    #[must_use]
    pub fn fresh(&self) -> Self {
        Self {
            stores: self
                .stores
                .iter()
                .map(|(type_id, store)| (*type_id, store.fresh()))
                .collect(),
            by_type: self.by_type.clone(),
            capacity: self.capacity,
        }
    }
}

fn mismatch<C: Component>(type_id: ComponentTypeId, stored: &'static str) -> PoolError {
    PoolError::TypeMismatch {
        type_id,
        stored,
        requested: type_name::<C>(),
    }
}
