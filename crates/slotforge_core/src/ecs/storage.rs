//! # Component Storage
//!
//! Pre-allocated, dense component storage.
//!
//! The storage uses a dense array strategy:
//! - All component slots are allocated once, at registration
//! - Access is O(1) via entity index
//! - The length never changes, so index `i` always means entity slot `i`

use std::any::{Any, TypeId};

use super::component::Component;

/// Fixed-length storage for a single component type.
///
/// # Type Parameters
///
/// * `C` - The component type to store
///
/// # Example
///
/// ```rust,ignore
/// let mut store: ComponentStore<Transform> = ComponentStore::new(1000);
/// store.set(0, Transform::at(1.0, 2.0));
/// ```
pub struct ComponentStore<C: Component> {
    data: Box<[C]>,
}

impl<C: Component> ComponentStore<C> {
    /// Creates a store with `capacity` slots, each holding the component's default value.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let data = vec![C::default_value(); capacity].into_boxed_slice();
        Self { data }
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns a copy of the component at `index`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<C> {
        self.data.get(index).copied()
    }

    /// Runs `f` against the slot at `index`.
    ///
    /// Returns `None` if `index` is out of bounds.
    #[inline]
    pub fn update<R>(&mut self, index: usize, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        self.data.get_mut(index).map(f)
    }

    /// Overwrites the slot at `index`.
    ///
    /// # Returns
    ///
    /// `true` if the component was set, `false` if index was out of bounds.
    #[inline]
    #[must_use]
    pub fn set(&mut self, index: usize, component: C) -> bool {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = component;
            true
        } else {
            false
        }
    }

    /// Resets the slot at `index` to the component's default value.
    #[inline]
    pub fn reset(&mut self, index: usize) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = C::default_value();
        }
    }

    /// Returns every slot, active or not.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }
}

/// Type-erased view of a [`ComponentStore`], held by the registry.
pub(crate) trait ErasedStore {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// `TypeId` of the stored component type.
    fn component_type(&self) -> TypeId;
    fn component_name(&self) -> &'static str;
    /// Re-defaults one slot.
    fn reset_at(&mut self, index: usize);
    /// An empty store of the same type and capacity.
    fn fresh(&self) -> Box<dyn ErasedStore>;
}

impl<C: Component> ErasedStore for ComponentStore<C> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_type(&self) -> TypeId {
        TypeId::of::<C>()
    }

    fn component_name(&self) -> &'static str {
        std::any::type_name::<C>()
    }

    fn reset_at(&mut self, index: usize) {
        self.reset(index);
    }

    fn fresh(&self) -> Box<dyn ErasedStore> {
        Box::new(Self::new(self.capacity()))
    }
}
