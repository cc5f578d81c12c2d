//! # Entity Slots
//!
//! Entities are plain indices into every per-entity array. The slot table
//! tracks which indices are active, the tag each active entity was created
//! with, and a generation counter bumped on every release so handles can
//! tell a recycled slot from the one they were issued for.

use std::fmt;

use crate::error::{PoolError, PoolResult};

/// Index of an entity slot.
///
/// Not stable across recycling: once a slot is released the same index is
/// reissued to the next created entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates an entity ID from a raw slot index.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the slot index as a `usize`, ready for indexing stores.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-slot liveness, tags and generations for a fixed number of entities.
///
/// Allocation always hands out the lowest free index, so identifiers stay
/// dense without a free list.
pub struct EntitySlotTable {
    active: Box<[bool]>,
    tags: Box<[String]>,
    generations: Box<[u32]>,
    alive_count: usize,
}

impl EntitySlotTable {
    /// Creates a table with `capacity` free slots.
    ///
    /// # Panics
    ///
    /// Panics if capacity exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(
            u32::try_from(capacity).is_ok(),
            "Capacity cannot exceed u32::MAX"
        );

        Self {
            active: vec![false; capacity].into_boxed_slice(),
            tags: vec![String::new(); capacity].into_boxed_slice(),
            generations: vec![0; capacity].into_boxed_slice(),
            alive_count: 0,
        }
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.active.len()
    }

    /// Returns the number of active slots.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Claims the lowest free slot and records `tag` for it.
    ///
    /// # Errors
    ///
    /// [`PoolError::CapacityExhausted`] if every slot is active.
    // `new` guarantees every index fits in u32
    #[allow(clippy::cast_possible_truncation)]
    pub fn allocate(&mut self, tag: &str) -> PoolResult<EntityId> {
        let Some(index) = self.active.iter().position(|active| !active) else {
            return Err(PoolError::CapacityExhausted {
                capacity: self.capacity(),
            });
        };

        self.active[index] = true;
        tag.clone_into(&mut self.tags[index]);
        self.alive_count += 1;

        Ok(EntityId::new(index as u32))
    }

    /// Releases an active slot. Component data at the index is left as is.
    ///
    /// # Errors
    ///
    /// [`PoolError::IndexOutOfRange`] for an index past the capacity,
    /// [`PoolError::InactiveEntityAccess`] if the slot is already free.
    pub fn deallocate(&mut self, id: EntityId) -> PoolResult<()> {
        self.check_active(id)?;

        let idx = id.index();
        self.active[idx] = false;
        self.tags[idx].clear();
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.alive_count -= 1;
        Ok(())
    }

    /// Returns whether `id` names an active slot.
    #[inline]
    #[must_use]
    pub fn is_active(&self, id: EntityId) -> bool {
        self.active.get(id.index()).copied().unwrap_or(false)
    }

    /// Checks that `id` is in range and active.
    ///
    /// # Errors
    ///
    /// [`PoolError::IndexOutOfRange`] or [`PoolError::InactiveEntityAccess`].
    pub fn check_active(&self, id: EntityId) -> PoolResult<()> {
        match self.active.get(id.index()) {
            None => Err(PoolError::IndexOutOfRange {
                entity: id,
                capacity: self.capacity(),
            }),
            Some(false) => Err(PoolError::InactiveEntityAccess(id)),
            Some(true) => Ok(()),
        }
    }

    /// Returns the tag of an active slot.
    #[inline]
    #[must_use]
    pub fn tag(&self, id: EntityId) -> Option<&str> {
        if self.is_active(id) {
            self.tags.get(id.index()).map(String::as_str)
        } else {
            None
        }
    }

    /// Returns the slot's generation, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn generation(&self, id: EntityId) -> Option<u32> {
        self.generations.get(id.index()).copied()
    }

    /// Iterates over active slots in index order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter_active(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(index, _)| EntityId::new(index as u32))
    }
}
