//! # Component Contract
//!
//! Components are plain data records stored by value in dense per-type
//! stores. Every component type declares whether an instance is present for
//! its slot and which value a freshly allocated slot starts with.

use std::fmt;

/// Stable small-integer identifier for a registered component type.
///
/// Identifiers are chosen by the application and bound once per concrete
/// type at registration time. The registry refuses to bind one identifier to
/// two types or one type to two identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ComponentTypeId(u16);

impl ComponentTypeId {
    /// Creates an identifier from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for values that can live in a component store.
///
/// Components must be:
/// - `Copy`: reads hand out copies, never references into the store
/// - `Default`: the canonical value for an unpopulated slot
///
/// # Example
///
/// ```rust
/// use slotforge_core::Component;
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// struct Health {
///     hp: i32,
///     active: bool,
/// }
///
/// impl Component for Health {
///     fn exists(&self) -> bool {
///         self.active
///     }
/// }
///
/// assert!(!Health::default_value().exists());
/// ```
pub trait Component: Copy + Default + 'static {
    /// Whether this instance is populated for its slot.
    fn exists(&self) -> bool;

    /// The value a slot holds right after its entity is allocated.
    #[inline]
    #[must_use]
    fn default_value() -> Self {
        Self::default()
    }
}
