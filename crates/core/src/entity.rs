//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An item keeps its identifier across every update, even though each update
/// produces a new value.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
