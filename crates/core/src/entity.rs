//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities keep their identity while their attributes change; two entities
/// with the same id are the same entity even if every other field differs.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
