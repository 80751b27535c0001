//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity** and are compared by their attribute values.
/// Borrow records and followup metadata are value objects: two records with the
/// same borrower and timestamps are the same record.
///
/// To "modify" a value object, build a new one. Nothing in the domain mutates a
/// value object in place after it has been attached to an item.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
