//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own: two with the same attribute
/// values are the same value. An invoice line is a value object (a snapshot of
/// item name, quantity and price); a customer is an entity (same id, same
/// customer, whatever the field values).
///
/// Implementors should stay immutable: "modifying" a value object means
/// building a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
