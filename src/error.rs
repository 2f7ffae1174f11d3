//! Typed failures raised by the store and the forms. Both are recoverable
//! from the user's point of view: the controller turns them into a notice
//! and leaves the collections untouched.

use thiserror::Error;

use crate::models::EntityKind;

/// Failures from collection mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("No {} at row {} ({len} in the list).", .kind.singular(), .index + 1)]
    IndexOutOfRange {
        kind: EntityKind,
        index: usize,
        len: usize,
    },
}

/// Presence checks that failed when submitting a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Event type description cannot be empty.")]
    EmptyDescription,
    #[error("Fill in all fields.")]
    MissingFields,
}
