//! Domain error types and their user-visible classification.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::{CategoryError, ProductError};
use crate::money::MoneyError;
use crate::order::OrderError;

/// Umbrella error over all aggregate-level failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A money value was malformed or an operation would violate
    /// non-negativity.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A category invariant was violated.
    #[error(transparent)]
    Category(#[from] CategoryError),

    /// A product invariant was violated.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// A cart invariant was violated.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// An order invariant or state-machine rule was violated.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Coarse classification of errors for the transport boundary.
///
/// Transports map these to their own status vocabulary without matching
/// on messages. None of them represent transient failures; nothing here
/// should be retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input; recoverable by correcting it.
    InvalidArgument,

    /// An illegal state-machine transition.
    InvalidState,

    /// A referenced aggregate is absent or not active.
    NotFound,

    /// A business rule spanning aggregates was violated.
    Conflict,

    /// An unexpected internal failure, reported opaquely.
    Internal,
}

impl DomainError {
    /// Returns the user-visible category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Money(_)
            | DomainError::Category(_)
            | DomainError::Product(_)
            | DomainError::Cart(_) => ErrorKind::InvalidArgument,
            DomainError::Order(e) => match e {
                OrderError::InvalidQuantity { .. } => ErrorKind::InvalidArgument,
                OrderError::InvalidTransition { .. }
                | OrderError::CannotCancel { .. }
                | OrderError::ItemsLocked { .. } => ErrorKind::InvalidState,
            },
        }
    }
}
