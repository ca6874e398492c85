//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable: callers report the message and carry on.
/// IO failures (export, terminal) belong to the layers that perform the IO.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No product is registered under the given identifier.
    #[error("Product with ID {0} not found")]
    NotFound(ProductId),

    /// An order asked for more units than are currently in stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// An aggregate query ran against a catalog with no products.
    #[error("No products")]
    EmptyCatalog,

    /// A movement would push stock or a running total outside the `i64` range.
    #[error("Quantity overflow for {product_id}")]
    QuantityOverflow { product_id: ProductId },
}

impl DomainError {
    pub fn not_found(id: &ProductId) -> Self {
        Self::NotFound(id.clone())
    }

    pub fn insufficient_stock(id: &ProductId, requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            product_id: id.clone(),
            requested,
            available,
        }
    }

    pub fn quantity_overflow(id: &ProductId) -> Self {
        Self::QuantityOverflow {
            product_id: id.clone(),
        }
    }
}
