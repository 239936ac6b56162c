use thiserror::Error;

use crate::{db_types::OrderId, traits::OrderStoreError};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    /// Covers both an id that never existed and an order that has already been processed. The store's
    /// compare-and-set cannot tell the two apart, and neither can callers.
    #[error("The requested order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error("{0}")]
    StoreError(#[from] OrderStoreError),
}
