use thiserror::Error;

use crate::db_types::{NewOrder, Order, OrderId, OrderStatus, OrderSummary};

/// The `OrderManagement` trait defines the contract an order store backend must expose.
///
/// The store is the source of truth for all order state. Everything the cache layer holds is derived from the
/// results of these methods and can be discarded at any time.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Takes a new order and, in a single atomic transaction, stores the order row together with every one of its
    /// line items. Assigns the order id, computes the total and stamps the creation time. Either the entire order
    /// is stored, or nothing is.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError>;

    /// Fetches the full order record, including line items in their original insertion order. Returns `None` if no
    /// order with this id exists.
    async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderStoreError>;

    /// Fetches the summaries of every order in the given state, newest first.
    async fn fetch_orders_by_status(&self, status: OrderStatus) -> Result<Vec<OrderSummary>, OrderStoreError>;

    /// Transitions an order to `new_status` as a single compare-and-set statement. Returns the updated summary,
    /// or `None` if no row changed. `None` covers both an unknown id and an order that has already left the
    /// predecessor state, so repeated transitions are not reported as success.
    async fn update_order_status(
        &self,
        id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<Option<OrderSummary>, OrderStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum OrderStoreError {
    #[error("There is an internal database engine error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for OrderStoreError {
    fn from(e: sqlx::Error) -> Self {
        OrderStoreError::DatabaseError(e.to_string())
    }
}
