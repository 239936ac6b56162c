use std::fmt::Debug;

use log::*;

use crate::{
    cache::{order_key, status_key, OrderCache, PENDING_ORDERS_KEY, PROCESSED_ORDERS_KEY},
    db_types::{NewOrder, Order, OrderId, OrderStatus, OrderSummary},
    shop_api::errors::OrderFlowError,
    traits::OrderManagement,
};

/// `OrderFlowApi` is the primary API for accepting orders and moving them through the dispatch flow. It combines
/// the store (the source of truth) with the side cache, and it is the only place where the two meet.
///
/// The cache-aside rules, in one place:
/// * Reads try the cache first and fall back to the store, populating the cache on the way out.
/// * A store miss is returned as-is. Absence is never cached.
/// * Writes go to the store first, then delete the affected list-view snapshots before the call returns.
/// * Cache failures never surface. The flow behaves identically with the cache disabled, only slower.
pub struct OrderFlowApi<B> {
    db: B,
    cache: OrderCache,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, cache: OrderCache) -> Self {
        Self { db, cache }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement
{
    /// Accepts a new order. The store insert happens first; once it has committed, both list-view snapshots are
    /// stale and are deleted, and the freshly created order is seeded into its single-order key. The list
    /// deletions always run, whether or not the seeding write ends up cached.
    pub async fn create_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        let order = self.db.insert_order(order).await?;
        self.cache.delete(PENDING_ORDERS_KEY).await;
        self.cache.delete(PROCESSED_ORDERS_KEY).await;
        self.cache.set_json(&order_key(&order.id), &order).await;
        debug!("📦️ Order {} for {} accepted. Total: {}", order.id, order.cliente, order.total);
        Ok(order)
    }

    /// Fetches a single order, trying the cache first. A cache hit is returned without touching the store. On a
    /// miss the store is read, and only a found order is written back to the cache.
    pub async fn order_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderFlowError> {
        let key = order_key(id);
        if let Some(order) = self.cache.get_json::<Order>(&key).await {
            trace!("📦️ Cache hit for order {id}");
            return Ok(Some(order));
        }
        let Some(order) = self.db.fetch_order_by_id(id).await? else {
            trace!("📦️ Order {id} does not exist");
            return Ok(None);
        };
        self.cache.set_json(&key, &order).await;
        Ok(Some(order))
    }

    /// All orders waiting for dispatch, newest first.
    pub async fn pending_orders(&self) -> Result<Vec<OrderSummary>, OrderFlowError> {
        self.orders_by_status(OrderStatus::Pending).await
    }

    /// All orders that have been dispatched, newest first.
    pub async fn processed_orders(&self) -> Result<Vec<OrderSummary>, OrderFlowError> {
        self.orders_by_status(OrderStatus::Processed).await
    }

    async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<OrderSummary>, OrderFlowError> {
        let key = status_key(status);
        if let Some(orders) = self.cache.get_json::<Vec<OrderSummary>>(key).await {
            trace!("📦️ Cache hit for {key} ({} orders)", orders.len());
            return Ok(orders);
        }
        let orders = self.db.fetch_orders_by_status(status).await?;
        self.cache.set_json(key, &orders).await;
        Ok(orders)
    }

    /// Transitions an order from `PENDING` to `PROCESSED`.
    ///
    /// The store update is a single compare-and-set statement, so exactly one caller can win it. If no row
    /// changed, [`OrderFlowError::OrderNotFound`] is returned and the cache is left untouched. On success all
    /// three affected keys are deleted before returning, so the next read of any of them is a forced store
    /// round-trip.
    pub async fn mark_as_processed(&self, id: &OrderId) -> Result<OrderSummary, OrderFlowError> {
        let updated = self
            .db
            .update_order_status(id, OrderStatus::Processed)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(id.clone()))?;
        self.cache.delete(&order_key(id)).await;
        self.cache.delete(PENDING_ORDERS_KEY).await;
        self.cache.delete(PROCESSED_ORDERS_KEY).await;
        debug!("📦️ Order {id} has been marked as processed");
        Ok(updated)
    }
}
