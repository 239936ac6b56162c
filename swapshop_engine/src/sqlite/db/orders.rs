use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderItem, OrderStatus, OrderSummary},
    traits::OrderStoreError,
};

/// Inserts a new order and all of its line items using the given connection. This is not atomic by itself. Embed
/// this call inside a transaction and pass `&mut *tx` as the connection argument to get all-or-nothing behaviour.
///
/// The order id, the total and the creation timestamp are assigned here. The total is the sum of the line item
/// subtotals and is never recomputed after this point.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderStoreError> {
    let summary: OrderSummary = sqlx::query_as(
        r#"
            INSERT INTO orders (id, cliente, total, estado, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, cliente, total, estado, created_at;
        "#,
    )
    .bind(OrderId::new())
    .bind(&order.cliente)
    .bind(order.total())
    .bind(OrderStatus::Pending)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;
    for item in &order.items {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, producto, talla, color, cantidad, precio_unitario)
            VALUES ($1, $2, $3, $4, $5, $6);
        "#,
        )
        .bind(summary.id.as_str())
        .bind(&item.producto)
        .bind(&item.talla)
        .bind(&item.color)
        .bind(item.cantidad)
        .bind(item.precio_unitario)
        .execute(&mut *conn)
        .await?;
    }
    debug!("📝️ Order {} saved with {} line items", summary.id, order.items.len());
    Ok(Order::from_parts(summary, order.items))
}

/// Returns the full order record for the given id, including line items in insertion order.
pub async fn fetch_order_by_id(id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, OrderStoreError> {
    let summary: Option<OrderSummary> =
        sqlx::query_as("SELECT id, cliente, total, estado, created_at FROM orders WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&mut *conn)
            .await?;
    let Some(summary) = summary else { return Ok(None) };
    let items = fetch_items_for_order(&summary.id, conn).await?;
    Ok(Some(Order::from_parts(summary, items)))
}

/// Returns the line items of an order, in the order they were inserted.
pub async fn fetch_items_for_order(
    id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderItem>, OrderStoreError> {
    let items = sqlx::query_as(
        "SELECT producto, talla, color, cantidad, precio_unitario FROM order_items WHERE order_id = $1 ORDER BY id",
    )
    .bind(id.as_str())
    .fetch_all(conn)
    .await?;
    Ok(items)
}

/// Returns the summaries of all orders in the given state, newest first.
pub async fn fetch_orders_by_status(
    status: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderSummary>, OrderStoreError> {
    let orders = sqlx::query_as(
        "SELECT id, cliente, total, estado, created_at FROM orders WHERE estado = $1 ORDER BY created_at DESC",
    )
    .bind(status)
    .fetch_all(conn)
    .await?;
    Ok(orders)
}

/// Transitions an order to `new_status` as a single compare-and-set statement. The WHERE clause only matches rows
/// still in the predecessor state, so a repeated call, or a call with an unknown id, changes nothing and returns
/// `None`. Orders never move back to `PENDING`.
pub(crate) async fn update_order_status(
    id: &OrderId,
    new_status: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<Option<OrderSummary>, OrderStoreError> {
    if new_status == OrderStatus::Pending {
        return Ok(None);
    }
    let result: Option<OrderSummary> = sqlx::query_as(
        r#"
            UPDATE orders SET estado = $1 WHERE id = $2 AND estado = $3
            RETURNING id, cliente, total, estado, created_at;
        "#,
    )
    .bind(new_status)
    .bind(id.as_str())
    .bind(OrderStatus::Pending)
    .fetch_optional(conn)
    .await?;
    Ok(result)
}
