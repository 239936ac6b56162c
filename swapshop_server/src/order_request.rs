use log::trace;
use serde::{Deserialize, Serialize};
use ss_common::Centavos;
use swapshop_engine::db_types::{NewOrder, OrderItem};

use crate::errors::OrderConversionError;

/// The wire shape of an order creation request, exactly as clients post it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub cliente: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub producto: String,
    pub talla: String,
    pub color: String,
    pub cantidad: i64,
    pub precio_unitario: Centavos,
}

impl TryFrom<OrderRequest> for NewOrder {
    type Error = OrderConversionError;

    fn try_from(value: OrderRequest) -> Result<Self, Self::Error> {
        trace!("Converting OrderRequest to NewOrder: {value:?}");
        if value.cliente.trim().is_empty() {
            return Err(OrderConversionError("cliente must not be empty".to_string()));
        }
        if value.items.is_empty() {
            return Err(OrderConversionError("an order needs at least one item".to_string()));
        }
        let mut items = Vec::with_capacity(value.items.len());
        let mut total = Centavos::default();
        for item in value.items {
            if item.cantidad < 1 {
                return Err(OrderConversionError(format!("cantidad must be at least 1 for {}", item.producto)));
            }
            if item.precio_unitario.value() <= 0 {
                return Err(OrderConversionError(format!("precio_unitario must be positive for {}", item.producto)));
            }
            // The total is computed with checked arithmetic here, so an absurd cantidad is rejected at the
            // boundary instead of overflowing inside the engine.
            let subtotal = item
                .precio_unitario
                .checked_mul(item.cantidad)
                .ok_or_else(|| OrderConversionError(format!("the subtotal for {} is too large", item.producto)))?;
            total = total
                .checked_add(subtotal)
                .ok_or_else(|| OrderConversionError("the order total is too large".to_string()))?;
            items.push(OrderItem {
                producto: item.producto,
                talla: item.talla,
                color: item.color,
                cantidad: item.cantidad,
                precio_unitario: item.precio_unitario,
            });
        }
        trace!("The order for {} totals {total} across {} items", value.cliente, items.len());
        Ok(NewOrder::new(value.cliente, items))
    }
}
