use serde::{Deserialize, Serialize};

use crate::Centavos;

pub const ORDER_READY_EVENT: &str = "ORDER_READY";

/// The webhook payload announcing that an order is ready for dispatch.
///
/// This is the wire contract between the dispatch poller and any notification receiver, so the field names are
/// fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReadyEvent {
    pub evento: String,
    pub order_id: String,
    pub cliente: String,
    pub total: Centavos,
}

impl OrderReadyEvent {
    pub fn new<S1: Into<String>, S2: Into<String>>(order_id: S1, cliente: S2, total: Centavos) -> Self {
        Self { evento: ORDER_READY_EVENT.into(), order_id: order_id.into(), cliente: cliente.into(), total }
    }

    pub fn is_order_ready(&self) -> bool {
        self.evento == ORDER_READY_EVENT
    }
}
