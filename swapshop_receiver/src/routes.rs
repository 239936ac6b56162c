use actix_web::{get, post, web, HttpResponse, Responder};
use log::*;
use serde::Serialize;
use ss_common::OrderReadyEvent;

use crate::store::NotificationLog;

/// The acknowledgement the poller reads. Only the 200 status is contractual; the body is a courtesy.
#[derive(Debug, Serialize)]
pub struct DeliveryAck {
    pub success: bool,
    pub stored: usize,
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("👍️\n")
}

/// The webhook sink. Whatever arrives is recorded, and the 200 response is what tells the poller the
/// notification has been delivered.
#[post("/webhooks/order-ready")]
pub async fn order_ready(log: web::Data<NotificationLog>, body: web::Json<OrderReadyEvent>) -> HttpResponse {
    let event = body.into_inner();
    if !event.is_order_ready() {
        warn!("📨 Unexpected event type: {}", event.evento);
    }
    info!("📨 Order {} for {} is ready. Total: {}", event.order_id, event.cliente, event.total);
    let stored = log.record(event);
    HttpResponse::Ok().json(DeliveryAck { success: true, stored })
}

#[get("/notifications")]
pub async fn notifications(log: web::Data<NotificationLog>) -> HttpResponse {
    HttpResponse::Ok().json(log.all())
}
