use std::time::Duration;

use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use serde_json::json;
use ss_common::Centavos;
use swapshop_engine::{
    cache::{OrderCache, PENDING_ORDERS_KEY},
    db_types::{Order, OrderId, OrderItem, OrderStatus, OrderSummary},
    OrderFlowApi,
};

use super::{
    helpers::{get_request, post_request},
    mocks::MockOrderManager,
};
use crate::routes::{
    CreateOrderRoute,
    MarkAsProcessedRoute,
    OrderByIdRoute,
    PendingOrdersRoute,
    ProcessedOrdersRoute,
};

const CREATED_ORDER_JSON: &str = r#"{"id":"11df9f8b","cliente":"Ana","items":[{"producto":"camiseta","talla":"M","color":"azul","cantidad":2,"precio_unitario":10.0}],"total":20.0,"estado":"PENDING","created_at":"2026-02-28T09:30:00Z"}"#;

const PENDING_JSON: &str = r#"[{"id":"0000002","cliente":"Luz","total":150.0,"estado":"PENDING","created_at":"2026-03-15T18:30:00Z"},{"id":"0000001","cliente":"Ana","total":20.0,"estado":"PENDING","created_at":"2026-02-28T09:30:00Z"}]"#;

const PROCESSED_JSON: &str = r#"[{"id":"0000003","cliente":"Marta","total":99.5,"estado":"PROCESSED","created_at":"2026-03-20T10:00:00Z"}]"#;

fn order_request_body() -> serde_json::Value {
    json!({
        "cliente": "Ana",
        "items": [
            { "producto": "camiseta", "talla": "M", "color": "azul", "cantidad": 2, "precio_unitario": 10.0 }
        ]
    })
}

fn sample_order() -> Order {
    Order {
        id: OrderId("11df9f8b".into()),
        cliente: "Ana".to_string(),
        items: vec![OrderItem {
            producto: "camiseta".to_string(),
            talla: "M".to_string(),
            color: "azul".to_string(),
            cantidad: 2,
            precio_unitario: Centavos::from(1000),
        }],
        total: Centavos::from(2000),
        estado: OrderStatus::Pending,
        created_at: Utc.with_ymd_and_hms(2026, 2, 28, 9, 30, 0).unwrap(),
    }
}

// Newest first, matching the listing order the store hands back.
fn pending_summaries() -> Vec<OrderSummary> {
    vec![
        OrderSummary {
            id: OrderId("0000002".into()),
            cliente: "Luz".to_string(),
            total: Centavos::from(15_000),
            estado: OrderStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2026, 3, 15, 18, 30, 0).unwrap(),
        },
        OrderSummary {
            id: OrderId("0000001".into()),
            cliente: "Ana".to_string(),
            total: Centavos::from(2_000),
            estado: OrderStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2026, 2, 28, 9, 30, 0).unwrap(),
        },
    ]
}

fn processed_summaries() -> Vec<OrderSummary> {
    vec![OrderSummary {
        id: OrderId("0000003".into()),
        cliente: "Marta".to_string(),
        total: Centavos::from(9_950),
        estado: OrderStatus::Processed,
        created_at: Utc.with_ymd_and_hms(2026, 3, 20, 10, 0, 0).unwrap(),
    }]
}

fn configure_create(cfg: &mut ServiceConfig) {
    let mut orders = MockOrderManager::new();
    orders.expect_insert_order().returning(|new_order| {
        let total = new_order.total();
        Ok(Order {
            id: OrderId("11df9f8b".into()),
            cliente: new_order.cliente,
            items: new_order.items,
            total,
            estado: OrderStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2026, 2, 28, 9, 30, 0).unwrap(),
        })
    });
    let api = OrderFlowApi::new(orders, OrderCache::disabled());
    cfg.service(CreateOrderRoute::<MockOrderManager>::new()).app_data(web::Data::new(api));
}

#[actix_web::test]
async fn create_order_returns_the_stored_order() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("/orders", &order_request_body(), configure_create).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, CREATED_ORDER_JSON);
}

#[actix_web::test]
async fn create_order_rejects_zero_cantidad() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "cliente": "Ana",
        "items": [
            { "producto": "camiseta", "talla": "M", "color": "azul", "cantidad": 0, "precio_unitario": 10.0 }
        ]
    });
    let (status, body) = post_request("/orders", &body, configure_create).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        r#"{"error":"Order conversion error. Could not convert the request into a new order. cantidad must be at least 1 for camiseta"}"#
    );
}

#[actix_web::test]
async fn create_order_rejects_an_empty_item_list() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "cliente": "Ana", "items": [] });
    let (status, body) = post_request("/orders", &body, configure_create).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        r#"{"error":"Order conversion error. Could not convert the request into a new order. an order needs at least one item"}"#
    );
}

#[actix_web::test]
async fn fetch_pending_orders() {
    let _ = env_logger::try_init().ok();
    let configure = |cfg: &mut ServiceConfig| {
        let mut orders = MockOrderManager::new();
        orders.expect_fetch_orders_by_status().returning(|_| Ok(pending_summaries()));
        let api = OrderFlowApi::new(orders, OrderCache::disabled());
        cfg.service(PendingOrdersRoute::<MockOrderManager>::new()).app_data(web::Data::new(api));
    };
    let (status, body) = get_request("/orders/pending", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PENDING_JSON);
}

#[actix_web::test]
async fn fetch_processed_orders() {
    let _ = env_logger::try_init().ok();
    let configure = |cfg: &mut ServiceConfig| {
        let mut orders = MockOrderManager::new();
        orders.expect_fetch_orders_by_status().returning(|_| Ok(processed_summaries()));
        let api = OrderFlowApi::new(orders, OrderCache::disabled());
        cfg.service(ProcessedOrdersRoute::<MockOrderManager>::new()).app_data(web::Data::new(api));
    };
    let (status, body) = get_request("/orders/processed", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PROCESSED_JSON);
}

#[actix_web::test]
async fn warm_cache_short_circuits_the_store() {
    let _ = env_logger::try_init().ok();
    let cache = OrderCache::in_memory(Duration::from_secs(60));
    cache.set_json(PENDING_ORDERS_KEY, &pending_summaries()).await;
    let mut orders = MockOrderManager::new();
    orders.expect_fetch_orders_by_status().times(0);
    let configure = move |cfg: &mut ServiceConfig| {
        let api = OrderFlowApi::new(orders, cache);
        cfg.service(PendingOrdersRoute::<MockOrderManager>::new()).app_data(web::Data::new(api));
    };
    let (status, body) = get_request("/orders/pending", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PENDING_JSON);
}

#[actix_web::test]
async fn fetch_order_by_id() {
    let _ = env_logger::try_init().ok();
    let configure = |cfg: &mut ServiceConfig| {
        let mut orders = MockOrderManager::new();
        orders.expect_fetch_order_by_id().returning(|_| Ok(Some(sample_order())));
        let api = OrderFlowApi::new(orders, OrderCache::disabled());
        cfg.service(OrderByIdRoute::<MockOrderManager>::new()).app_data(web::Data::new(api));
    };
    let (status, body) = get_request("/orders/11df9f8b", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, CREATED_ORDER_JSON);
}

#[actix_web::test]
async fn fetch_an_unknown_order() {
    let _ = env_logger::try_init().ok();
    let configure = |cfg: &mut ServiceConfig| {
        let mut orders = MockOrderManager::new();
        orders.expect_fetch_order_by_id().returning(|_| Ok(None));
        let api = OrderFlowApi::new(orders, OrderCache::disabled());
        cfg.service(OrderByIdRoute::<MockOrderManager>::new()).app_data(web::Data::new(api));
    };
    let (status, body) = get_request("/orders/no-such-order", configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"The data was not found. Order #no-such-order"}"#);
}

#[actix_web::test]
async fn mark_an_order_as_processed() {
    let _ = env_logger::try_init().ok();
    let configure = |cfg: &mut ServiceConfig| {
        let mut orders = MockOrderManager::new();
        orders.expect_update_order_status().returning(|id, status| {
            Ok(Some(OrderSummary {
                id: id.clone(),
                cliente: "Ana".to_string(),
                total: Centavos::from(2_000),
                estado: status,
                created_at: Utc.with_ymd_and_hms(2026, 2, 28, 9, 30, 0).unwrap(),
            }))
        });
        let api = OrderFlowApi::new(orders, OrderCache::disabled());
        cfg.service(MarkAsProcessedRoute::<MockOrderManager>::new()).app_data(web::Data::new(api));
    };
    let (status, body) = post_request("/orders/11df9f8b/mark-processed", &json!({}), configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"message":"Order #11df9f8b is processed."}"#);
}

#[actix_web::test]
async fn mark_as_processed_when_no_row_matches() {
    let _ = env_logger::try_init().ok();
    let configure = |cfg: &mut ServiceConfig| {
        let mut orders = MockOrderManager::new();
        orders.expect_update_order_status().returning(|_, _| Ok(None));
        let api = OrderFlowApi::new(orders, OrderCache::disabled());
        cfg.service(MarkAsProcessedRoute::<MockOrderManager>::new()).app_data(web::Data::new(api));
    };
    let (status, body) = post_request("/orders/11df9f8b/mark-processed", &json!({}), configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"The data was not found. Order #11df9f8b"}"#);
}
