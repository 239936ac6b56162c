use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use swapshop_engine::{cache::OrderCache, AuthApi, OrderFlowApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        CreateOrderRoute,
        LoginRoute,
        MarkAsProcessedRoute,
        OrderByIdRoute,
        PendingOrdersRoute,
        ProcessedOrdersRoute,
        RegisterRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let cache = OrderCache::connect(&config.cache).await;
    let srv = create_server_instance(config, db, cache)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    cache: OrderCache,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), cache.clone());
        let auth_api = AuthApi::new(db.clone(), config.token_expiry);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("swapshop::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(auth_api))
            .service(health)
            // The fixed list views must be registered ahead of the {id} matcher.
            .service(PendingOrdersRoute::<SqliteDatabase>::new())
            .service(ProcessedOrdersRoute::<SqliteDatabase>::new())
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(MarkAsProcessedRoute::<SqliteDatabase>::new())
            .service(RegisterRoute::<SqliteDatabase>::new())
            .service(LoginRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
