use actix_web::{middleware::Logger, web, App, HttpServer};
use log::*;

use crate::{
    config::ReceiverConfig,
    routes::{health, notifications, order_ready},
    store::NotificationLog,
};

pub async fn run_receiver(config: ReceiverConfig) -> std::io::Result<()> {
    let log = NotificationLog::new();
    info!("📨 Notification receiver listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("swapshop::access_log"))
            .app_data(web::Data::new(log.clone()))
            .service(health)
            .service(order_ready)
            .service(notifications)
    })
    .bind((config.host, config.port))?
    .run()
    .await
}
