use dotenvy::dotenv;
use log::*;
use swapshop_receiver::{config::ReceiverConfig, server::run_receiver};

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let config = ReceiverConfig::from_env_or_default();
    match run_receiver(config).await {
        Ok(()) => info!("📨 Bye!"),
        Err(e) => eprintln!("The receiver could not start. {e}"),
    }
}
