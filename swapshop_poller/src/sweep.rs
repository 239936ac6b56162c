use std::{
    fmt,
    fmt::Display,
    time::Duration,
};

use anyhow::{anyhow, Result};
use log::*;
use reqwest::StatusCode;
use ss_common::OrderReadyEvent;
use swapshop_engine::db_types::OrderSummary;

use crate::client::{ShopApiClient, WebhookNotifier};

/// The outcome of a single sweep over the pending queue.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepStats {
    pub notified: usize,
    pub left_pending: usize,
}

impl Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} orders notified, {} left pending", self.notified, self.left_pending)
    }
}

/// A notification only counts as delivered on a 200 exactly. Anything else and the order stays pending for the
/// next sweep.
pub fn is_delivered(status: StatusCode) -> bool {
    status == StatusCode::OK
}

/// Fetches the pending queue once and tries to dispatch every order in it. A failure on one order never blocks
/// the others.
pub async fn run_sweep(api: &ShopApiClient, webhook: &WebhookNotifier) -> Result<SweepStats> {
    let pending = api.pending_orders().await?;
    if pending.is_empty() {
        debug!("📡 No pending orders to dispatch");
        return Ok(SweepStats::default());
    }
    info!("📡 {} pending orders to dispatch", pending.len());
    let mut stats = SweepStats::default();
    for order in pending {
        match dispatch_order(api, webhook, &order).await {
            Ok(()) => stats.notified += 1,
            Err(e) => {
                warn!("📡 Order {} stays pending. {e}", order.id);
                stats.left_pending += 1;
            },
        }
    }
    Ok(stats)
}

fn order_ready_event(order: &OrderSummary) -> OrderReadyEvent {
    OrderReadyEvent::new(order.id.as_str(), order.cliente.as_str(), order.total)
}

/// Notifies the receiver about one order and only then marks it processed on the server. If anything fails along
/// the way the order is left pending, so a later sweep will deliver the notification again.
async fn dispatch_order(api: &ShopApiClient, webhook: &WebhookNotifier, order: &OrderSummary) -> Result<()> {
    let event = order_ready_event(order);
    let status = webhook.notify(&event).await?;
    if !is_delivered(status) {
        return Err(anyhow!("The receiver answered {status} instead of 200 OK"));
    }
    api.mark_processed(&order.id).await?;
    info!("📡 Order {} dispatched to the receiver", order.id);
    Ok(())
}

/// Sweeps on a fixed cadence until a shutdown signal arrives.
pub async fn poll_loop(api: ShopApiClient, webhook: WebhookNotifier, period: Duration) {
    let mut timer = tokio::time::interval(period);
    info!("📡 Dispatch poller running. Sweeping every {}s", period.as_secs());
    loop {
        tokio::select! {
            _ = timer.tick() => {
                match run_sweep(&api, &webhook).await {
                    Ok(stats) if stats.notified + stats.left_pending > 0 => info!("📡 Sweep complete. {stats}"),
                    Ok(_) => {},
                    Err(e) => error!("📡 Sweep failed: {e}"),
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("📡 Shutdown signal received. Stopping the poller.");
                break;
            },
        }
    }
}
