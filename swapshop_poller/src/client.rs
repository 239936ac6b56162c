use std::time::Duration;

use anyhow::{anyhow, Result};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    StatusCode,
};
use ss_common::OrderReadyEvent;
use swapshop_engine::db_types::{OrderId, OrderSummary};
use swapshop_server::data_objects::JsonResponse;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A thin client for the order server's dispatch endpoints.
pub struct ShopApiClient {
    client: Client,
    base: Url,
}

impl ShopApiClient {
    pub fn new(base: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent("Swap Shop Dispatch Poller")
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create reqwest client");
        ShopApiClient { client, base }
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|e| anyhow!("Failed to join URL: {e}"))
    }

    pub async fn health(&self) -> Result<String> {
        let url = self.url("/health")?;
        let res = self.client.get(url).send().await?;
        Ok(res.text().await?)
    }

    pub async fn pending_orders(&self) -> Result<Vec<OrderSummary>> {
        let url = self.url("/orders/pending")?;
        let res = self.client.get(url).send().await?;
        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            _ => {
                let msg = res.text().await?;
                Err(anyhow!("Error fetching the pending orders: {msg}"))
            },
        }
    }

    pub async fn mark_processed(&self, id: &OrderId) -> Result<()> {
        let url = self.url(&format!("/orders/{}/mark-processed", id.as_str()))?;
        let res = self.client.post(url).send().await?;
        match res.status() {
            StatusCode::OK => {
                let response = res.json::<JsonResponse>().await?;
                debug!("📡 Server confirmed: {}", response.message);
                Ok(())
            },
            StatusCode::NOT_FOUND => Err(anyhow!("Order {id} is no longer pending on the server")),
            _ => {
                let msg = res.text().await?;
                Err(anyhow!("Error marking order {id} as processed: {msg}"))
            },
        }
    }
}

/// Delivers order-ready events to the configured webhook endpoint.
pub struct WebhookNotifier {
    client: Client,
    endpoint: Url,
}

impl WebhookNotifier {
    pub fn new(endpoint: Url) -> Self {
        let client = Client::builder()
            .user_agent("Swap Shop Dispatch Poller")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create reqwest client");
        WebhookNotifier { client, endpoint }
    }

    /// Posts the event and hands the raw status code back. The caller decides what counts as delivered.
    pub async fn notify(&self, event: &OrderReadyEvent) -> Result<StatusCode> {
        let res = self.client.post(self.endpoint.clone()).json(event).send().await?;
        Ok(res.status())
    }
}
