//! `SqliteDatabase` is a concrete implementation of the order pipeline store.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{auth, db_url, new_pool, orders};
use crate::{
    db_types::{AuthToken, NewOrder, NewUser, Order, OrderId, OrderStatus, OrderSummary, User},
    traits::{AuthApiError, AuthManagement, OrderManagement, OrderStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connects to the database given by the `SWAPSHOP_DATABASE_URL` environment variable, or the default path if
    /// it is not set.
    pub async fn new(max_connections: u32) -> Result<Self, OrderStoreError> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, OrderStoreError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_order(order, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order {} for {} has been saved. Total: {}", order.id, order.cliente, order.total);
        Ok(order)
    }

    async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_id(id, &mut conn).await
    }

    async fn fetch_orders_by_status(&self, status: OrderStatus) -> Result<Vec<OrderSummary>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders_by_status(status, &mut conn).await
    }

    async fn update_order_status(
        &self,
        id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<Option<OrderSummary>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let result = orders::update_order_status(id, new_status, &mut conn).await?;
        match &result {
            Some(order) => debug!("🗃️ Order {} is now {}", order.id, order.estado),
            None => trace!("🗃️ Status update for order {id} did not match any row"),
        }
        Ok(result)
    }
}

impl AuthManagement for SqliteDatabase {
    async fn insert_user(&self, user: &NewUser, password_hash: &str) -> Result<User, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = auth::insert_user(user, password_hash, &mut conn).await?;
        debug!("🗃️ User account created for {}", user.email);
        Ok(user)
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        auth::fetch_user_by_email(email, &mut conn).await
    }

    async fn insert_auth_token(&self, token: &AuthToken) -> Result<(), AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        auth::insert_auth_token(token, &mut conn).await
    }

    async fn fetch_auth_token(&self, token: &str) -> Result<Option<AuthToken>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        auth::fetch_auth_token(token, &mut conn).await
    }

    async fn purge_expired_tokens(&self) -> Result<u64, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        auth::purge_expired_tokens(&mut conn).await
    }
}
