//! # Database backend contracts.
//!
//! This module defines the interface contracts that a database backend must implement to act as the source of
//! truth for the order pipeline.
//!
//! * [`OrderManagement`] covers the order lifecycle: atomic insertion of an order with its line items, lookups by
//!   id and by status, and the single-statement status transition used by the dispatch flow.
//! * [`AuthManagement`] covers durable user accounts and bearer tokens.
//!
//! The cache layer deliberately sits outside these traits. Backends only ever speak to the store; the cache-aside
//! protocol lives in the API layer on top of them.
mod auth_management;
mod order_management;

pub use auth_management::{AuthApiError, AuthManagement};
pub use order_management::{OrderManagement, OrderStoreError};
