//! # The engine's public API
//!
//! The API is modular, so that clients can pick and choose the functionality they need. Each API instance is
//! created by supplying a database backend that implements the backend traits the API requires.
//!
//! * [`order_flow_api`] is the primary API for accepting orders and moving them through the dispatch flow. It
//!   owns the cache-aside protocol between the store and the cache layer.
//! * [`auth_api`] manages user registration, login and bearer token validation.
//!
//! ```rust,ignore
//! use swapshop_engine::{cache::OrderCache, OrderFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new(25).await?;
//! let cache = OrderCache::connect(&cache_config).await;
//! let api = OrderFlowApi::new(db, cache);
//! let pending = api.pending_orders().await?;
//! ```
pub mod auth_api;
pub mod errors;
pub mod order_flow_api;
