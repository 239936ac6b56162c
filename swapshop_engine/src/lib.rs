//! Swap Shop Order Engine
//!
//! This library contains the core logic of the Swap Shop order pipeline: the order store, the TTL-bounded side
//! cache in front of it, and the APIs that tie the two together. It is the backend for the Swap Shop server; the
//! dispatch poller and the notification receiver talk to that server over HTTP and never touch this crate's
//! storage directly.
//!
//! The library is divided into three main sections:
//! 1. Database management and control. The backend contracts live in [`mod@traits`] and the SQLite implementation
//!    behind the `sqlite` feature. You should never need to access the database directly; use the public API
//!    instead. The exception is the data types, which are defined in [`mod@db_types`] and are public.
//! 2. The cache layer ([`mod@cache`]). A cache-aside snapshot store that is never authoritative: every failure
//!    mode collapses into a miss, so the pipeline runs unchanged (only slower) when the cache is cold, expired or
//!    down.
//! 3. The public API ([`OrderFlowApi`] and [`AuthApi`]). This is where the cache-aside protocol is enforced:
//!    reads populate, writes invalidate, and the store always wins.
pub mod cache;
pub mod db_types;
pub mod helpers;
mod shop_api;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use shop_api::{auth_api::AuthApi, errors::OrderFlowError, order_flow_api::OrderFlowApi};
pub use traits::{AuthApiError, AuthManagement, OrderManagement, OrderStoreError};
