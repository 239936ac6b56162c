//! A small webhook sink that plays the part of the dispatch desk.
//!
//! The dispatch poller POSTs an order-ready event here for every order it sweeps. The receiver records each
//! delivery in memory and acknowledges it with a 200, which is the signal the poller needs before it marks the
//! order as processed. The stored notifications can be listed over `GET /notifications` to eyeball what has
//! arrived.
//!
//! Nothing here is durable. Restarting the receiver empties the log, which is fine: the order server is the
//! system of record, and any order that was not acknowledged will simply be delivered again.

pub mod config;
pub mod routes;
pub mod server;
pub mod store;
