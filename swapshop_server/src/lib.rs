//! # Swap Shop server
//! This module hosts the HTTP surface of the swap shop order pipeline. It is responsible for:
//! Accepting new orders and validating them at the boundary.
//! Serving the order listings the dispatch poller sweeps, and the mark-processed transition it reports back to.
//! Registering users and issuing bearer tokens.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/orders`: Order creation, single-order reads, the pending and processed listings, and the mark-processed
//!   transition.
//! * `/auth`: User registration and login.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod order_request;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
