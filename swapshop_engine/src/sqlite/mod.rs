//! SQLite database module for the order pipeline store.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
