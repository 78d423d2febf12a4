//! SQLite backend for the TapRight reward store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every statement runs on that one
//! connection thread, which is what makes the conditional notification insert
//! atomic with respect to concurrent evaluations.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
