//! Core types and decision logic for TapRight.
//!
//! Given a user's position, their wallet and a catalog of merchants, the
//! [`engine::Engine`] decides whether the user is inside a merchant's
//! geofence, whether they were already notified about it recently, and which
//! of their cards earns the most there.
//!
//! No HTTP or database code lives here. Storage is reached through the
//! [`store::RewardStore`] trait.

// Trait methods spell out `Send` futures; impls use plain `async fn`.
#![allow(async_fn_in_trait)]

pub mod card;
pub mod catalog;
pub mod category;
pub mod engine;
pub mod error;
pub mod geo;
pub mod notification;
pub mod poi;
pub mod reward;
pub mod store;
pub mod throttle;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
