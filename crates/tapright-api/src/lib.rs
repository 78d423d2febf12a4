//! JSON REST API for TapRight.
//!
//! Exposes an axum [`Router`] backed by an [`Engine`] over any
//! [`tapright_core::store::RewardStore`]. Auth and TLS are the caller's
//! responsibility; users are identified by the id in the path or body.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tapright_api::api_router(engine.clone()))
//! ```

pub mod catalog;
pub mod error;
pub mod location;
pub mod wallet;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{delete, get, post},
};
use serde_json::{Value, json};
use tapright_core::{engine::Engine, store::RewardStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(engine: Arc<Engine<S>>) -> Router<()>
where
  S: RewardStore + 'static,
{
  Router::new()
    .route("/", get(root))
    // Catalog
    .route("/cards", get(catalog::list_cards::<S>))
    .route("/pois", get(catalog::list_pois::<S>))
    // Wallet
    .route(
      "/users/{user_id}/cards",
      get(wallet::list::<S>).post(wallet::add::<S>),
    )
    .route("/users/{user_id}/cards/{card_id}", delete(wallet::remove::<S>))
    // Recommendations
    .route("/location/check", post(location::check::<S>))
    .with_state(engine)
}

/// `GET /`
async fn root() -> Json<Value> {
  Json(json!({
    "message": "TapRight API",
    "version": env!("CARGO_PKG_VERSION"),
  }))
}

// ─── Integration tests ────────────────────────────────────────────────────────
