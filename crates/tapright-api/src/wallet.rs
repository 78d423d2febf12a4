//! Handlers for `/users/{user_id}/cards` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/{user_id}/cards` | Oldest first |
//! | `POST`   | `/users/{user_id}/cards` | Body: `{"card_id":"<uuid>"}`; 201, 404 unknown card, 409 already owned |
//! | `DELETE` | `/users/{user_id}/cards/{card_id}` | 204, 404 if not in the wallet |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use tapright_core::{card::OwnedCard, engine::Engine, store::RewardStore};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users/{user_id}/cards`
pub async fn list<S>(
  State(engine): State<Arc<Engine<S>>>,
  Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<OwnedCard>>, ApiError>
where
  S: RewardStore,
{
  let cards = engine
    .store()
    .list_owned_cards(user_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(cards))
}

// ─── Add ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub card_id: Uuid,
}

/// `POST /users/{user_id}/cards`
pub async fn add<S>(
  State(engine): State<Arc<Engine<S>>>,
  Path(user_id): Path<Uuid>,
  Json(body): Json<AddBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RewardStore,
{
  let store = engine.store();
  let catalog_card = store
    .get_catalog_card(body.card_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("card {} not found", body.card_id))
    })?;

  let owned = OwnedCard::from_catalog(user_id, &catalog_card, Utc::now());
  let inserted = store
    .add_owned_card(owned.clone())
    .await
    .map_err(ApiError::store)?;
  if !inserted {
    return Err(ApiError::Conflict(format!(
      "card {} already in wallet",
      body.card_id
    )));
  }

  tracing::info!(%user_id, card = %owned.name, "card added to wallet");
  Ok((StatusCode::CREATED, Json(owned)))
}

// ─── Remove ───────────────────────────────────────────────────────────────────

/// `DELETE /users/{user_id}/cards/{card_id}`
pub async fn remove<S>(
  State(engine): State<Arc<Engine<S>>>,
  Path((user_id, card_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError>
where
  S: RewardStore,
{
  let removed = engine
    .store()
    .remove_owned_card(user_id, card_id)
    .await
    .map_err(ApiError::store)?;
  if !removed {
    return Err(ApiError::NotFound(format!(
      "card {card_id} not found in wallet"
    )));
  }
  Ok(StatusCode::NO_CONTENT)
}
