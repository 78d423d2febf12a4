//! Read-only catalog endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/cards` | Every catalog card, in seed order |
//! | `GET`  | `/pois`  | Every point of interest, in seed order |

use std::sync::Arc;

use axum::{Json, extract::State};
use tapright_core::{
  card::CatalogCard,
  engine::Engine,
  poi::PointOfInterest,
  store::RewardStore,
};

use crate::error::ApiError;

/// `GET /cards`
pub async fn list_cards<S>(
  State(engine): State<Arc<Engine<S>>>,
) -> Result<Json<Vec<CatalogCard>>, ApiError>
where
  S: RewardStore,
{
  let cards = engine
    .store()
    .list_catalog_cards()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(cards))
}

/// `GET /pois`
pub async fn list_pois<S>(
  State(engine): State<Arc<Engine<S>>>,
) -> Result<Json<Vec<PointOfInterest>>, ApiError>
where
  S: RewardStore,
{
  let pois = engine.store().list_pois().await.map_err(ApiError::store)?;
  Ok(Json(pois))
}
