//! `POST /location/check`: evaluate one location sample.
//!
//! The body is a [`LocationSample`]. The response keeps the shape mobile
//! clients already parse:
//!
//! ```json
//! {"found": false, "message": "No merchants nearby"}
//! {"found": true, "merchant": "Target", "category": "retail",
//!  "throttled": true, "message": "Already notified recently"}
//! {"found": true, "recommendation": {"merchant_name": "...", ...}}
//! ```

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use tapright_core::{
  category::Category,
  engine::{Engine, LocationSample, Outcome, Recommendation},
  poi::PointOfInterest,
  reward::RewardRate,
  store::RewardStore,
};

use crate::error::ApiError;

pub const NOT_FOUND_MESSAGE: &str = "No merchants nearby";
pub const THROTTLED_MESSAGE: &str = "Already notified recently";
pub const NO_CARDS_MESSAGE: &str = "No cards in wallet";
pub const NO_MATCH_MESSAGE: &str = "No matching rewards";

// ─── Response ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize)]
pub struct CheckResponse {
  pub found:          bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub merchant:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:       Option<Category>,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub throttled:      bool,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub no_cards:       bool,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub no_match:       bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub recommendation: Option<RecommendationBody>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationBody {
  pub merchant_name:    String,
  pub category:         Category,
  pub recommended_card: String,
  pub reward_rate:      RewardRate,
  pub message:          String,
}

impl From<Recommendation> for RecommendationBody {
  fn from(r: Recommendation) -> Self {
    Self {
      merchant_name:    r.poi.name,
      category:         r.poi.category,
      recommended_card: r.card.name,
      reward_rate:      r.rate,
      message:          r.message,
    }
  }
}

impl CheckResponse {
  fn at(poi: PointOfInterest, message: &str) -> Self {
    Self {
      found: true,
      merchant: Some(poi.name),
      category: Some(poi.category),
      message: Some(message.to_owned()),
      ..Self::default()
    }
  }
}

impl From<Outcome> for CheckResponse {
  fn from(outcome: Outcome) -> Self {
    match outcome {
      Outcome::NotFound => Self {
        message: Some(NOT_FOUND_MESSAGE.to_owned()),
        ..Self::default()
      },
      Outcome::Throttled { poi } => {
        Self { throttled: true, ..Self::at(poi, THROTTLED_MESSAGE) }
      }
      Outcome::NoCards { poi } => {
        Self { no_cards: true, ..Self::at(poi, NO_CARDS_MESSAGE) }
      }
      Outcome::NoMatch { poi } => {
        Self { no_match: true, ..Self::at(poi, NO_MATCH_MESSAGE) }
      }
      Outcome::Recommended(rec) => Self {
        found: true,
        recommendation: Some(rec.into()),
        ..Self::default()
      },
    }
  }
}

// ─── Handler ─────────────────────────────────────────────────────────────────

/// `POST /location/check`
pub async fn check<S>(
  State(engine): State<Arc<Engine<S>>>,
  Json(sample): Json<LocationSample>,
) -> Result<Json<CheckResponse>, ApiError>
where
  S: RewardStore,
{
  let outcome = engine.evaluate(&sample, Utc::now()).await?;
  tracing::info!(user_id = %sample.user_id, outcome = outcome.kind(), "location checked");
  Ok(Json(outcome.into()))
}
