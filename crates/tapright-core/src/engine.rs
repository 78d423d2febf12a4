//! The recommendation engine: location sample in, outcome out.
//!
//! One [`Engine::evaluate`] call walks a fixed sequence of steps:
//!
//! 1. validate the coordinates,
//! 2. find the nearest POI whose geofence contains them,
//! 3. stop if that POI was notified inside the cooldown window,
//! 4. load the user's wallet and pick the best card for the POI's category,
//! 5. record the notification and return the formatted recommendation.
//!
//! The throttle check runs before any reward work or log write, so the
//! throttled path has no side effects.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  Error, Result,
  card::OwnedCard,
  geo::Coordinate,
  notification::NotificationRecord,
  poi::{PointOfInterest, nearest_within_radius},
  reward::{RewardRate, best_card},
  store::RewardStore,
  throttle::{self, DEFAULT_COOLDOWN_SECS},
};

// ─── Input ───────────────────────────────────────────────────────────────────

/// A point-in-time position report from a user's device. Not persisted.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationSample {
  pub latitude:  f64,
  pub longitude: f64,
  pub user_id:   Uuid,
}

impl LocationSample {
  pub fn coordinate(&self) -> Result<Coordinate> {
    Coordinate::new(self.latitude, self.longitude)
  }
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// A card suggestion for the merchant the user is standing at.
#[derive(Debug, Clone)]
pub struct Recommendation {
  pub poi:      PointOfInterest,
  pub card:     OwnedCard,
  pub rate:     RewardRate,
  pub message:  String,
  /// `false` when the notification log write failed. The suggestion is still
  /// valid, but the next sample will not be throttled.
  pub recorded: bool,
}

/// The terminal result of one evaluation. None of these is an error.
#[derive(Debug, Clone)]
pub enum Outcome {
  /// No geofence contains the sample.
  NotFound,
  /// Inside a geofence, but the user was notified about it recently.
  Throttled { poi: PointOfInterest },
  /// Inside a geofence, but the wallet is empty.
  NoCards { poi: PointOfInterest },
  /// Inside a geofence, but no owned card earns anything there.
  NoMatch { poi: PointOfInterest },
  Recommended(Recommendation),
}

impl Outcome {
  /// The matched POI, if any.
  pub fn poi(&self) -> Option<&PointOfInterest> {
    match self {
      Self::NotFound => None,
      Self::Throttled { poi } | Self::NoCards { poi } | Self::NoMatch { poi } => {
        Some(poi)
      }
      Self::Recommended(r) => Some(&r.poi),
    }
  }

  /// Short label used in logs.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::NotFound => "not_found",
      Self::Throttled { .. } => "throttled",
      Self::NoCards { .. } => "no_cards",
      Self::NoMatch { .. } => "no_match",
      Self::Recommended(_) => "recommended",
    }
  }
}

/// The user-facing notification text.
pub fn recommendation_message(
  merchant: &str,
  card: &str,
  rate: RewardRate,
) -> String {
  format!("Hey, you're at {merchant}! Use {card} to get {rate}.")
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Tunables for [`Engine`].
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
  /// How long after a notification the same `(user, POI)` pair stays quiet.
  pub cooldown: TimeDelta,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self { cooldown: TimeDelta::seconds(DEFAULT_COOLDOWN_SECS) }
  }
}

/// Stateless apart from its store handle; share it behind an `Arc`.
pub struct Engine<S> {
  store:  Arc<S>,
  config: EngineConfig,
}

impl<S: RewardStore> Engine<S> {
  pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
    Self { store, config }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn config(&self) -> &EngineConfig { &self.config }

  /// Evaluate one location sample at time `now`.
  ///
  /// Fails only on invalid coordinates or store errors. A failed log write
  /// on the recommended path is not a failure: it is logged and reported
  /// through [`Recommendation::recorded`].
  pub async fn evaluate(
    &self,
    sample: &LocationSample,
    now: DateTime<Utc>,
  ) -> Result<Outcome> {
    let at = sample.coordinate()?;
    let user_id = sample.user_id;

    let pois = self.store.list_pois().await.map_err(Error::store)?;
    if pois.is_empty() {
      tracing::warn!("POI catalog is empty; was the catalog seeded?");
    }

    let Some((poi, distance)) = nearest_within_radius(&pois, at) else {
      tracing::debug!(%user_id, "no geofence contains sample");
      return Ok(Outcome::NotFound);
    };
    let poi = poi.clone();
    tracing::debug!(%user_id, poi = %poi.name, distance, "inside geofence");

    if throttle::is_throttled(
      self.store.as_ref(),
      user_id,
      poi.poi_id,
      now,
      self.config.cooldown,
    )
    .await?
    {
      tracing::debug!(%user_id, poi = %poi.name, "throttled");
      return Ok(Outcome::Throttled { poi });
    }

    let cards = self
      .store
      .list_owned_cards(user_id)
      .await
      .map_err(Error::store)?;
    if cards.is_empty() {
      return Ok(Outcome::NoCards { poi });
    }

    let Some((card, rate)) = best_card(&cards, poi.category) else {
      return Ok(Outcome::NoMatch { poi });
    };
    let card = card.clone();
    let rate = RewardRate(rate);
    let message = recommendation_message(&poi.name, &card.name, rate);

    let record = NotificationRecord::new(user_id, poi.poi_id, &card.name, now);
    let since = throttle::window_start(now, self.config.cooldown);
    let recorded = match self
      .store
      .append_notification_if_quiet(record, since)
      .await
    {
      Ok(true) => true,
      Ok(false) => {
        // A concurrent evaluation for the same pair wrote first.
        tracing::debug!(%user_id, poi = %poi.name, "lost notification race");
        return Ok(Outcome::Throttled { poi });
      }
      Err(e) => {
        tracing::error!(
          %user_id,
          poi = %poi.name,
          error = %e,
          "failed to record notification; cooldown will not apply"
        );
        false
      }
    };

    tracing::debug!(%user_id, poi = %poi.name, card = %card.name, %rate, "recommended");
    Ok(Outcome::Recommended(Recommendation {
      poi,
      card,
      rate,
      message,
      recorded,
    }))
  }
}

impl<S> Clone for Engine<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), config: self.config }
  }
}
