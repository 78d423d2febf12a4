//! The `RewardStore` trait.
//!
//! Implemented by storage backends (e.g. `tapright-store-sqlite`). The engine
//! and the HTTP layer depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  card::{CatalogCard, OwnedCard},
  notification::NotificationRecord,
  poi::PointOfInterest,
};

/// Row counts written by [`RewardStore::seed_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
  pub pois_inserted:  usize,
  pub cards_inserted: usize,
}

/// Abstraction over the four logical collections the engine reads and
/// writes: POIs, catalog cards, owned cards and the notification log.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RewardStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Catalog ───────────────────────────────────────────────────────────

  /// Insert any of `pois` and `cards` whose ids are not yet present.
  ///
  /// Idempotent: running it twice, or from two processes at once, never
  /// duplicates a row. Meant to run once at startup, not per request.
  fn seed_catalog<'a>(
    &'a self,
    pois: &'a [PointOfInterest],
    cards: &'a [CatalogCard],
  ) -> impl Future<Output = Result<SeedReport, Self::Error>> + Send + 'a;

  /// All POIs, in a stable order (insertion order for the bundled backend).
  fn list_pois(
    &self,
  ) -> impl Future<Output = Result<Vec<PointOfInterest>, Self::Error>> + Send + '_;

  fn list_catalog_cards(
    &self,
  ) -> impl Future<Output = Result<Vec<CatalogCard>, Self::Error>> + Send + '_;

  /// Retrieve a catalog card by id. Returns `None` if not found.
  fn get_catalog_card(
    &self,
    card_id: Uuid,
  ) -> impl Future<Output = Result<Option<CatalogCard>, Self::Error>> + Send + '_;

  // ── Wallet ────────────────────────────────────────────────────────────

  /// The user's cards, oldest first.
  fn list_owned_cards(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<OwnedCard>, Self::Error>> + Send + '_;

  /// Persist `card`. Returns `false` without writing if the user already
  /// owns a card with the same `catalog_card_id`.
  fn add_owned_card(
    &self,
    card: OwnedCard,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove the user's copy of a catalog card. Returns `false` if the user
  /// did not own it.
  fn remove_owned_card(
    &self,
    user_id: Uuid,
    catalog_card_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Notification log ──────────────────────────────────────────────────

  /// The newest record for `(user_id, poi_id)` with `sent_at >= since`.
  fn most_recent_notification(
    &self,
    user_id: Uuid,
    poi_id: Uuid,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<NotificationRecord>, Self::Error>>
  + Send
  + '_;

  /// Append a record unconditionally.
  fn append_notification(
    &self,
    record: NotificationRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Append `record` only if no record for the same `(user_id, poi_id)` has
  /// `sent_at >= since`. The check and the insert are one atomic step.
  ///
  /// Returns `true` if the record was written.
  fn append_notification_if_quiet(
    &self,
    record: NotificationRecord,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
