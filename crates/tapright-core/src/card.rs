//! Catalog cards and the per-user wallet snapshots made from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::RewardTable;

/// A card offered system-wide that users can add to their wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCard {
  pub card_id:    Uuid,
  pub name:       String,
  pub issuer:     String,
  /// Hex display color, passed through untouched.
  pub color:      String,
  pub annual_fee: f64,
  pub rewards:    RewardTable,
}

/// A card in a user's wallet.
///
/// Holds a snapshot of the catalog card's reward table taken when it was
/// added; later catalog changes do not propagate. Never mutated: removal
/// deletes the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedCard {
  pub owned_card_id:   Uuid,
  pub user_id:         Uuid,
  pub catalog_card_id: Uuid,
  pub name:            String,
  pub issuer:          String,
  pub color:           String,
  pub rewards:         RewardTable,
  pub added_at:        DateTime<Utc>,
}

impl OwnedCard {
  /// Snapshot `card` into `user_id`'s wallet.
  pub fn from_catalog(
    user_id: Uuid,
    card: &CatalogCard,
    added_at: DateTime<Utc>,
  ) -> Self {
    Self {
      owned_card_id: Uuid::new_v4(),
      user_id,
      catalog_card_id: card.card_id,
      name: card.name.clone(),
      issuer: card.issuer.clone(),
      color: card.color.clone(),
      rewards: card.rewards.clone(),
      added_at,
    }
  }
}
