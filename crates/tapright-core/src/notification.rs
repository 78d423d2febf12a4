//! The append-only notification log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Records that a user was told which card to use at a POI.
/// Written once per non-throttled recommendation; never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
  pub notification_id:  Uuid,
  pub user_id:          Uuid,
  pub poi_id:           Uuid,
  /// Display name of the recommended card at the time of sending.
  pub card_recommended: String,
  pub sent_at:          DateTime<Utc>,
}

impl NotificationRecord {
  pub fn new(
    user_id: Uuid,
    poi_id: Uuid,
    card_recommended: impl Into<String>,
    sent_at: DateTime<Utc>,
  ) -> Self {
    Self {
      notification_id: Uuid::new_v4(),
      user_id,
      poi_id,
      card_recommended: card_recommended.into(),
      sent_at,
    }
  }
}
