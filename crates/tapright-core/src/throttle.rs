//! Cooldown check for repeat notifications.

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::{Error, Result, store::RewardStore};

/// Cooldown applied when none is configured: four hours.
pub const DEFAULT_COOLDOWN_SECS: i64 = 4 * 60 * 60;

/// Longest cooldown a deployment may configure: one year.
pub const MAX_COOLDOWN_SECS: i64 = 366 * 24 * 60 * 60;

/// Start of the cooldown window that ends at `now`.
///
/// A negative cooldown counts as zero. A cooldown reaching past the start of
/// representable time covers everything.
pub fn window_start(now: DateTime<Utc>, cooldown: TimeDelta) -> DateTime<Utc> {
  let cooldown = cooldown.max(TimeDelta::zero());
  now
    .checked_sub_signed(cooldown)
    .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// `true` iff `store` holds a notification for exactly `(user_id, poi_id)`
/// sent at or after `now - cooldown`. Read-only.
pub async fn is_throttled<S>(
  store: &S,
  user_id: Uuid,
  poi_id: Uuid,
  now: DateTime<Utc>,
  cooldown: TimeDelta,
) -> Result<bool>
where
  S: RewardStore,
{
  let recent = store
    .most_recent_notification(user_id, poi_id, window_start(now, cooldown))
    .await
    .map_err(Error::store)?;
  Ok(recent.is_some())
}
