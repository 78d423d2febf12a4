//! In-memory [`RewardStore`] used by the engine tests.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
  card::{CatalogCard, OwnedCard},
  notification::NotificationRecord,
  poi::PointOfInterest,
  store::{RewardStore, SeedReport},
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("injected read failure")]
  Read,
  #[error("injected write failure")]
  Write,
}

#[derive(Default)]
struct Inner {
  pois:          Vec<PointOfInterest>,
  catalog:       Vec<CatalogCard>,
  owned:         Vec<OwnedCard>,
  notifications: Vec<NotificationRecord>,
  /// Records the conditional insert sees but plain reads do not; simulates a
  /// concurrent writer landing between the throttle read and the insert.
  hidden:        Vec<NotificationRecord>,
  fail_reads:    bool,
  fail_writes:   bool,
}

#[derive(Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

impl MemoryStore {
  pub fn with_catalog(pois: Vec<PointOfInterest>, cards: Vec<CatalogCard>) -> Self {
    let store = Self::default();
    {
      let mut inner = store.lock();
      inner.pois = pois;
      inner.catalog = cards;
    }
    store
  }

  pub fn push_owned(&self, card: OwnedCard) { self.lock().owned.push(card); }

  pub fn hide_from_reads(&self, record: NotificationRecord) {
    self.lock().hidden.push(record);
  }

  pub fn fail_reads(&self, on: bool) { self.lock().fail_reads = on; }

  pub fn fail_writes(&self, on: bool) { self.lock().fail_writes = on; }

  pub fn notifications(&self) -> Vec<NotificationRecord> {
    self.lock().notifications.clone()
  }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().unwrap_or_else(|e| e.into_inner())
  }

  fn read(&self) -> Result<MutexGuard<'_, Inner>, MemoryError> {
    let inner = self.lock();
    if inner.fail_reads { Err(MemoryError::Read) } else { Ok(inner) }
  }

  fn write(&self) -> Result<MutexGuard<'_, Inner>, MemoryError> {
    let inner = self.lock();
    if inner.fail_writes { Err(MemoryError::Write) } else { Ok(inner) }
  }
}

fn newest_since<'a>(
  records: impl Iterator<Item = &'a NotificationRecord>,
  user_id: Uuid,
  poi_id: Uuid,
  since: DateTime<Utc>,
) -> Option<&'a NotificationRecord> {
  records
    .filter(|r| r.user_id == user_id && r.poi_id == poi_id && r.sent_at >= since)
    .max_by_key(|r| r.sent_at)
}

impl RewardStore for MemoryStore {
  type Error = MemoryError;

  async fn seed_catalog<'a>(
    &'a self,
    pois: &'a [PointOfInterest],
    cards: &'a [CatalogCard],
  ) -> Result<SeedReport, MemoryError> {
    let mut inner = self.write()?;
    let mut report = SeedReport::default();
    for poi in pois {
      if !inner.pois.iter().any(|p| p.poi_id == poi.poi_id) {
        inner.pois.push(poi.clone());
        report.pois_inserted += 1;
      }
    }
    for card in cards {
      if !inner.catalog.iter().any(|c| c.card_id == card.card_id) {
        inner.catalog.push(card.clone());
        report.cards_inserted += 1;
      }
    }
    Ok(report)
  }

  async fn list_pois(&self) -> Result<Vec<PointOfInterest>, MemoryError> {
    Ok(self.read()?.pois.clone())
  }

  async fn list_catalog_cards(&self) -> Result<Vec<CatalogCard>, MemoryError> {
    Ok(self.read()?.catalog.clone())
  }

  async fn get_catalog_card(
    &self,
    card_id: Uuid,
  ) -> Result<Option<CatalogCard>, MemoryError> {
    Ok(self.read()?.catalog.iter().find(|c| c.card_id == card_id).cloned())
  }

  async fn list_owned_cards(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<OwnedCard>, MemoryError> {
    Ok(
      self
        .read()?
        .owned
        .iter()
        .filter(|c| c.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn add_owned_card(&self, card: OwnedCard) -> Result<bool, MemoryError> {
    let mut inner = self.write()?;
    let taken = inner.owned.iter().any(|c| {
      c.user_id == card.user_id && c.catalog_card_id == card.catalog_card_id
    });
    if !taken {
      inner.owned.push(card);
    }
    Ok(!taken)
  }

  async fn remove_owned_card(
    &self,
    user_id: Uuid,
    catalog_card_id: Uuid,
  ) -> Result<bool, MemoryError> {
    let mut inner = self.write()?;
    let before = inner.owned.len();
    inner
      .owned
      .retain(|c| !(c.user_id == user_id && c.catalog_card_id == catalog_card_id));
    Ok(inner.owned.len() != before)
  }

  async fn most_recent_notification(
    &self,
    user_id: Uuid,
    poi_id: Uuid,
    since: DateTime<Utc>,
  ) -> Result<Option<NotificationRecord>, MemoryError> {
    let inner = self.read()?;
    Ok(newest_since(inner.notifications.iter(), user_id, poi_id, since).cloned())
  }

  async fn append_notification(
    &self,
    record: NotificationRecord,
  ) -> Result<(), MemoryError> {
    self.write()?.notifications.push(record);
    Ok(())
  }

  async fn append_notification_if_quiet(
    &self,
    record: NotificationRecord,
    since: DateTime<Utc>,
  ) -> Result<bool, MemoryError> {
    let mut inner = self.write()?;
    let all = inner.notifications.iter().chain(inner.hidden.iter());
    if newest_since(all, record.user_id, record.poi_id, since).is_some() {
      return Ok(false);
    }
    inner.notifications.push(record);
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeDelta;

  use super::*;
  use crate::{catalog::default_pois, throttle::is_throttled};

  #[tokio::test]
  async fn throttle_window_is_inclusive_and_keyed_by_pair() {
    let store = MemoryStore::default();
    let user = Uuid::new_v4();
    let poi = Uuid::new_v4();
    let sent = Utc::now();
    store
      .append_notification(NotificationRecord::new(user, poi, "Card", sent))
      .await
      .unwrap();

    let cooldown = TimeDelta::hours(4);
    assert!(is_throttled(&store, user, poi, sent, cooldown).await.unwrap());
    assert!(
      is_throttled(&store, user, poi, sent + cooldown, cooldown)
        .await
        .unwrap()
    );
    assert!(
      !is_throttled(&store, user, poi, sent + cooldown + TimeDelta::seconds(1), cooldown)
        .await
        .unwrap()
    );
    assert!(
      !is_throttled(&store, Uuid::new_v4(), poi, sent, cooldown)
        .await
        .unwrap()
    );
    assert!(
      !is_throttled(&store, user, Uuid::new_v4(), sent, cooldown)
        .await
        .unwrap()
    );
  }

  #[tokio::test]
  async fn throttle_surfaces_store_failure() {
    let store = MemoryStore::default();
    store.fail_reads(true);
    let res = is_throttled(
      &store,
      Uuid::new_v4(),
      Uuid::new_v4(),
      Utc::now(),
      TimeDelta::hours(4),
    )
    .await;
    assert!(matches!(res, Err(crate::Error::StoreUnavailable(_))));
  }

  #[tokio::test]
  async fn seeding_twice_is_a_no_op() {
    let store = MemoryStore::default();
    let pois = default_pois();
    let first = store.seed_catalog(&pois, &[]).await.unwrap();
    let second = store.seed_catalog(&pois, &[]).await.unwrap();
    assert_eq!(first.pois_inserted, pois.len());
    assert_eq!(second, SeedReport::default());
  }
}
