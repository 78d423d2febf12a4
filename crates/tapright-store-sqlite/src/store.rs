//! The SQLite implementation of [`RewardStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tapright_core::{
  card::{CatalogCard, OwnedCard},
  notification::NotificationRecord,
  poi::PointOfInterest,
  store::{RewardStore, SeedReport},
};

use crate::{
  Result,
  encode::{
    RawCatalogCard, RawNotification, RawOwnedCard, RawPoi, encode_category,
    encode_dt, encode_rewards, encode_uuid,
  },
  schema::SCHEMA,
};

const POI_COLUMNS: &str =
  "poi_id, name, category, latitude, longitude, address, radius_m";

const CATALOG_COLUMNS: &str =
  "card_id, name, issuer, color, annual_fee, rewards_json";

const OWNED_COLUMNS: &str = "owned_card_id, user_id, catalog_card_id, name, \
                             issuer, color, rewards_json, added_at";

const NOTIFICATION_COLUMNS: &str =
  "notification_id, user_id, poi_id, card_recommended, sent_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A TapRight reward store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Column values for one `notifications` insert, encoded up front so the
/// closure handed to the connection thread owns them.
struct NotificationRow {
  notification_id:  String,
  user_id:          String,
  poi_id:           String,
  card_recommended: String,
  sent_at:          String,
}

impl From<&NotificationRecord> for NotificationRow {
  fn from(r: &NotificationRecord) -> Self {
    Self {
      notification_id:  encode_uuid(r.notification_id),
      user_id:          encode_uuid(r.user_id),
      poi_id:           encode_uuid(r.poi_id),
      card_recommended: r.card_recommended.clone(),
      sent_at:          encode_dt(r.sent_at),
    }
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RewardStore impl ────────────────────────────────────────────────────────

impl RewardStore for SqliteStore {
  type Error = crate::Error;

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn seed_catalog<'a>(
    &'a self,
    pois: &'a [PointOfInterest],
    cards: &'a [CatalogCard],
  ) -> Result<SeedReport> {
    let poi_rows: Vec<_> = pois
      .iter()
      .map(|p| {
        (
          encode_uuid(p.poi_id),
          p.name.clone(),
          encode_category(p.category),
          p.location.latitude(),
          p.location.longitude(),
          p.address.clone(),
          p.radius_m,
        )
      })
      .collect();

    let card_rows = cards
      .iter()
      .map(|c| {
        Ok((
          encode_uuid(c.card_id),
          c.name.clone(),
          c.issuer.clone(),
          c.color.clone(),
          c.annual_fee,
          encode_rewards(&c.rewards)?,
        ))
      })
      .collect::<Result<Vec<_>>>()?;

    let report = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut report = SeedReport::default();
        {
          let mut insert_poi = tx.prepare(&format!(
            "INSERT OR IGNORE INTO pois ({POI_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
          ))?;
          for (id, name, category, lat, lon, address, radius_m) in &poi_rows {
            report.pois_inserted += insert_poi.execute(rusqlite::params![
              id, name, category, lat, lon, address, radius_m
            ])?;
          }

          let mut insert_card = tx.prepare(&format!(
            "INSERT OR IGNORE INTO catalog_cards ({CATALOG_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
          ))?;
          for (id, name, issuer, color, fee, rewards) in &card_rows {
            report.cards_inserted += insert_card.execute(rusqlite::params![
              id, name, issuer, color, fee, rewards
            ])?;
          }
        }
        tx.commit()?;
        Ok(report)
      })
      .await?;

    Ok(report)
  }

  async fn list_pois(&self) -> Result<Vec<PointOfInterest>> {
    let raws: Vec<RawPoi> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {POI_COLUMNS} FROM pois ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], RawPoi::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPoi::into_poi).collect()
  }

  async fn list_catalog_cards(&self) -> Result<Vec<CatalogCard>> {
    let raws: Vec<RawCatalogCard> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CATALOG_COLUMNS} FROM catalog_cards ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawCatalogCard::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCatalogCard::into_card).collect()
  }

  async fn get_catalog_card(&self, card_id: Uuid) -> Result<Option<CatalogCard>> {
    let id_str = encode_uuid(card_id);

    let raw: Option<RawCatalogCard> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CATALOG_COLUMNS} FROM catalog_cards WHERE card_id = ?1"),
            rusqlite::params![id_str],
            RawCatalogCard::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCatalogCard::into_card).transpose()
  }

  // ── Wallet ────────────────────────────────────────────────────────────────

  async fn list_owned_cards(&self, user_id: Uuid) -> Result<Vec<OwnedCard>> {
    let user_str = encode_uuid(user_id);

    let raws: Vec<RawOwnedCard> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {OWNED_COLUMNS} FROM owned_cards
           WHERE user_id = ?1
           ORDER BY added_at, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], RawOwnedCard::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOwnedCard::into_card).collect()
  }

  async fn add_owned_card(&self, card: OwnedCard) -> Result<bool> {
    let owned_id_str   = encode_uuid(card.owned_card_id);
    let user_str       = encode_uuid(card.user_id);
    let catalog_id_str = encode_uuid(card.catalog_card_id);
    let rewards_str    = encode_rewards(&card.rewards)?;
    let added_at_str   = encode_dt(card.added_at);
    let OwnedCard { name, issuer, color, .. } = card;

    let inserted = self
      .conn
      .call(move |conn| {
        // The UNIQUE (user_id, catalog_card_id) constraint turns a duplicate
        // add into a zero-row insert.
        let n = conn.execute(
          &format!(
            "INSERT OR IGNORE INTO owned_cards ({OWNED_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
          ),
          rusqlite::params![
            owned_id_str,
            user_str,
            catalog_id_str,
            name,
            issuer,
            color,
            rewards_str,
            added_at_str,
          ],
        )?;
        Ok(n == 1)
      })
      .await?;

    Ok(inserted)
  }

  async fn remove_owned_card(
    &self,
    user_id: Uuid,
    catalog_card_id: Uuid,
  ) -> Result<bool> {
    let user_str       = encode_uuid(user_id);
    let catalog_id_str = encode_uuid(catalog_card_id);

    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM owned_cards WHERE user_id = ?1 AND catalog_card_id = ?2",
          rusqlite::params![user_str, catalog_id_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(removed)
  }

  // ── Notification log ──────────────────────────────────────────────────────

  async fn most_recent_notification(
    &self,
    user_id: Uuid,
    poi_id:  Uuid,
    since:   DateTime<Utc>,
  ) -> Result<Option<NotificationRecord>> {
    let user_str  = encode_uuid(user_id);
    let poi_str   = encode_uuid(poi_id);
    let since_str = encode_dt(since);

    let raw: Option<RawNotification> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {NOTIFICATION_COLUMNS} FROM notifications
               WHERE user_id = ?1 AND poi_id = ?2 AND sent_at >= ?3
               ORDER BY sent_at DESC
               LIMIT 1"
            ),
            rusqlite::params![user_str, poi_str, since_str],
            RawNotification::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawNotification::into_record).transpose()
  }

  async fn append_notification(&self, record: NotificationRecord) -> Result<()> {
    let row = NotificationRow::from(&record);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO notifications ({NOTIFICATION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5)"
          ),
          rusqlite::params![
            row.notification_id,
            row.user_id,
            row.poi_id,
            row.card_recommended,
            row.sent_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn append_notification_if_quiet(
    &self,
    record: NotificationRecord,
    since:  DateTime<Utc>,
  ) -> Result<bool> {
    let row       = NotificationRow::from(&record);
    let since_str = encode_dt(since);

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          &format!(
            "INSERT INTO notifications ({NOTIFICATION_COLUMNS})
             SELECT ?1, ?2, ?3, ?4, ?5
             WHERE NOT EXISTS (
               SELECT 1 FROM notifications
               WHERE user_id = ?2 AND poi_id = ?3 AND sent_at >= ?6
             )"
          ),
          rusqlite::params![
            row.notification_id,
            row.user_id,
            row.poi_id,
            row.card_recommended,
            row.sent_at,
            since_str,
          ],
        )?;
        Ok(n == 1)
      })
      .await?;

    Ok(inserted)
  }
}
