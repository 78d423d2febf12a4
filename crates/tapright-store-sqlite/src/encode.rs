//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microseconds, `Z`
//! suffix) so that text comparison orders them chronologically. Reward tables
//! are stored as compact JSON. UUIDs are stored as hyphenated lowercase
//! strings.

use chrono::{DateTime, SecondsFormat, Utc};
use tapright_core::{
  card::{CatalogCard, OwnedCard},
  category::{Category, RewardTable},
  geo::Coordinate,
  notification::NotificationRecord,
  poi::PointOfInterest,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Category ─────────────────────────────────────────────────────────────────

pub fn encode_category(c: Category) -> &'static str { c.as_str() }

pub fn decode_category(s: &str) -> Result<Category> { Ok(Category::parse(s)?) }

// ─── RewardTable ──────────────────────────────────────────────────────────────

pub fn encode_rewards(t: &RewardTable) -> Result<String> {
  Ok(serde_json::to_string(t)?)
}

pub fn decode_rewards(s: &str) -> Result<RewardTable> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `pois` row.
pub struct RawPoi {
  pub poi_id:    String,
  pub name:      String,
  pub category:  String,
  pub latitude:  f64,
  pub longitude: f64,
  pub address:   Option<String>,
  pub radius_m:  f64,
}

impl RawPoi {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      poi_id:    row.get(0)?,
      name:      row.get(1)?,
      category:  row.get(2)?,
      latitude:  row.get(3)?,
      longitude: row.get(4)?,
      address:   row.get(5)?,
      radius_m:  row.get(6)?,
    })
  }

  pub fn into_poi(self) -> Result<PointOfInterest> {
    Ok(PointOfInterest {
      poi_id:   decode_uuid(&self.poi_id)?,
      name:     self.name,
      category: decode_category(&self.category)?,
      location: Coordinate::new(self.latitude, self.longitude)?,
      address:  self.address,
      radius_m: self.radius_m,
    })
  }
}

/// Raw values read directly from a `catalog_cards` row.
pub struct RawCatalogCard {
  pub card_id:      String,
  pub name:         String,
  pub issuer:       String,
  pub color:        String,
  pub annual_fee:   f64,
  pub rewards_json: String,
}

impl RawCatalogCard {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      card_id:      row.get(0)?,
      name:         row.get(1)?,
      issuer:       row.get(2)?,
      color:        row.get(3)?,
      annual_fee:   row.get(4)?,
      rewards_json: row.get(5)?,
    })
  }

  pub fn into_card(self) -> Result<CatalogCard> {
    Ok(CatalogCard {
      card_id:    decode_uuid(&self.card_id)?,
      name:       self.name,
      issuer:     self.issuer,
      color:      self.color,
      annual_fee: self.annual_fee,
      rewards:    decode_rewards(&self.rewards_json)?,
    })
  }
}

/// Raw values read directly from an `owned_cards` row.
pub struct RawOwnedCard {
  pub owned_card_id:   String,
  pub user_id:         String,
  pub catalog_card_id: String,
  pub name:            String,
  pub issuer:          String,
  pub color:           String,
  pub rewards_json:    String,
  pub added_at:        String,
}

impl RawOwnedCard {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      owned_card_id:   row.get(0)?,
      user_id:         row.get(1)?,
      catalog_card_id: row.get(2)?,
      name:            row.get(3)?,
      issuer:          row.get(4)?,
      color:           row.get(5)?,
      rewards_json:    row.get(6)?,
      added_at:        row.get(7)?,
    })
  }

  pub fn into_card(self) -> Result<OwnedCard> {
    Ok(OwnedCard {
      owned_card_id:   decode_uuid(&self.owned_card_id)?,
      user_id:         decode_uuid(&self.user_id)?,
      catalog_card_id: decode_uuid(&self.catalog_card_id)?,
      name:            self.name,
      issuer:          self.issuer,
      color:           self.color,
      rewards:         decode_rewards(&self.rewards_json)?,
      added_at:        decode_dt(&self.added_at)?,
    })
  }
}

/// Raw values read directly from a `notifications` row.
pub struct RawNotification {
  pub notification_id:  String,
  pub user_id:          String,
  pub poi_id:           String,
  pub card_recommended: String,
  pub sent_at:          String,
}

impl RawNotification {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      notification_id:  row.get(0)?,
      user_id:          row.get(1)?,
      poi_id:           row.get(2)?,
      card_recommended: row.get(3)?,
      sent_at:          row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<NotificationRecord> {
    Ok(NotificationRecord {
      notification_id:  decode_uuid(&self.notification_id)?,
      user_id:          decode_uuid(&self.user_id)?,
      poi_id:           decode_uuid(&self.poi_id)?,
      card_recommended: self.card_recommended,
      sent_at:          decode_dt(&self.sent_at)?,
    })
  }
}
