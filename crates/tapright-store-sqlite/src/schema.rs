//! SQL schema for the TapRight SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE … IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Merchant catalog. Rows are only ever inserted by catalog seeding.
CREATE TABLE IF NOT EXISTS pois (
    poi_id     TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    category   TEXT NOT NULL,   -- lower-case Category name
    latitude   REAL NOT NULL CHECK (latitude  BETWEEN  -90 AND  90),
    longitude  REAL NOT NULL CHECK (longitude BETWEEN -180 AND 180),
    address    TEXT,
    radius_m   REAL NOT NULL DEFAULT 150 CHECK (radius_m > 0)
);

-- Cards users can add to their wallet.
CREATE TABLE IF NOT EXISTS catalog_cards (
    card_id      TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    issuer       TEXT NOT NULL,
    color        TEXT NOT NULL,
    annual_fee   REAL NOT NULL DEFAULT 0,
    rewards_json TEXT NOT NULL    -- JSON RewardTable
);

-- Wallet entries; the reward table is a snapshot taken at add time.
CREATE TABLE IF NOT EXISTS owned_cards (
    owned_card_id   TEXT PRIMARY KEY,
    user_id         TEXT NOT NULL,
    catalog_card_id TEXT NOT NULL REFERENCES catalog_cards(card_id),
    name            TEXT NOT NULL,
    issuer          TEXT NOT NULL,
    color           TEXT NOT NULL,
    rewards_json    TEXT NOT NULL,
    added_at        TEXT NOT NULL,   -- fixed-width RFC 3339 UTC
    UNIQUE (user_id, catalog_card_id)
);

-- Notification log. Strictly append-only.
CREATE TABLE IF NOT EXISTS notifications (
    notification_id  TEXT PRIMARY KEY,
    user_id          TEXT NOT NULL,
    poi_id           TEXT NOT NULL REFERENCES pois(poi_id),
    card_recommended TEXT NOT NULL,
    sent_at          TEXT NOT NULL   -- fixed-width RFC 3339 UTC; sorts as text
);

CREATE INDEX IF NOT EXISTS owned_cards_user_idx  ON owned_cards(user_id);
CREATE INDEX IF NOT EXISTS notifications_pair_idx
    ON notifications(user_id, poi_id, sent_at);

PRAGMA user_version = 1;
";
