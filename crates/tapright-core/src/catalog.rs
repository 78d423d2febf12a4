//! The bundled starter catalog: sample merchants and common cards.
//!
//! Ids are UUIDv5 values derived from the display name, so seeding the same
//! catalog into the same store is a no-op.

use uuid::Uuid;

use crate::{
  card::CatalogCard,
  category::{Category, RewardTable},
  geo::Coordinate,
  poi::PointOfInterest,
};

/// Namespace for the name-derived ids of bundled catalog entries.
pub const CATALOG_NAMESPACE: Uuid =
  Uuid::from_u128(0x5f1c_2b8e_7a44_4d0f_9c3e_a1b2_c3d4_e5f6);

/// The stable id of a bundled entry. `kind` keeps POI and card ids apart.
pub fn catalog_id(kind: &str, name: &str) -> Uuid {
  Uuid::new_v5(&CATALOG_NAMESPACE, format!("{kind}:{name}").as_bytes())
}

// ─── POIs ────────────────────────────────────────────────────────────────────

const POIS: &[(&str, Category, f64, f64, f64)] = &[
  // San Francisco, New York and Los Angeles coffee
  ("Starbucks Downtown", Category::Coffee, 37.7749, -122.4194, 200.0),
  ("Starbucks Times Square", Category::Coffee, 40.7580, -73.9855, 200.0),
  ("Starbucks LA", Category::Coffee, 34.0522, -118.2437, 200.0),
  // Gas
  ("Chevron Station", Category::Gas, 37.7849, -122.4094, 200.0),
  ("Shell Gas", Category::Gas, 40.7480, -73.9755, 200.0),
  ("Exxon Station", Category::Gas, 34.0422, -118.2537, 200.0),
  ("BP Gas Station", Category::Gas, 37.7949, -122.4194, 200.0),
  // Grocery
  ("Whole Foods Market", Category::Grocery, 37.7849, -122.4294, 200.0),
  ("Trader Joe's", Category::Grocery, 40.7680, -73.9655, 200.0),
  ("Safeway", Category::Grocery, 34.0622, -118.2337, 200.0),
  ("Kroger", Category::Grocery, 37.7449, -122.4394, 200.0),
  // Dining
  ("Chipotle", Category::Dining, 37.7649, -122.4394, 150.0),
  ("McDonald's", Category::Dining, 40.7380, -73.9955, 150.0),
  ("Olive Garden", Category::Dining, 34.0322, -118.2637, 150.0),
  ("Panera Bread", Category::Dining, 37.7849, -122.4494, 150.0),
  // Retail
  ("Target", Category::Retail, 37.7549, -122.4494, 250.0),
  ("Walmart", Category::Retail, 40.7280, -73.9855, 250.0),
  ("Best Buy", Category::Retail, 34.0222, -118.2737, 200.0),
  ("CVS Pharmacy", Category::Retail, 37.7649, -122.4194, 150.0),
  ("Walgreens", Category::Retail, 40.7580, -73.9755, 150.0),
];

/// The sample merchants across San Francisco, New York and Los Angeles.
pub fn default_pois() -> Vec<PointOfInterest> {
  POIS
    .iter()
    .filter_map(|&(name, category, lat, lon, radius_m)| {
      // Literal table; every coordinate is in range.
      let location = Coordinate::new(lat, lon).ok()?;
      Some(PointOfInterest {
        poi_id: catalog_id("poi", name),
        name: name.to_owned(),
        category,
        location,
        address: None,
        radius_m,
      })
    })
    .collect()
}

// ─── Cards ───────────────────────────────────────────────────────────────────

fn card(
  name: &str,
  issuer: &str,
  color: &str,
  annual_fee: f64,
  rewards: RewardTable,
) -> CatalogCard {
  CatalogCard {
    card_id: catalog_id("card", name),
    name: name.to_owned(),
    issuer: issuer.to_owned(),
    color: color.to_owned(),
    annual_fee,
    rewards,
  }
}

/// Common no-fee and premium cards with their category rates.
pub fn default_cards() -> Vec<CatalogCard> {
  use Category::*;

  vec![
    card(
      "Blue Cash Everyday",
      "American Express",
      "#006FCF",
      0.0,
      RewardTable::new()
        .with(Gas, 3.0)
        .with(Grocery, 2.0)
        .with(General, 1.0),
    ),
    card(
      "Freedom Flex",
      "Chase",
      "#0F4D92",
      0.0,
      RewardTable::new()
        .with(Dining, 3.0)
        .with(Gas, 3.0)
        .with(General, 1.0),
    ),
    card(
      "Discover it Cash Back",
      "Discover",
      "#FF6B00",
      0.0,
      RewardTable::new()
        .with(Dining, 5.0)
        .with(Grocery, 5.0)
        .with(Gas, 5.0)
        .with(General, 1.0),
    ),
    card(
      "Double Cash",
      "Citi",
      "#003B71",
      0.0,
      RewardTable::new().with_everything(2.0),
    ),
    card(
      "SavorOne",
      "Capital One",
      "#D8232A",
      0.0,
      RewardTable::new()
        .with(Dining, 3.0)
        .with(Entertainment, 3.0)
        .with(Grocery, 2.0)
        .with(General, 1.0),
    ),
    card(
      "Sapphire Preferred",
      "Chase",
      "#1A2870",
      95.0,
      RewardTable::new()
        .with(Dining, 3.0)
        .with(Travel, 3.0)
        .with(General, 1.0),
    ),
    card(
      "Gold Card",
      "American Express",
      "#C9A668",
      250.0,
      RewardTable::new()
        .with(Dining, 4.0)
        .with(Grocery, 4.0)
        .with(General, 1.0),
    ),
  ]
}
