//! Merchant categories and per-card reward tables.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// The merchant category a point of interest belongs to.
///
/// Text parsing is ASCII case-insensitive; the canonical form is lower-case.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
  Dining,
  Gas,
  Grocery,
  Retail,
  Coffee,
  Entertainment,
  Travel,
  General,
}

impl Category {
  /// Parse a category name, mapping failures into [`Error::UnknownCategory`].
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s.trim()).map_err(|_| Error::UnknownCategory(s.to_owned()))
  }

  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── RewardTable ─────────────────────────────────────────────────────────────

/// Reward rates a card earns, one optional slot per category plus the
/// `everything` catch-all.
///
/// `general` doubles as a category in its own right and as the last-resort
/// fallback. Serialises as `{"gas": 3.0, "general": 1.0}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewardTable {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dining:        Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub gas:           Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub grocery:       Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub retail:        Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub coffee:        Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub entertainment: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub travel:        Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub general:       Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub everything:    Option<f64>,
}

impl RewardTable {
  pub fn new() -> Self { Self::default() }

  /// Builder: set the rate for `category`.
  pub fn with(mut self, category: Category, rate: f64) -> Self {
    *self.slot_mut(category) = Some(rate);
    self
  }

  /// Builder: set the `everything` catch-all rate.
  pub fn with_everything(mut self, rate: f64) -> Self {
    self.everything = Some(rate);
    self
  }

  /// The rate stored for exactly `category`, with no fallback.
  pub fn rate_for(&self, category: Category) -> Option<f64> {
    match category {
      Category::Dining => self.dining,
      Category::Gas => self.gas,
      Category::Grocery => self.grocery,
      Category::Retail => self.retail,
      Category::Coffee => self.coffee,
      Category::Entertainment => self.entertainment,
      Category::Travel => self.travel,
      Category::General => self.general,
    }
  }

  /// The effective rate for `category`: the first present slot among the
  /// exact category, `everything`, then `general`. Zero when none is set.
  pub fn resolve(&self, category: Category) -> f64 {
    self
      .rate_for(category)
      .or(self.everything)
      .or(self.general)
      .unwrap_or(0.0)
  }

  pub fn is_empty(&self) -> bool { *self == Self::default() }

  fn slot_mut(&mut self, category: Category) -> &mut Option<f64> {
    match category {
      Category::Dining => &mut self.dining,
      Category::Gas => &mut self.gas,
      Category::Grocery => &mut self.grocery,
      Category::Retail => &mut self.retail,
      Category::Coffee => &mut self.coffee,
      Category::Entertainment => &mut self.entertainment,
      Category::Travel => &mut self.travel,
      Category::General => &mut self.general,
    }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn parse_is_case_insensitive() {
    assert_eq!(Category::parse("GAS").unwrap(), Category::Gas);
    assert_eq!(Category::parse(" Dining ").unwrap(), Category::Dining);
    assert!(matches!(
      Category::parse("streaming"),
      Err(Error::UnknownCategory(_))
    ));
  }

  #[test]
  fn display_matches_serde_form() {
    for c in Category::iter() {
      let json = serde_json::to_string(&c).unwrap();
      assert_eq!(json, format!("\"{c}\""));
      assert_eq!(c.as_str(), c.to_string());
    }
  }

  #[test]
  fn exact_category_beats_everything() {
    let t = RewardTable::new()
      .with(Category::Gas, 3.0)
      .with_everything(2.0);
    assert_eq!(t.resolve(Category::Gas), 3.0);
    assert_eq!(t.resolve(Category::Coffee), 2.0);
  }

  #[test]
  fn everything_beats_general() {
    let t = RewardTable::new()
      .with(Category::General, 1.0)
      .with_everything(2.0);
    assert_eq!(t.resolve(Category::Travel), 2.0);
  }

  #[test]
  fn general_is_last_resort() {
    let t = RewardTable::new()
      .with(Category::Dining, 5.0)
      .with(Category::General, 1.0);
    assert_eq!(t.resolve(Category::Gas), 1.0);
    assert_eq!(RewardTable::new().resolve(Category::Gas), 0.0);
  }

  #[test]
  fn table_json_shape() {
    let t: RewardTable =
      serde_json::from_str(r#"{"gas": 3, "general": 1}"#).unwrap();
    assert_eq!(t.gas, Some(3.0));
    assert_eq!(t.general, Some(1.0));
    assert_eq!(
      serde_json::to_value(&t).unwrap(),
      serde_json::json!({ "gas": 3.0, "general": 1.0 })
    );
    assert!(serde_json::from_str::<RewardTable>(r#"{"streaming": 3}"#).is_err());
  }
}
