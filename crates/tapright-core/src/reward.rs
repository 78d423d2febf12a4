//! Best-card selection and reward text formatting.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{card::OwnedCard, category::Category};

/// Rates at or above this value are points multipliers; below it they are
/// cash-back percentages.
pub const POINTS_THRESHOLD: f64 = 10.0;

/// Pick the card in `cards` that earns the most at a `category` merchant.
///
/// Each card's rate comes from [`RewardTable::resolve`](crate::category::RewardTable::resolve).
/// The strictly greatest rate wins and ties keep the earlier card. Returns
/// `None` when no card earns anything.
pub fn best_card(
  cards: &[OwnedCard],
  category: Category,
) -> Option<(&OwnedCard, f64)> {
  let mut best: Option<(&OwnedCard, f64)> = None;
  let mut best_rate = 0.0;
  for card in cards {
    let rate = card.rewards.resolve(category);
    if rate > best_rate {
      best_rate = rate;
      best = Some((card, rate));
    }
  }
  best
}

// ─── RewardRate ──────────────────────────────────────────────────────────────

/// A reward rate with its user-facing rendering.
///
/// `3.0` renders as `3% back`, `1.5` as `1.5% back`, `10.0` as `10x points`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RewardRate(pub f64);

impl RewardRate {
  pub fn is_points(self) -> bool { self.0 >= POINTS_THRESHOLD }
}

impl fmt::Display for RewardRate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_points() {
      write!(f, "{}x points", self.0.floor() as u64)
    } else {
      write!(f, "{}% back", self.0)
    }
  }
}

impl Serialize for RewardRate {
  fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(self)
  }
}
