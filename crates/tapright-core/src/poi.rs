//! Points of interest: merchants with a circular geofence.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  category::Category,
  geo::{Coordinate, distance_meters},
};

/// Geofence radius applied when a POI does not specify one.
pub const DEFAULT_RADIUS_M: f64 = 150.0;

fn default_radius() -> f64 { DEFAULT_RADIUS_M }

/// A merchant location. Read-only once seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
  pub poi_id:   Uuid,
  pub name:     String,
  pub category: Category,
  #[serde(flatten)]
  pub location: Coordinate,
  pub address:  Option<String>,
  /// Geofence radius in meters.
  #[serde(default = "default_radius")]
  pub radius_m: f64,
}

impl PointOfInterest {
  /// Whether `at` lies inside the geofence. The boundary counts as inside.
  pub fn contains(&self, at: Coordinate) -> bool {
    distance_meters(at, self.location) <= self.radius_m
  }
}

/// The POI whose geofence contains `at` and whose center is closest to it,
/// together with that distance.
///
/// Exact distance ties keep the POI that appears first in `pois`.
pub fn nearest_within_radius(
  pois: &[PointOfInterest],
  at: Coordinate,
) -> Option<(&PointOfInterest, f64)> {
  let mut best: Option<(&PointOfInterest, f64)> = None;
  for poi in pois {
    let d = distance_meters(at, poi.location);
    if d > poi.radius_m {
      continue;
    }
    match best {
      Some((_, best_d)) if d >= best_d => {}
      _ => best = Some((poi, d)),
    }
  }
  best
}

#[cfg(test)]
mod tests {
  use super::*;

  fn poi(name: &str, lat: f64, lon: f64, radius_m: f64) -> PointOfInterest {
    PointOfInterest {
      poi_id: Uuid::new_v4(),
      name: name.into(),
      category: Category::Gas,
      location: Coordinate::new(lat, lon).unwrap(),
      address: None,
      radius_m,
    }
  }

  #[test]
  fn picks_nearest_of_overlapping_fences() {
    let pois = vec![
      poi("far", 37.7760, -122.4194, 500.0),
      poi("near", 37.7750, -122.4194, 500.0),
    ];
    let at = Coordinate::new(37.7749, -122.4194).unwrap();
    let (found, d) = nearest_within_radius(&pois, at).unwrap();
    assert_eq!(found.name, "near");
    assert!(d < 20.0);
  }

  #[test]
  fn outside_every_fence_is_none() {
    let pois = vec![poi("chevron", 37.7849, -122.4094, 200.0)];
    let at = Coordinate::new(37.7749, -122.4194).unwrap();
    assert!(nearest_within_radius(&pois, at).is_none());
  }

  #[test]
  fn nearer_poi_with_small_fence_loses_to_farther_poi_with_large_fence() {
    let pois = vec![
      poi("tiny", 37.7750, -122.4194, 1.0),
      poi("wide", 37.7760, -122.4194, 500.0),
    ];
    let at = Coordinate::new(37.7749, -122.4194).unwrap();
    assert_eq!(nearest_within_radius(&pois, at).unwrap().0.name, "wide");
  }

  #[test]
  fn boundary_is_inclusive() {
    let center = Coordinate::new(10.0, 10.0).unwrap();
    let at = Coordinate::new(10.001, 10.0).unwrap();
    let exact = distance_meters(at, center);

    let mut p = poi("edge", 10.0, 10.0, exact);
    assert!(p.contains(at));
    assert!(nearest_within_radius(std::slice::from_ref(&p), at).is_some());

    p.radius_m = exact - 1e-6;
    assert!(!p.contains(at));
    assert!(nearest_within_radius(std::slice::from_ref(&p), at).is_none());
  }

  #[test]
  fn exact_tie_keeps_first() {
    let a = poi("first", 0.0, 0.001, 500.0);
    let b = poi("second", 0.0, -0.001, 500.0);
    let at = Coordinate::new(0.0, 0.0).unwrap();
    let pois = vec![a, b];
    assert_eq!(nearest_within_radius(&pois, at).unwrap().0.name, "first");
  }
}
