//! Coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A validated WGS-84 position in decimal degrees.
///
/// Only constructible through [`Coordinate::new`], so every value in the
/// system is in range by the time it reaches [`distance_meters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
  latitude:  f64,
  longitude: f64,
}

impl Coordinate {
  pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
    if !(-90.0..=90.0).contains(&latitude) {
      return Err(Error::InvalidLatitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
      return Err(Error::InvalidLongitude(longitude));
    }
    Ok(Self { latitude, longitude })
  }

  pub fn latitude(&self) -> f64 { self.latitude }

  pub fn longitude(&self) -> f64 { self.longitude }
}

impl<'de> Deserialize<'de> for Coordinate {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    #[derive(Deserialize)]
    struct Raw {
      latitude:  f64,
      longitude: f64,
    }

    let raw = Raw::deserialize(deserializer)?;
    Coordinate::new(raw.latitude, raw.longitude)
      .map_err(serde::de::Error::custom)
  }
}

/// Great-circle distance between `a` and `b` in meters (haversine).
///
/// The haversine term is clamped to `[0, 1]`; rounding near antipodal points
/// can otherwise push it past 1 and make `sqrt(1 - h)` NaN.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
  let phi1 = a.latitude.to_radians();
  let phi2 = b.latitude.to_radians();
  let delta_phi = (b.latitude - a.latitude).to_radians();
  let delta_lambda = (b.longitude - a.longitude).to_radians();

  let h = (delta_phi / 2.0).sin().powi(2)
    + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
  let h = h.clamp(0.0, 1.0);

  let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
  EARTH_RADIUS_M * c
}
