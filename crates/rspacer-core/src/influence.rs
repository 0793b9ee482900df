//! Celestial influence on displayed noise values
//!
//! Three independent multipliers (sun, moon, planets) scale the base noise
//! level. Factors are not validated; any finite value is accepted.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of the influence slider range
pub const MIN_FACTOR: f64 = 0.5;
/// Upper bound of the influence slider range
pub const MAX_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialInfluence {
    pub solar: f64,
    pub lunar: f64,
    pub planetary: f64,
}

impl Default for CelestialInfluence {
    fn default() -> Self {
        Self {
            solar: 1.0,
            lunar: 1.0,
            planetary: 1.0,
        }
    }
}

impl CelestialInfluence {
    pub fn new(solar: f64, lunar: f64, planetary: f64) -> Self {
        Self {
            solar,
            lunar,
            planetary,
        }
    }

    /// Combined multiplier
    pub fn total(&self) -> f64 {
        self.solar * self.lunar * self.planetary
    }

    /// Scale a base noise level by the combined multiplier
    pub fn apply(&self, base_noise: f64) -> f64 {
        base_noise * self.total()
    }

    /// Copy with each factor clamped to the slider range
    pub fn clamped(&self) -> Self {
        Self {
            solar: self.solar.clamp(MIN_FACTOR, MAX_FACTOR),
            lunar: self.lunar.clamp(MIN_FACTOR, MAX_FACTOR),
            planetary: self.planetary.clamp(MIN_FACTOR, MAX_FACTOR),
        }
    }
}

impl fmt::Display for CelestialInfluence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Солнце: {:.2}x, Луна: {:.2}x, Планеты: {:.2}x, Общее: {:.2}x",
            self.solar,
            self.lunar,
            self.planetary,
            self.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let influence = CelestialInfluence::default();
        assert_eq!(influence.total(), 1.0);
        assert_eq!(influence.apply(-90.0), -90.0);
    }

    #[test]
    fn test_total_is_product() {
        let influence = CelestialInfluence::new(1.5, 0.5, 2.0);
        assert_eq!(influence.total(), 1.5);
        assert_eq!(influence.apply(-80.0), -120.0);
    }

    #[test]
    fn test_status_line() {
        let influence = CelestialInfluence::new(1.25, 1.0, 0.8);
        assert_eq!(
            influence.to_string(),
            "Солнце: 1.25x, Луна: 1.00x, Планеты: 0.80x, Общее: 1.00x"
        );
    }

    #[test]
    fn test_clamped() {
        let influence = CelestialInfluence::new(3.0, 0.1, 1.2).clamped();
        assert_eq!(influence, CelestialInfluence::new(2.0, 0.5, 1.2));
    }
}
