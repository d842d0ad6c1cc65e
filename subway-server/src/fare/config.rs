//! Fare table configuration.

use std::num::NonZeroU64;

const fn km(n: u64) -> NonZeroU64 {
    match NonZeroU64::new(n) {
        Some(n) => n,
        None => panic!("fare band unit must be non-zero"),
    }
}

/// Distance bands and unit prices of the fare table.
///
/// Fares are in whole currency units and distances in whole kilometres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareConfig {
    /// Fare for any trip up to `base_distance`.
    pub base_fare: u64,

    /// Distance covered by the base fare.
    pub base_distance: u64,

    /// Price of one distance increment.
    pub unit_fare: u64,

    /// Upper end of the first band (inclusive).
    pub first_band_limit: u64,

    /// Increment length inside the first band.
    pub first_band_unit: NonZeroU64,

    /// Increment length beyond the first band.
    pub far_band_unit: NonZeroU64,
}

impl FareConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        base_fare: u64,
        base_distance: u64,
        unit_fare: u64,
        first_band_limit: u64,
        first_band_unit: NonZeroU64,
        far_band_unit: NonZeroU64,
    ) -> Self {
        Self {
            base_fare,
            base_distance,
            unit_fare,
            first_band_limit,
            first_band_unit,
            far_band_unit,
        }
    }
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            base_fare: 1250,
            base_distance: 10,
            unit_fare: 100,
            first_band_limit: 50,
            first_band_unit: km(5),
            far_band_unit: km(8),
        }
    }
}
