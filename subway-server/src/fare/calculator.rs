//! Tiered fare calculation.

use tracing::trace;

use crate::domain::Line;
use crate::path::Path;

use super::{AgeDiscountPolicy, DiscountPolicy, FareConfig, FareError};

/// Prices a trip from its distance, the lines ridden and the rider's age.
///
/// The fare is the distance-banded base fare plus the highest surcharge among
/// the lines ridden, passed through the discount policy last.
#[derive(Debug, Clone, Default)]
pub struct FareCalculator<P: DiscountPolicy = AgeDiscountPolicy> {
    config: FareConfig,
    policy: P,
}

impl<P: DiscountPolicy> FareCalculator<P> {
    /// Create a calculator with the given fare table and discount policy.
    pub fn new(config: FareConfig, policy: P) -> Self {
        Self { config, policy }
    }

    pub fn config(&self) -> &FareConfig {
        &self.config
    }

    /// Final fare for a trip.
    ///
    /// # Errors
    ///
    /// Returns `FareError::NoUsedLines` if `used_lines` is empty: a priced
    /// trip must have ridden at least one line.
    pub fn calculate(
        &self,
        distance: u64,
        used_lines: &[Line],
        age: u32,
    ) -> Result<u64, FareError> {
        let surcharge = used_lines
            .iter()
            .map(Line::extra_fare)
            .max()
            .ok_or(FareError::NoUsedLines)?;

        let base = self.base_fare(distance);
        let fare = self.policy.apply(base + u64::from(surcharge), age);

        trace!(distance, base, surcharge, age, fare, "fare calculated");
        Ok(fare)
    }

    /// Final fare for a found path.
    pub fn calculate_path(&self, path: &Path, age: u32) -> Result<u64, FareError> {
        self.calculate(path.distance(), path.used_lines(), age)
    }

    /// Distance-banded fare before surcharge and discount.
    ///
    /// One increment is charged as soon as a band is entered, then one more
    /// per full band unit travelled.
    pub fn base_fare(&self, distance: u64) -> u64 {
        let c = &self.config;
        if distance <= c.base_distance {
            return c.base_fare;
        }
        if distance <= c.first_band_limit {
            return c.base_fare
                + self.increments(distance - c.base_distance, c.first_band_unit.get());
        }
        c.base_fare
            + self.increments(
                c.first_band_limit.saturating_sub(c.base_distance),
                c.first_band_unit.get(),
            )
            + self.increments(distance - c.first_band_limit, c.far_band_unit.get())
    }

    fn increments(&self, over: u64, unit: u64) -> u64 {
        over.div_ceil(unit) * self.config.unit_fare
    }
}
