//! Fare calculation.
//!
//! A trip is priced from its distance (banded), the most expensive line it
//! rides (surcharge) and the rider's age (discount policy).

mod calculator;
mod config;
mod discount;

pub use calculator::FareCalculator;
pub use config::FareConfig;
pub use discount::{AgeDiscountPolicy, DiscountBracket, DiscountPolicy, NoDiscount};

/// A fare was requested for an inconsistent trip.
///
/// These indicate a caller bug rather than bad user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FareError {
    /// No line was ridden, so no surcharge can be determined
    #[error("cannot price a trip that rides no line")]
    NoUsedLines,
}
