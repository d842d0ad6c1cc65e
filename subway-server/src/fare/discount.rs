//! Age-based discount policies.

/// Capability to turn a pre-discount fare into the fare a rider pays.
///
/// Applied as the last step of fare calculation.
pub trait DiscountPolicy {
    /// Final fare for a rider of `age` given the pre-discount `fare`.
    fn apply(&self, fare: u64, age: u32) -> u64;
}

/// Charges every rider the full fare.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscount;

impl DiscountPolicy for NoDiscount {
    fn apply(&self, fare: u64, _age: u32) -> u64 {
        fare
    }
}

/// Discount for riders with `min_age <= age < max_age`.
///
/// The rider pays `(fare - deduction) * payable_percent / 100`, truncated,
/// and never less than zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountBracket {
    pub min_age: u32,
    pub max_age: u32,
    pub deduction: u64,
    pub payable_percent: u64,
}

impl DiscountBracket {
    pub fn new(min_age: u32, max_age: u32, deduction: u64, payable_percent: u64) -> Self {
        Self {
            min_age,
            max_age,
            deduction,
            payable_percent,
        }
    }

    /// Returns true if `age` falls in this bracket.
    pub fn contains(&self, age: u32) -> bool {
        (self.min_age..self.max_age).contains(&age)
    }

    fn discounted(&self, fare: u64) -> u64 {
        fare.saturating_sub(self.deduction)
            .saturating_mul(self.payable_percent)
            / 100
    }
}

/// Discount policy configured as a list of age brackets.
///
/// The first bracket containing the rider's age applies; riders outside
/// every bracket pay the full fare.
///
/// # Examples
///
/// ```
/// use subway_server::fare::{AgeDiscountPolicy, DiscountPolicy};
///
/// let policy = AgeDiscountPolicy::default();
/// assert_eq!(policy.apply(1350, 15), 800);
/// assert_eq!(policy.apply(1350, 8), 500);
/// assert_eq!(policy.apply(1350, 30), 1350);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeDiscountPolicy {
    brackets: Vec<DiscountBracket>,
}

impl AgeDiscountPolicy {
    /// Create a policy from brackets, checked in order.
    pub fn new(brackets: Vec<DiscountBracket>) -> Self {
        Self { brackets }
    }

    /// The bracket applying to `age`, if any.
    pub fn bracket_for(&self, age: u32) -> Option<&DiscountBracket> {
        self.brackets.iter().find(|b| b.contains(age))
    }
}

impl Default for AgeDiscountPolicy {
    /// Infants ride free; children pay half and teenagers 80% of the fare
    /// after a 350 deduction.
    fn default() -> Self {
        Self::new(vec![
            DiscountBracket::new(0, 6, 0, 0),
            DiscountBracket::new(6, 13, 350, 50),
            DiscountBracket::new(13, 19, 350, 80),
        ])
    }
}

impl DiscountPolicy for AgeDiscountPolicy {
    fn apply(&self, fare: u64, age: u32) -> u64 {
        match self.bracket_for(age) {
            Some(bracket) => bracket.discounted(fare),
            None => fare,
        }
    }
}
