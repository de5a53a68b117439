use soroban_sdk::Env;

use crate::constants::{HALF_PERCENT, PERCENTAGE_FACTOR};

use super::mul_div;

/// Arithmetic for basis point percentages
pub trait PercentMath {
    /// Multiply a value by a percentage expressed in basis points, rounding half up
    fn percent_mul(self, e: &Env, percentage: i128) -> i128;

    /// Divide a value by a percentage expressed in basis points, rounding half up
    fn percent_div(self, e: &Env, percentage: i128) -> i128;
}

impl PercentMath for i128 {
    fn percent_mul(self, e: &Env, percentage: i128) -> i128 {
        if self == 0 || percentage == 0 {
            return 0;
        }
        mul_div(e, self, percentage, HALF_PERCENT, PERCENTAGE_FACTOR)
    }

    fn percent_div(self, e: &Env, percentage: i128) -> i128 {
        mul_div(e, self, PERCENTAGE_FACTOR, percentage / 2, percentage)
    }
}
