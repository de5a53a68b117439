use soroban_sdk::{panic_with_error, Env};

use crate::errors::PoolError;

/// Require that an incoming amount is not negative
///
/// ### Arguments
/// * `amount` - The amount to check
///
/// ### Panics
/// If the number is negative
pub fn require_nonnegative(e: &Env, amount: i128) {
    if amount.is_negative() {
        panic_with_error!(e, PoolError::NegativeAmountError);
    }
}

/// Require that an incoming amount is positive
///
/// ### Arguments
/// * `amount` - The amount to check
///
/// ### Panics
/// If the number is negative or zero
pub fn require_positive(e: &Env, amount: i128) {
    require_nonnegative(e, amount);
    if amount == 0 {
        panic_with_error!(e, PoolError::InvalidAmount);
    }
}
