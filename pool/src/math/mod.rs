use soroban_sdk::{panic_with_error, Env, I256};

use crate::errors::PoolError;

mod percent;
pub use percent::PercentMath;

mod ray;
pub use ray::{RayMath, WadMath};

/// Calculate `(x * y + rounding) / denominator`.
///
/// The intermediate product is computed in 128 bits and only widened to 256 bits if it
/// would overflow, so results that fit in an i128 never fail on phantom overflow.
///
/// ### Panics
/// If the denominator is zero or the result does not fit in an i128
pub(crate) fn mul_div(e: &Env, x: i128, y: i128, rounding: i128, denominator: i128) -> i128 {
    if denominator == 0 {
        panic_with_error!(e, PoolError::InternalError);
    }
    match x.checked_mul(y).and_then(|r| r.checked_add(rounding)) {
        Some(r) => r / denominator,
        None => {
            let wide = I256::from_i128(e, x)
                .mul(&I256::from_i128(e, y))
                .add(&I256::from_i128(e, rounding))
                .div(&I256::from_i128(e, denominator));
            match wide.to_i128() {
                Some(result) => result,
                None => panic_with_error!(e, PoolError::OverflowError),
            }
        }
    }
}
