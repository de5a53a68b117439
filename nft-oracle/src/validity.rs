use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{panic_with_error, unwrap::UnwrapOptimized, Env};

use crate::{
    constants::SCALAR_7,
    errors::NftOracleError,
    storage::{PriceData, ValidityParams},
};

/// Require that a set of validity parameters is well formed, or panic.
///
/// ### Arguments
/// * `params` - The validity parameters
pub fn require_valid_params(e: &Env, params: &ValidityParams) {
    if params.max_price_deviation < 0
        || params.max_price_deviation_with_time < 0
        || params.max_price_deviation_with_time > params.max_price_deviation
    {
        panic_with_error!(e, NftOracleError::InvalidParams);
    }
}

/// Calculate the absolute deviation of `price` from `last_price` as a fraction expressed in 7 decimals
pub fn calc_deviation(price: i128, last_price: i128) -> i128 {
    (price - last_price)
        .abs()
        .fixed_div_floor(last_price, SCALAR_7)
        .unwrap_optimized()
}

/// Determine if a new price observation is acceptable given the last stored observation.
///
/// A price is rejected if:
/// * it arrives sooner than `minimum_update_time` after the last price
/// * it deviates from the last price by more than `max_price_deviation` before
///   `time_interval_with_price` has passed since the last price
/// * it deviates by more than the tighter `max_price_deviation_with_time` once
///   `time_interval_with_price` has passed
///
/// ### Arguments
/// * `params` - The validity parameters
/// * `last` - The last stored price observation
/// * `price` - The new price
/// * `timestamp` - The timestamp of the new price
pub fn is_valid_price(
    params: &ValidityParams,
    last: &PriceData,
    price: i128,
    timestamp: u64,
) -> bool {
    let elapsed = timestamp - last.timestamp;
    if elapsed < params.minimum_update_time {
        return false;
    }
    let deviation = calc_deviation(price, last.price);
    let max_deviation = if elapsed < params.time_interval_with_price {
        params.max_price_deviation
    } else {
        params.max_price_deviation_with_time
    };
    deviation <= max_deviation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils;

    fn params() -> ValidityParams {
        ValidityParams {
            max_price_deviation: 0_5000000,
            max_price_deviation_with_time: 0_1000000,
            time_interval_with_price: 1800,
            minimum_update_time: 60,
        }
    }

    fn last() -> PriceData {
        PriceData {
            price: 100_0000000,
            timestamp: 1000,
            round_id: 1,
        }
    }

    #[test]
    fn test_calc_deviation() {
        assert_eq!(calc_deviation(110_0000000, 100_0000000), 0_1000000);
        assert_eq!(calc_deviation(90_0000000, 100_0000000), 0_1000000);
        assert_eq!(calc_deviation(100_0000000, 100_0000000), 0);
    }

    #[test]
    fn test_is_valid_price_small_move() {
        assert!(is_valid_price(&params(), &last(), 105_0000000, 1100));
        assert!(is_valid_price(&params(), &last(), 105_0000000, 1000 + 100_000));
    }

    #[test]
    fn test_is_valid_price_over_max_deviation() {
        // over 50% is rejected at any time
        assert!(!is_valid_price(&params(), &last(), 151_0000000, 1000 + 60));
        assert!(!is_valid_price(&params(), &last(), 49_0000000, 1000 + 60));
        assert!(!is_valid_price(&params(), &last(), 151_0000000, 1000 + 100_000));
        // exactly 50% within the interval is accepted
        assert!(is_valid_price(&params(), &last(), 150_0000000, 1000 + 60));
    }

    #[test]
    fn test_is_valid_price_too_soon() {
        assert!(!is_valid_price(&params(), &last(), 100_0000000, 1059));
        assert!(is_valid_price(&params(), &last(), 100_0000000, 1060));
    }

    #[test]
    fn test_is_valid_price_interval_boundary() {
        // a 20% move is within the wide bound until the interval has passed
        assert!(is_valid_price(&params(), &last(), 120_0000000, 1000 + 1799));
        assert!(!is_valid_price(&params(), &last(), 120_0000000, 1000 + 1800));
        assert!(!is_valid_price(&params(), &last(), 80_0000000, 1000 + 1800));
        // exactly 10% is accepted on both sides of the boundary
        assert!(is_valid_price(&params(), &last(), 110_0000000, 1000 + 1799));
        assert!(is_valid_price(&params(), &last(), 110_0000000, 1000 + 1800));
        assert!(!is_valid_price(&params(), &last(), 110_0000001, 1000 + 1800));
    }

    #[test]
    fn test_is_valid_price_no_interval() {
        // without an interval the tighter bound always applies
        let mut params = params();
        params.time_interval_with_price = 0;
        assert!(is_valid_price(&params, &last(), 110_0000000, 1000 + 60));
        assert!(!is_valid_price(&params, &last(), 120_0000000, 1000 + 60));
    }

    #[test]
    fn test_require_valid_params() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        e.as_contract(&oracle, || {
            require_valid_params(&e, &params());
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1403)")]
    fn test_require_valid_params_negative() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let mut params = params();
        params.max_price_deviation_with_time = -1;
        e.as_contract(&oracle, || {
            require_valid_params(&e, &params);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1403)")]
    fn test_require_valid_params_tight_bound_looser() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let mut params = params();
        params.max_price_deviation_with_time = 0_6000000;
        e.as_contract(&oracle, || {
            require_valid_params(&e, &params);
        });
    }
}
