use cast::i128;
use soroban_sdk::Env;

use crate::{
    constants::{PERCENTAGE_FACTOR, RAY, SECONDS_PER_YEAR},
    math::{mul_div, PercentMath, RayMath},
    storage::ReserveConfig,
};

/// Calculate the interest accumulated at a linear annual `rate` since `last_time`
///
/// ### Arguments
/// * `rate` - The annual interest rate in ray
/// * `last_time` - The time interest was last accumulated
///
/// ### Returns
/// The accumulation factor in ray
pub fn calc_linear_interest(e: &Env, rate: i128, last_time: u64) -> i128 {
    let delta_time = i128(e.ledger().timestamp() - last_time);
    RAY + mul_div(e, rate, delta_time, 0, i128(SECONDS_PER_YEAR))
}

/// Calculate the interest accumulated at a compounding annual `rate` since `last_time`.
///
/// Approximates `(1 + rate / SECONDS_PER_YEAR) ^ delta_time` with the first
/// four terms of its binomial expansion.
///
/// ### Arguments
/// * `rate` - The annual interest rate in ray
/// * `last_time` - The time interest was last accumulated
///
/// ### Returns
/// The accumulation factor in ray
pub fn calc_compounded_interest(e: &Env, rate: i128, last_time: u64) -> i128 {
    let exp = i128(e.ledger().timestamp() - last_time);
    if exp == 0 {
        return RAY;
    }
    let exp_minus_one = exp - 1;
    let exp_minus_two = if exp > 2 { exp - 2 } else { 0 };

    let rate_per_second = rate / i128(SECONDS_PER_YEAR);
    let base_power_two = rate_per_second.ray_mul(e, rate_per_second);
    let base_power_three = base_power_two.ray_mul(e, rate_per_second);

    let second_term = mul_div(e, exp * exp_minus_one, base_power_two, 0, 2);
    let third_term = mul_div(e, exp * exp_minus_one * exp_minus_two, base_power_three, 0, 6);

    RAY + rate_per_second * exp + second_term + third_term
}

/// Calculate the utilization of a reserve
///
/// ### Arguments
/// * `available_liquidity` - The underlying tokens available to borrow
/// * `total_debt` - The total debt of the reserve
///
/// ### Returns
/// The utilization in ray
pub fn calc_utilization(e: &Env, available_liquidity: i128, total_debt: i128) -> i128 {
    if total_debt == 0 {
        return 0;
    }
    total_debt.ray_div(e, available_liquidity + total_debt)
}

/// Calculate the supply and borrow rates for a reserve based on its utilization
///
/// ### Arguments
/// * `config` - The reserve config
/// * `available_liquidity` - The underlying tokens available to borrow
/// * `total_debt` - The total debt of the reserve
///
/// ### Returns
/// (liquidity rate, variable borrow rate), both annual rates in ray
pub fn calc_interest_rates(
    e: &Env,
    config: &ReserveConfig,
    available_liquidity: i128,
    total_debt: i128,
) -> (i128, i128) {
    if total_debt == 0 {
        return (0, config.base_rate);
    }
    let util = calc_utilization(e, available_liquidity, total_debt);

    let borrow_rate = if util > config.optimal_util {
        let excess_util_ratio = (util - config.optimal_util).ray_div(e, RAY - config.optimal_util);
        config.base_rate + config.slope_one + config.slope_two.ray_mul(e, excess_util_ratio)
    } else {
        config.base_rate
            + util
                .ray_mul(e, config.slope_one)
                .ray_div(e, config.optimal_util)
    };

    let liquidity_rate = borrow_rate
        .ray_mul(e, util)
        .percent_mul(e, PERCENTAGE_FACTOR - i128(config.reserve_factor));
    (liquidity_rate, borrow_rate)
}
