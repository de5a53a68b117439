use cast::i128;
use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::{
    errors::PoolError,
    math::{PercentMath, RayMath},
    storage::{self, ReserveConfig, ReserveData},
};

use super::interest::{
    calc_compounded_interest, calc_interest_rates, calc_linear_interest, calc_utilization,
};

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Reserve {
    pub asset: Address,        // the underlying asset address
    pub config: ReserveConfig, // the reserve's configuration
    pub data: ReserveData,     // the reserve's indices, rates and balances
    pub scalar: i128,          // scalar used for balances
}

impl Reserve {
    /// Load a Reserve from the ledger and accrue interest to the current ledger timestamp.
    ///
    /// **NOTE**: This function is not cached, and should be called from the Pool.
    ///
    /// ### Arguments
    /// * asset - The address of the underlying asset
    ///
    /// ### Panics
    /// Panics if the asset is not a reserve
    pub fn load(e: &Env, asset: &Address) -> Reserve {
        if !storage::has_res(e, asset) {
            panic_with_error!(e, PoolError::ReserveNotFound);
        }
        let config = storage::get_res_config(e, asset);
        let data = storage::get_res_data(e, asset);
        let mut reserve = Reserve {
            asset: asset.clone(),
            scalar: 10i128.pow(config.decimals),
            config,
            data,
        };
        reserve.accrue(e);
        reserve
    }

    /// Accrue interest to the current ledger timestamp. Indices only move while their rate is
    /// positive, and the reserve factor share of accrued debt interest is credited to the treasury.
    pub fn accrue(&mut self, e: &Env) {
        let now = e.ledger().timestamp();
        // short circuit if the reserve has already been updated this ledger
        if now == self.data.last_time {
            return;
        }

        let prev_borrow_index = self.data.variable_borrow_index;
        if self.data.liquidity_rate > 0 {
            self.data.liquidity_index =
                calc_linear_interest(e, self.data.liquidity_rate, self.data.last_time)
                    .ray_mul(e, self.data.liquidity_index);
        }
        if self.data.variable_borrow_rate > 0 && self.data.scaled_variable_debt > 0 {
            self.data.variable_borrow_index = calc_compounded_interest(
                e,
                self.data.variable_borrow_rate,
                self.data.last_time,
            )
            .ray_mul(e, self.data.variable_borrow_index);
        }

        if self.config.reserve_factor > 0 && self.data.scaled_variable_debt > 0 {
            let prev_debt = self
                .data
                .scaled_variable_debt
                .ray_mul(e, prev_borrow_index);
            let accrued_interest = self.total_debt(e) - prev_debt;
            let treasury_share =
                accrued_interest.percent_mul(e, i128(self.config.reserve_factor));
            if treasury_share > 0 {
                self.data.accrued_to_treasury +=
                    treasury_share.ray_div(e, self.data.liquidity_index);
            }
        }

        self.data.last_time = now;
    }

    /// Store the updated reserve to the ledger.
    pub fn store(&self, e: &Env) {
        storage::set_res_data(e, &self.asset, &self.data);
    }

    /// Recalculate the supply and borrow rates from the current utilization. Must be called
    /// after any change to the reserve's liquidity or debt.
    pub fn update_rates(&mut self, e: &Env) {
        let (liquidity_rate, borrow_rate) = calc_interest_rates(
            e,
            &self.config,
            self.data.available_liquidity,
            self.total_debt(e),
        );
        self.data.liquidity_rate = liquidity_rate;
        self.data.variable_borrow_rate = borrow_rate;
    }

    /// Fetch the current utilization rate for the reserve in ray
    pub fn utilization(&self, e: &Env) -> i128 {
        calc_utilization(e, self.data.available_liquidity, self.total_debt(e))
    }

    /// Fetch the total debt for the reserve in underlying tokens
    pub fn total_debt(&self, e: &Env) -> i128 {
        self.to_asset_from_scaled_debt(e, self.data.scaled_variable_debt)
    }

    /// Fetch the total deposits, including amounts owed to the treasury, in underlying tokens
    pub fn total_supply(&self, e: &Env) -> i128 {
        self.to_asset_from_scaled_supply(
            e,
            self.data.scaled_supply + self.data.accrued_to_treasury,
        )
    }

    /********** Validation **********/

    /// Require that the reserve is active, or panic
    pub fn require_active(&self, e: &Env) {
        if !self.config.active {
            panic_with_error!(e, PoolError::ReserveInactive);
        }
    }

    /// Require that the reserve is active and not frozen, or panic
    pub fn require_active_not_frozen(&self, e: &Env) {
        self.require_active(e);
        if self.config.frozen {
            panic_with_error!(e, PoolError::ReserveFrozen);
        }
    }

    /// Require that the reserve has enough liquidity available to lend `amount`, or panic
    pub fn require_liquidity(&self, e: &Env, amount: i128) {
        if self.data.available_liquidity < amount {
            panic_with_error!(e, PoolError::InsufficientLiquidity);
        }
    }

    /********** Conversion Functions **********/

    /// Convert scaled debt to the corresponding asset value
    ///
    /// ### Arguments
    /// * `scaled_amount` - The scaled debt to convert
    pub fn to_asset_from_scaled_debt(&self, e: &Env, scaled_amount: i128) -> i128 {
        scaled_amount.ray_mul(e, self.data.variable_borrow_index)
    }

    /// Convert scaled deposits to the corresponding asset value
    ///
    /// ### Arguments
    /// * `scaled_amount` - The scaled deposits to convert
    pub fn to_asset_from_scaled_supply(&self, e: &Env, scaled_amount: i128) -> i128 {
        scaled_amount.ray_mul(e, self.data.liquidity_index)
    }

    /// Convert asset tokens to the corresponding scaled debt - rounding down
    ///
    /// ### Arguments
    /// * `amount` - The amount of tokens to convert
    pub fn to_scaled_debt(&self, e: &Env, amount: i128) -> i128 {
        amount.ray_div(e, self.data.variable_borrow_index)
    }

    /// Convert asset tokens to the corresponding scaled deposits - rounding down
    ///
    /// ### Arguments
    /// * `amount` - The amount of tokens to convert
    pub fn to_scaled_supply_down(&self, e: &Env, amount: i128) -> i128 {
        amount.ray_div(e, self.data.liquidity_index)
    }

    /// Convert asset tokens to the corresponding scaled deposits - rounding up
    ///
    /// ### Arguments
    /// * `amount` - The amount of tokens to convert
    pub fn to_scaled_supply_up(&self, e: &Env, amount: i128) -> i128 {
        amount.ray_div_up(e, self.data.liquidity_index)
    }

    /********** Balance Changes **********/

    /// Add borrowed debt to the reserve and remove the lent tokens from its liquidity.
    /// Returns the scaled debt added.
    ///
    /// ### Panics
    /// If the scaled amount rounds to zero or the reserve lacks liquidity
    pub fn borrow(&mut self, e: &Env, amount: i128) -> i128 {
        self.require_liquidity(e, amount);
        let scaled_amount = self.to_scaled_debt(e, amount);
        if scaled_amount <= 0 {
            panic_with_error!(e, PoolError::InvalidScaledAmount);
        }
        self.data.scaled_variable_debt += scaled_amount;
        self.data.available_liquidity -= amount;
        scaled_amount
    }

    /// Remove repaid debt from the reserve and add the repaid tokens to its liquidity
    ///
    /// ### Arguments
    /// * `scaled_amount` - The scaled debt repaid
    /// * `amount` - The tokens repaid
    pub fn repay(&mut self, scaled_amount: i128, amount: i128) {
        self.data.scaled_variable_debt -= scaled_amount;
        self.data.available_liquidity += amount;
    }
}
