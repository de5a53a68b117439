use crate::{
    constants::{PERCENTAGE_FACTOR, RAY},
    errors::PoolError,
    storage::{self, NftConfig, PoolConfig, ReserveConfig, ReserveData},
};
use cast::i128;
use soroban_sdk::{panic_with_error, Address, Env};

use super::pool::Pool;

/// Initialize the pool
///
/// Panics if the pool is already initialized
pub fn execute_initialize(
    e: &Env,
    admin: &Address,
    emergency_admin: &Address,
    config: &PoolConfig,
) {
    if storage::has_admin(e) {
        panic_with_error!(e, PoolError::AlreadyInitializedError);
    }

    storage::set_admin(e, admin);
    storage::set_emergency_admin(e, emergency_admin);
    storage::set_pool_config(e, config);
}

/// Update the pool
pub fn execute_update_pool(e: &Env, config: &PoolConfig) {
    storage::set_pool_config(e, config);
}

/// Initialize a reserve for the pool
pub fn initialize_reserve(e: &Env, asset: &Address, config: &ReserveConfig) -> u32 {
    if storage::has_res(e, asset) {
        panic_with_error!(e, PoolError::AlreadyInitializedError);
    }

    require_valid_reserve_config(e, config);
    let index = storage::push_res_list(e, asset);

    let mut reserve_config = config.clone();
    reserve_config.index = index;
    storage::set_res_config(e, asset, &reserve_config);
    let init_data = ReserveData {
        liquidity_index: RAY,
        variable_borrow_index: RAY,
        liquidity_rate: 0,
        variable_borrow_rate: config.base_rate,
        available_liquidity: 0,
        scaled_supply: 0,
        scaled_variable_debt: 0,
        accrued_to_treasury: 0,
        last_time: e.ledger().timestamp(),
    };
    storage::set_res_data(e, asset, &init_data);
    index
}

/// Update a reserve in the pool
pub fn execute_update_reserve(e: &Env, asset: &Address, config: &ReserveConfig) {
    require_valid_reserve_config(e, config);

    // accrue interest under the old config before switching rate curves
    let pool = Pool::load(e);
    let mut reserve = pool.load_reserve(e, asset);

    // force index to remain constant and only allow metadata based changes
    let mut new_config = config.clone();
    new_config.index = reserve.config.index;
    reserve.config = new_config;
    reserve.update_rates(e);
    reserve.store(e);

    storage::set_res_config(e, asset, &reserve.config);
}

/// Initialize an NFT collection as collateral for the pool
pub fn execute_init_nft(e: &Env, nft_asset: &Address, config: &NftConfig) {
    if storage::get_nft_config(e, nft_asset).is_some() {
        panic_with_error!(e, PoolError::AlreadyInitializedError);
    }
    require_valid_nft_config(e, config);

    storage::push_nft_list(e, nft_asset);
    storage::set_nft_config(e, nft_asset, config);
}

/// Update the collateral configuration of an NFT collection
pub fn execute_update_nft(e: &Env, nft_asset: &Address, config: &NftConfig) {
    if storage::get_nft_config(e, nft_asset).is_none() {
        panic_with_error!(e, PoolError::NftNotFound);
    }
    require_valid_nft_config(e, config);

    storage::set_nft_config(e, nft_asset, config);
}

fn require_valid_reserve_config(e: &Env, config: &ReserveConfig) {
    if config.decimals > 18
        || i128(config.reserve_factor) > PERCENTAGE_FACTOR
        || config.optimal_util <= 0
        || config.optimal_util >= RAY
        || config.base_rate < 0
        || config.slope_one < 0
        || config.slope_two < 0
    {
        panic_with_error!(e, PoolError::InvalidReserveConfig);
    }
}

fn require_valid_nft_config(e: &Env, config: &NftConfig) {
    if config.ltv > config.liq_threshold
        || i128(config.liq_threshold) > PERCENTAGE_FACTOR
        || i128(config.liq_bonus) > PERCENTAGE_FACTOR
        || i128(config.redeem_fine) > PERCENTAGE_FACTOR
        || i128(config.redeem_threshold) > PERCENTAGE_FACTOR
        || config.redeem_duration > config.auction_duration
        || config.min_bid_fine < 0
    {
        panic_with_error!(e, PoolError::InvalidNftConfig);
    }
}
