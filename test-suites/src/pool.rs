use nft_lending_pool::{NftConfig, PoolClient, PoolContract, ReserveConfig};
use soroban_sdk::{Address, Env};

pub const RAY: i128 = 1_000_000_000_000_000_000_000_000_000;
pub const WAD: i128 = 1_000_000_000_000_000_000;

pub fn create_pool<'a>(e: &Env) -> (Address, PoolClient<'a>) {
    let contract_id = e.register_contract(None, PoolContract {});
    (contract_id.clone(), PoolClient::new(e, &contract_id))
}

pub fn default_reserve_config(decimals: u32) -> ReserveConfig {
    ReserveConfig {
        index: 0,
        decimals,
        reserve_factor: 1000,
        optimal_util: 650_000_000_000_000_000_000_000_000,
        base_rate: 0,
        slope_one: 80_000_000_000_000_000_000_000_000,
        slope_two: RAY,
        active: true,
        frozen: false,
        borrowing_enabled: true,
    }
}

pub fn default_nft_config() -> NftConfig {
    NftConfig {
        ltv: 4000,
        liq_threshold: 8000,
        liq_bonus: 500,
        redeem_duration: 2 * 24 * 60 * 60,
        auction_duration: 2 * 24 * 60 * 60 + 12 * 60 * 60,
        redeem_fine: 500,
        redeem_threshold: 5000,
        min_bid_fine: 50_0000000,
        max_supply: 0,
        max_token_id: 0,
        active: true,
        frozen: false,
    }
}
