use sep_41_token::TokenClient;
use soroban_sdk::{panic_with_error, Address, Env, Vec};

use crate::{constants::MAX_AMOUNT, errors::PoolError, storage, validator::require_positive};

use super::pool::Pool;

/// Deposit `amount` of `asset` from `from`, crediting the deposit to `on_behalf_of`.
/// Returns the scaled deposit minted.
///
/// ### Panics
/// If the pool is paused, the reserve is inactive or frozen, or the amount is too small to mint
pub fn execute_deposit(
    e: &Env,
    from: &Address,
    asset: &Address,
    amount: i128,
    on_behalf_of: &Address,
) -> i128 {
    require_positive(e, amount);
    let pool = Pool::load(e);
    pool.require_not_paused(e);

    let mut reserve = pool.load_reserve(e, asset);
    reserve.require_active_not_frozen(e);

    let scaled_amount = reserve.to_scaled_supply_down(e, amount);
    if scaled_amount <= 0 {
        panic_with_error!(e, PoolError::InvalidScaledAmount);
    }
    reserve.data.scaled_supply += scaled_amount;
    reserve.data.available_liquidity += amount;
    reserve.update_rates(e);
    reserve.store(e);

    let user_scaled = storage::get_deposit(e, on_behalf_of, asset);
    storage::set_deposit(e, on_behalf_of, asset, user_scaled + scaled_amount);

    TokenClient::new(e, asset).transfer(from, &e.current_contract_address(), &amount);
    scaled_amount
}

/// Withdraw `amount` of `asset` deposited by `from` and send it to `to`. An amount of
/// `i128::MAX` withdraws the full deposit. Returns the amount withdrawn.
///
/// ### Panics
/// If the pool is paused, the reserve is inactive, the deposit is too small or the reserve
/// lacks liquidity
pub fn execute_withdraw(
    e: &Env,
    from: &Address,
    asset: &Address,
    amount: i128,
    to: &Address,
) -> i128 {
    require_positive(e, amount);
    let pool = Pool::load(e);
    pool.require_not_paused(e);

    let mut reserve = pool.load_reserve(e, asset);
    reserve.require_active(e);

    let user_scaled = storage::get_deposit(e, from, asset);
    let balance = reserve.to_asset_from_scaled_supply(e, user_scaled);
    let (amount, scaled_amount) = if amount == MAX_AMOUNT || amount == balance {
        (balance, user_scaled)
    } else {
        (amount, reserve.to_scaled_supply_up(e, amount))
    };
    if amount == 0 || scaled_amount > user_scaled {
        panic_with_error!(e, PoolError::BalanceError);
    }
    reserve.require_liquidity(e, amount);

    reserve.data.scaled_supply -= scaled_amount;
    reserve.data.available_liquidity -= amount;
    reserve.update_rates(e);
    reserve.store(e);
    storage::set_deposit(e, from, asset, user_scaled - scaled_amount);

    TokenClient::new(e, asset).transfer(&e.current_contract_address(), to, &amount);
    amount
}

/// Credit the interest owed to the treasury for each asset to the treasury's deposit.
/// Returns the scaled deposit credited for each asset.
pub fn execute_mint_to_treasury(e: &Env, assets: &Vec<Address>) -> Vec<i128> {
    let pool = Pool::load(e);
    let treasury = pool.config.treasury.clone();
    let mut minted = Vec::new(e);
    for asset in assets.iter() {
        let mut reserve = pool.load_reserve(e, &asset);
        let scaled_amount = reserve.data.accrued_to_treasury;
        if scaled_amount > 0 {
            reserve.data.accrued_to_treasury = 0;
            reserve.data.scaled_supply += scaled_amount;
            let treasury_scaled = storage::get_deposit(e, &treasury, &asset);
            storage::set_deposit(e, &treasury, &asset, treasury_scaled + scaled_amount);
        }
        reserve.store(e);
        minted.push_back(scaled_amount);
    }
    minted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::RAY, storage::PauseData, testutils};
    use soroban_sdk::{
        testutils::{Address as _, Ledger, LedgerInfo},
        vec,
    };

    fn set_time(e: &Env, timestamp: u64) {
        e.ledger().set(LedgerInfo {
            timestamp,
            protocol_version: 20,
            sequence_number: 100,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 2000000,
        });
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        set_time(&e, 1000);

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        let pool = testutils::create_pool(&e);
        let (underlying, underlying_client) = testutils::create_token_contract(&e, &bombadil);
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.last_time = 1000;
        testutils::create_reserve(&e, &pool, &underlying, &reserve_config, &reserve_data);
        underlying_client.mint(&samwise, &10_0000000);

        let pool_config = testutils::default_pool_config(&e);
        e.as_contract(&pool, || {
            storage::set_pool_config(&e, &pool_config);

            let scaled = execute_deposit(&e, &samwise, &underlying, 10_0000000, &frodo);
            assert_eq!(scaled, 10_0000000);
            assert_eq!(storage::get_deposit(&e, &frodo, &underlying), 10_0000000);
            assert_eq!(storage::get_deposit(&e, &samwise, &underlying), 0);
            let res_data = storage::get_res_data(&e, &underlying);
            assert_eq!(res_data.available_liquidity, 110_0000000);
            assert_eq!(res_data.scaled_supply, 110_0000000);
            assert_eq!(underlying_client.balance(&samwise), 0);

            let withdrawn = execute_withdraw(&e, &frodo, &underlying, 4_0000000, &samwise);
            assert_eq!(withdrawn, 4_0000000);
            assert_eq!(storage::get_deposit(&e, &frodo, &underlying), 6_0000000);
            assert_eq!(underlying_client.balance(&samwise), 4_0000000);

            let withdrawn = execute_withdraw(&e, &frodo, &underlying, MAX_AMOUNT, &frodo);
            assert_eq!(withdrawn, 6_0000000);
            assert_eq!(storage::get_deposit(&e, &frodo, &underlying), 0);
            assert_eq!(underlying_client.balance(&frodo), 6_0000000);
            let res_data = storage::get_res_data(&e, &underlying);
            assert_eq!(res_data.available_liquidity, 100_0000000);
            assert_eq!(res_data.scaled_supply, 100_0000000);
        });
    }

    #[test]
    fn test_withdraw_with_interest() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        set_time(&e, 1000);

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let pool = testutils::create_pool(&e);
        let (underlying, underlying_client) = testutils::create_token_contract(&e, &bombadil);
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.liquidity_index = RAY + RAY / 10;
        reserve_data.last_time = 1000;
        testutils::create_reserve(&e, &pool, &underlying, &reserve_config, &reserve_data);
        underlying_client.mint(&samwise, &11_0000000);

        let pool_config = testutils::default_pool_config(&e);
        e.as_contract(&pool, || {
            storage::set_pool_config(&e, &pool_config);

            let scaled = execute_deposit(&e, &samwise, &underlying, 11_0000000, &samwise);
            assert_eq!(scaled, 10_0000000);

            let withdrawn = execute_withdraw(&e, &samwise, &underlying, MAX_AMOUNT, &samwise);
            assert_eq!(withdrawn, 11_0000000);
            assert_eq!(storage::get_deposit(&e, &samwise, &underlying), 0);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #10)")]
    fn test_withdraw_over_balance() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        set_time(&e, 1000);

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let pool = testutils::create_pool(&e);
        let (underlying, underlying_client) = testutils::create_token_contract(&e, &bombadil);
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.last_time = 1000;
        testutils::create_reserve(&e, &pool, &underlying, &reserve_config, &reserve_data);
        underlying_client.mint(&samwise, &10_0000000);

        let pool_config = testutils::default_pool_config(&e);
        e.as_contract(&pool, || {
            storage::set_pool_config(&e, &pool_config);
            execute_deposit(&e, &samwise, &underlying, 10_0000000, &samwise);
            execute_withdraw(&e, &samwise, &underlying, 10_0000001, &samwise);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #8)")]
    fn test_withdraw_negative_amount() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        set_time(&e, 1000);

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let pool = testutils::create_pool(&e);
        let (underlying, underlying_client) = testutils::create_token_contract(&e, &bombadil);
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.last_time = 1000;
        testutils::create_reserve(&e, &pool, &underlying, &reserve_config, &reserve_data);
        underlying_client.mint(&samwise, &10_0000000);

        let pool_config = testutils::default_pool_config(&e);
        e.as_contract(&pool, || {
            storage::set_pool_config(&e, &pool_config);
            execute_deposit(&e, &samwise, &underlying, 10_0000000, &samwise);
            execute_withdraw(&e, &samwise, &underlying, -5_0000000, &samwise);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1204)")]
    fn test_withdraw_zero_amount() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        set_time(&e, 1000);

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let pool = testutils::create_pool(&e);
        let (underlying, underlying_client) = testutils::create_token_contract(&e, &bombadil);
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.last_time = 1000;
        testutils::create_reserve(&e, &pool, &underlying, &reserve_config, &reserve_data);
        underlying_client.mint(&samwise, &10_0000000);

        let pool_config = testutils::default_pool_config(&e);
        e.as_contract(&pool, || {
            storage::set_pool_config(&e, &pool_config);
            execute_deposit(&e, &samwise, &underlying, 10_0000000, &samwise);
            execute_withdraw(&e, &samwise, &underlying, 0, &samwise);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1212)")]
    fn test_deposit_frozen_reserve() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let pool = testutils::create_pool(&e);
        let (underlying, underlying_client) = testutils::create_token_contract(&e, &bombadil);
        let (mut reserve_config, reserve_data) = testutils::default_reserve_meta();
        reserve_config.frozen = true;
        testutils::create_reserve(&e, &pool, &underlying, &reserve_config, &reserve_data);
        underlying_client.mint(&samwise, &10_0000000);

        let pool_config = testutils::default_pool_config(&e);
        e.as_contract(&pool, || {
            storage::set_pool_config(&e, &pool_config);
            execute_deposit(&e, &samwise, &underlying, 10_0000000, &samwise);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1210)")]
    fn test_deposit_paused() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let pool = testutils::create_pool(&e);
        let (underlying, underlying_client) = testutils::create_token_contract(&e, &bombadil);
        let (reserve_config, reserve_data) = testutils::default_reserve_meta();
        testutils::create_reserve(&e, &pool, &underlying, &reserve_config, &reserve_data);
        underlying_client.mint(&samwise, &10_0000000);

        let pool_config = testutils::default_pool_config(&e);
        e.as_contract(&pool, || {
            storage::set_pool_config(&e, &pool_config);
            storage::set_pause(
                &e,
                &PauseData {
                    paused: true,
                    start_time: 0,
                    duration: 0,
                },
            );
            execute_deposit(&e, &samwise, &underlying, 10_0000000, &samwise);
        });
    }

    #[test]
    fn test_mint_to_treasury() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        set_time(&e, 1000);

        let bombadil = Address::generate(&e);
        let pool = testutils::create_pool(&e);
        let (underlying, _) = testutils::create_token_contract(&e, &bombadil);
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.accrued_to_treasury = 1_2345678;
        reserve_data.last_time = 1000;
        testutils::create_reserve(&e, &pool, &underlying, &reserve_config, &reserve_data);

        let pool_config = testutils::default_pool_config(&e);
        let treasury = pool_config.treasury.clone();
        e.as_contract(&pool, || {
            storage::set_pool_config(&e, &pool_config);

            let minted = execute_mint_to_treasury(&e, &vec![&e, underlying.clone()]);
            assert_eq!(minted, vec![&e, 1_2345678]);
            assert_eq!(storage::get_deposit(&e, &treasury, &underlying), 1_2345678);
            let res_data = storage::get_res_data(&e, &underlying);
            assert_eq!(res_data.accrued_to_treasury, 0);
            assert_eq!(res_data.scaled_supply, 101_2345678);

            // nothing left to mint
            let minted = execute_mint_to_treasury(&e, &vec![&e, underlying.clone()]);
            assert_eq!(minted, vec![&e, 0]);
        });
    }
}
