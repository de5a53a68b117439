#![cfg(test)]

use crate::{
    constants::RAY,
    loans::{execute_borrow, BorrowRequest},
    pool::{Pool, Reserve},
    storage::{self, NftConfig, PoolConfig, ReserveConfig, ReserveData},
    PoolContract,
};
use mock_interceptor::{MockInterceptor, MockInterceptorClient};
use mock_nft::{MockNft, MockNftClient};
use nft_oracle::NftOracleClient;
use sep_40_oracle::testutils::{Asset, MockPriceOracleClient, MockPriceOracleWASM};
use sep_41_token::testutils::{MockTokenClient, MockTokenWASM};
use soroban_sdk::{
    testutils::{Address as _, Ledger, LedgerInfo},
    vec, Address, Env, IntoVal, Symbol,
};

pub(crate) fn create_pool(e: &Env) -> Address {
    e.register_contract(None, PoolContract {})
}

pub(crate) fn jump(e: &Env, time: u64) {
    e.ledger().set(LedgerInfo {
        timestamp: e.ledger().timestamp() + time,
        protocol_version: 20,
        sequence_number: e.ledger().sequence() + (time / 5) as u32,
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 10,
        min_persistent_entry_ttl: 10,
        max_entry_ttl: 3110400,
    });
}

//************************************************
//           External Contract Helpers
//************************************************

// ***** Token *****

pub(crate) fn create_token_contract<'a>(
    e: &Env,
    admin: &Address,
) -> (Address, MockTokenClient<'a>) {
    let contract_address = Address::generate(e);
    e.register_contract_wasm(&contract_address, MockTokenWASM);
    let client = MockTokenClient::new(e, &contract_address);
    client.initialize(admin, &7, &"unit".into_val(e), &"test".into_val(e));
    (contract_address, client)
}

//***** Oracle ******

pub(crate) fn create_mock_oracle(e: &Env) -> (Address, MockPriceOracleClient) {
    let contract_address = e.register_contract_wasm(None, MockPriceOracleWASM);
    (
        contract_address.clone(),
        MockPriceOracleClient::new(e, &contract_address),
    )
}

pub(crate) fn create_nft_oracle<'a>(e: &Env, admin: &Address) -> (Address, NftOracleClient<'a>) {
    let (address, client) = nft_oracle::testutils::create_nft_oracle(e, admin, admin);
    // allow any price move so tests can crash prices
    client.set_data_validity_parameters(&10_0000000, &10_0000000, &0, &0);
    (address, client)
}

//***** NFT ******

pub(crate) fn create_nft<'a>(e: &Env, admin: &Address) -> (Address, MockNftClient<'a>) {
    let contract_address = e.register_contract(None, MockNft {});
    let client = MockNftClient::new(e, &contract_address);
    client.initialize(admin);
    (contract_address, client)
}

pub(crate) fn create_interceptor<'a>(e: &Env) -> (Address, MockInterceptorClient<'a>) {
    let contract_address = e.register_contract(None, MockInterceptor {});
    (
        contract_address.clone(),
        MockInterceptorClient::new(e, &contract_address),
    )
}

//************************************************
//            Object Creation Helpers
//************************************************

pub(crate) fn default_pool_config(e: &Env) -> PoolConfig {
    PoolConfig {
        reserve_oracle: Address::generate(e),
        nft_oracle: Address::generate(e),
        treasury: Address::generate(e),
        twap_interval: 0,
    }
}

//***** Reserve *****

pub(crate) fn default_reserve(e: &Env) -> Reserve {
    let (config, data) = default_reserve_meta();
    Reserve {
        asset: Address::generate(e),
        config,
        data,
        scalar: 1_0000000,
    }
}

pub(crate) fn default_reserve_meta() -> (ReserveConfig, ReserveData) {
    (
        ReserveConfig {
            index: 0,
            decimals: 7,
            reserve_factor: 1000,
            optimal_util: 800_000_000_000_000_000_000_000_000,
            base_rate: 10_000_000_000_000_000_000_000_000,
            slope_one: 40_000_000_000_000_000_000_000_000,
            slope_two: RAY,
            active: true,
            frozen: false,
            borrowing_enabled: true,
        },
        ReserveData {
            liquidity_index: RAY,
            variable_borrow_index: RAY,
            liquidity_rate: 0,
            variable_borrow_rate: 0,
            available_liquidity: 100_0000000,
            scaled_supply: 100_0000000,
            scaled_variable_debt: 0,
            accrued_to_treasury: 0,
            last_time: 0,
        },
    )
}

/// Create a reserve based on the supplied config and data.
///
/// Mints the reserve's available liquidity to the pool.
pub(crate) fn create_reserve(
    e: &Env,
    pool_address: &Address,
    token_address: &Address,
    reserve_config: &ReserveConfig,
    reserve_data: &ReserveData,
) {
    let mut new_reserve_config = reserve_config.clone();
    e.as_contract(pool_address, || {
        let index = storage::push_res_list(e, token_address);
        new_reserve_config.index = index;
        storage::set_res_config(e, token_address, &new_reserve_config);
        storage::set_res_data(e, token_address, reserve_data);
    });
    if reserve_data.available_liquidity > 0 {
        MockTokenClient::new(e, token_address)
            .mock_all_auths()
            .mint(pool_address, &reserve_data.available_liquidity);
    }
}

//***** NFT Collateral *****

pub(crate) fn default_nft_config() -> NftConfig {
    NftConfig {
        ltv: 5000,
        liq_threshold: 8000,
        liq_bonus: 500,
        redeem_duration: 24 * 60 * 60,
        auction_duration: 2 * 24 * 60 * 60,
        redeem_fine: 500,
        redeem_threshold: 5000,
        min_bid_fine: 2_0000000,
        max_supply: 0,
        max_token_id: 0,
        active: true,
        frozen: false,
    }
}

//***** Lending Setup *****

pub(crate) struct LendingFixture<'a> {
    pub pool: Address,
    pub reserve_asset: Address,
    pub reserve_client: MockTokenClient<'a>,
    pub nft_asset: Address,
    pub nft_client: MockNftClient<'a>,
    pub nft_oracle_client: NftOracleClient<'a>,
}

impl LendingFixture<'_> {
    /// Push a new NFT price at the current ledger time
    pub fn set_nft_price(&self, e: &Env, price: i128) {
        let last = self.nft_oracle_client.get_latest_timestamp(&self.nft_asset);
        let timestamp = e.ledger().timestamp().max(last + 1);
        self.nft_oracle_client
            .set_asset_data(&self.nft_asset, &price, &timestamp, &0);
    }
}

/// Setup a pool with a single reserve with 100 tokens of liquidity priced at $1, and a single
/// NFT collection priced at $100
pub(crate) fn setup_lending<'a>(e: &Env) -> LendingFixture<'a> {
    e.ledger().set(LedgerInfo {
        timestamp: 1_000_000,
        protocol_version: 20,
        sequence_number: 200_000,
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 10,
        min_persistent_entry_ttl: 10,
        max_entry_ttl: 3110400,
    });
    let bombadil = Address::generate(e);
    let pool = create_pool(e);

    let (reserve_asset, reserve_client) = create_token_contract(e, &bombadil);
    let (reserve_config, mut reserve_data) = default_reserve_meta();
    reserve_data.last_time = e.ledger().timestamp();
    create_reserve(e, &pool, &reserve_asset, &reserve_config, &reserve_data);

    let (oracle, oracle_client) = create_mock_oracle(e);
    oracle_client.set_data(
        &bombadil,
        &Asset::Other(Symbol::new(e, "USD")),
        &vec![e, Asset::Stellar(reserve_asset.clone())],
        &7,
        &300,
    );
    oracle_client.set_price_stable(&vec![e, 1_0000000]);

    let (nft_asset, nft_client) = create_nft(e, &bombadil);
    let (nft_oracle, nft_oracle_client) = create_nft_oracle(e, &bombadil);
    nft_oracle_client.add_asset(&nft_asset);
    nft_oracle_client.set_asset_data(
        &nft_asset,
        &100_0000000,
        &(e.ledger().timestamp() - 1000),
        &0,
    );

    let pool_config = PoolConfig {
        reserve_oracle: oracle,
        nft_oracle,
        treasury: Address::generate(e),
        twap_interval: 0,
    };
    e.as_contract(&pool, || {
        storage::set_admin(e, &bombadil);
        storage::set_emergency_admin(e, &bombadil);
        storage::set_pool_config(e, &pool_config);
        storage::push_nft_list(e, &nft_asset);
        storage::set_nft_config(e, &nft_asset, &default_nft_config());
    });

    LendingFixture {
        pool,
        reserve_asset,
        reserve_client,
        nft_asset,
        nft_client,
        nft_oracle_client,
    }
}

/// Mint `token_id` to `borrower` and borrow `amount` against it
pub(crate) fn borrow_against(
    e: &Env,
    fixture: &LendingFixture,
    borrower: &Address,
    token_id: u32,
    amount: i128,
) {
    fixture.nft_client.mint(borrower, &token_id);
    let request = BorrowRequest {
        asset: fixture.reserve_asset.clone(),
        amount,
        nft_asset: fixture.nft_asset.clone(),
        nft_token_id: token_id,
    };
    e.as_contract(&fixture.pool, || {
        let mut pool = Pool::load(e);
        execute_borrow(e, &mut pool, borrower, &request, borrower);
        pool.store_cached_reserves(e);
    });
}
