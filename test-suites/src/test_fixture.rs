use std::ops::Index;

use crate::nft::{create_nft, NftClient};
use crate::pool::{create_pool, default_nft_config, default_reserve_config};
use crate::token::{create_token, TokenClient};
use nft_lending_pool::{NftConfig, PoolClient, PoolConfig, ReserveConfig, ReserveData};
use nft_oracle::NftOracleClient;
use sep_40_oracle::testutils::{Asset, MockPriceOracleClient, MockPriceOracleWASM};
use soroban_sdk::testutils::{Address as _, Ledger, LedgerInfo};
use soroban_sdk::{vec as svec, Address, Env, Symbol};

pub const SCALAR_7: i128 = 1_000_0000;
pub const SCALAR_9: i128 = 1_000_000_000;

#[derive(Clone, Copy)]
#[repr(usize)]
pub enum TokenIndex {
    STABLE = 0,
    WETH = 1,
}

#[derive(Clone, Copy)]
#[repr(usize)]
pub enum NftIndex {
    APES = 0,
    PUNKS = 1,
}

impl<T> Index<TokenIndex> for Vec<T> {
    type Output = T;

    fn index(&self, index: TokenIndex) -> &Self::Output {
        &self[index as usize]
    }
}

impl<T> Index<NftIndex> for Vec<T> {
    type Output = T;

    fn index(&self, index: NftIndex) -> &Self::Output {
        &self[index as usize]
    }
}

pub struct TestFixture<'a> {
    pub env: Env,
    pub bombadil: Address,
    pub users: Vec<Address>,
    pub pool: PoolClient<'a>,
    pub oracle: MockPriceOracleClient<'a>,
    pub nft_oracle: NftOracleClient<'a>,
    pub tokens: Vec<TokenClient<'a>>,
    pub nfts: Vec<NftClient<'a>>,
}

impl TestFixture<'_> {
    /// Create a new TestFixture for the NFT lending pool
    ///
    /// Deploys a STABLE (0) and wETH (1) reserve token and APES (0) and PUNKS (1) NFT
    /// collections, alongside the reserve price oracle, the NFT price oracle and the pool.
    /// No reserves or collections are registered with the pool.
    pub fn create<'a>() -> TestFixture<'a> {
        let e = Env::default();
        e.mock_all_auths();
        e.budget().reset_unlimited();

        let bombadil = Address::generate(&e);

        e.ledger().set(LedgerInfo {
            timestamp: 1441065600, // Sept 1st, 2015 12:00:00 AM UTC
            protocol_version: 20,
            sequence_number: 100,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 3110400,
        });

        // deploy tokens
        let (stable_id, stable_client) = create_token(&e, &bombadil, 7, "STABLE");
        let (eth_id, eth_client) = create_token(&e, &bombadil, 9, "wETH");

        // deploy nfts
        let (apes_id, apes_client) = create_nft(&e, &bombadil);
        let (punks_id, punks_client) = create_nft(&e, &bombadil);

        // deploy and initialize oracles
        let oracle_id = e.register_contract_wasm(None, MockPriceOracleWASM);
        let oracle_client = MockPriceOracleClient::new(&e, &oracle_id);
        oracle_client.set_data(
            &bombadil,
            &Asset::Other(Symbol::new(&e, "USD")),
            &svec![
                &e,
                Asset::Stellar(stable_id.clone()),
                Asset::Stellar(eth_id.clone()),
            ],
            &7,
            &300,
        );
        oracle_client.set_price_stable(&svec![&e, 1_0000000, 2000_0000000]);

        let (nft_oracle_id, nft_oracle_client) =
            nft_oracle::testutils::create_nft_oracle(&e, &bombadil, &bombadil);
        // permit sudden floor price moves
        nft_oracle_client.set_data_validity_parameters(&10_0000000, &10_0000000, &0, &0);
        nft_oracle_client.add_assets(&svec![&e, apes_id.clone(), punks_id.clone()]);
        nft_oracle_client.set_asset_data(&apes_id, &(10_000 * SCALAR_7), &e.ledger().timestamp(), &1);
        nft_oracle_client.set_asset_data(&punks_id, &(50_000 * SCALAR_7), &e.ledger().timestamp(), &1);

        // deploy and initialize the pool
        let (_, pool_client) = create_pool(&e);
        pool_client.initialize(
            &bombadil,
            &bombadil,
            &PoolConfig {
                reserve_oracle: oracle_id,
                nft_oracle: nft_oracle_id,
                treasury: Address::generate(&e),
                twap_interval: 0,
            },
        );

        TestFixture {
            env: e,
            bombadil,
            users: vec![],
            pool: pool_client,
            oracle: oracle_client,
            nft_oracle: nft_oracle_client,
            tokens: vec![stable_client, eth_client],
            nfts: vec![apes_client, punks_client],
        }
    }

    /// Register a token as a reserve of the pool
    pub fn create_pool_reserve(&self, asset_index: TokenIndex, reserve_config: &ReserveConfig) {
        let token = &self.tokens[asset_index];
        self.pool.init_reserve(&token.address, reserve_config);
    }

    /// Register an NFT collection as collateral for the pool
    pub fn create_pool_nft(&self, nft_index: NftIndex, nft_config: &NftConfig) {
        let nft = &self.nfts[nft_index];
        self.pool.init_nft(&nft.address, nft_config);
    }

    /// Register every token and NFT collection with default configurations
    pub fn create_default_markets(&self) {
        self.create_pool_reserve(TokenIndex::STABLE, &default_reserve_config(7));
        self.create_pool_reserve(TokenIndex::WETH, &default_reserve_config(9));
        self.create_pool_nft(NftIndex::APES, &default_nft_config());
        self.create_pool_nft(NftIndex::PUNKS, &default_nft_config());
    }

    /********** Oracle Helpers ***********/

    /// Publish a new price for an NFT collection at the current ledger timestamp
    pub fn set_nft_price(&self, nft_index: NftIndex, price: i128) {
        let nft = &self.nfts[nft_index];
        self.nft_oracle
            .set_asset_data(&nft.address, &price, &self.env.ledger().timestamp(), &1);
    }

    /// Publish the reserve prices at the current ledger timestamp
    pub fn refresh_reserve_prices(&self) {
        self.oracle
            .set_price_stable(&svec![&self.env, 1_0000000, 2000_0000000]);
    }

    /********** Pool Helpers ***********/

    pub fn read_reserve_data(&self, asset_index: TokenIndex) -> ReserveData {
        self.pool.get_reserve_data(&self.tokens[asset_index].address)
    }

    /// Mint an NFT to `to` and return its token id
    pub fn mint_nft(&self, nft_index: NftIndex, to: &Address, token_id: u32) -> u32 {
        self.nfts[nft_index].mint(to, &token_id);
        token_id
    }

    /********** Chain Helpers ***********/

    /// Advance the ledger by `time` seconds and republish the reserve prices
    pub fn jump(&self, time: u64) {
        let blocks = time / 5;
        self.env.ledger().set(LedgerInfo {
            timestamp: self.env.ledger().timestamp().saturating_add(time),
            protocol_version: 20,
            sequence_number: self.env.ledger().sequence().saturating_add(blocks as u32),
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 3110400,
        });
        self.refresh_reserve_prices();
    }
}
