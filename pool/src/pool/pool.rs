use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{map, panic_with_error, unwrap::UnwrapOptimized, vec, Address, Env, Map, Vec};

use sep_40_oracle::{Asset, PriceFeedClient};

use crate::{
    constants::MAX_PRICE_AGE,
    dependencies::NftPriceClient,
    errors::PoolError,
    storage::{self, PauseData, PoolConfig},
};

use super::reserve::Reserve;

pub struct Pool {
    pub config: PoolConfig,
    pub pause: PauseData,
    pub reserves: Map<Address, Reserve>,
    reserves_to_store: Vec<Address>,
    price_decimals: Option<u32>,
    prices: Map<Address, i128>,
    nft_price_decimals: Option<u32>,
    nft_prices: Map<Address, i128>,
}

impl Pool {
    /// Load the Pool from the ledger
    pub fn load(e: &Env) -> Self {
        let pool_config = storage::get_pool_config(e);
        Pool {
            config: pool_config,
            pause: storage::get_pause(e),
            reserves: map![e],
            reserves_to_store: vec![e],
            price_decimals: None,
            prices: map![e],
            nft_price_decimals: None,
            nft_prices: map![e],
        }
    }

    /// Load a Reserve from the ledger and update to the current ledger timestamp. Returns
    /// a cached version if it exists.
    ///
    /// ### Arguments
    /// * asset - The address of the underlying asset
    pub fn load_reserve(&self, e: &Env, asset: &Address) -> Reserve {
        if let Some(reserve) = self.reserves.get(asset.clone()) {
            return reserve;
        }
        Reserve::load(e, asset)
    }

    /// Cache the updated reserve in the pool.
    ///
    /// ### Arguments
    /// * reserve - The updated reserve
    /// * write - If the reserve needs to be written to the ledger
    pub fn cache_reserve(&mut self, reserve: Reserve, write: bool) {
        if !self.reserves_to_store.contains(&reserve.asset) && write {
            self.reserves_to_store.push_back(reserve.asset.clone());
        }
        self.reserves.set(reserve.asset.clone(), reserve);
    }

    /// Store the cached reserves to the ledger that need to be written.
    pub fn store_cached_reserves(&self, e: &Env) {
        for address in self.reserves_to_store.iter() {
            let reserve = self.reserves.get_unchecked(address);
            reserve.store(e);
        }
    }

    /// Require that the pool is not paused, or panic.
    pub fn require_not_paused(&self, e: &Env) {
        if self.pause.paused {
            panic_with_error!(e, PoolError::PoolPaused);
        }
    }

    /// Load the decimals of the prices for the Pool's reserve oracle. Returns a cached version if
    /// one already exists.
    pub fn load_price_decimals(&mut self, e: &Env) -> u32 {
        if let Some(decimals) = self.price_decimals {
            return decimals;
        }
        let oracle_client = PriceFeedClient::new(e, &self.config.reserve_oracle);
        let decimals = oracle_client.decimals();
        self.price_decimals = Some(decimals);
        decimals
    }

    /// Load a reserve price from the Pool's reserve oracle. Returns a cached version if one
    /// already exists.
    ///
    /// ### Arguments
    /// * asset - The address of the underlying asset
    ///
    /// ### Panics
    /// If the price is missing, not positive or stale
    pub fn load_price(&mut self, e: &Env, asset: &Address) -> i128 {
        if let Some(price) = self.prices.get(asset.clone()) {
            return price;
        }
        let oracle_client = PriceFeedClient::new(e, &self.config.reserve_oracle);
        let oracle_asset = Asset::Stellar(asset.clone());
        let price_data = match oracle_client.lastprice(&oracle_asset) {
            Some(price_data) => price_data,
            None => panic_with_error!(e, PoolError::InvalidPrice),
        };
        if price_data.price <= 0 {
            panic_with_error!(e, PoolError::InvalidPrice);
        }
        if price_data.timestamp + MAX_PRICE_AGE < e.ledger().timestamp() {
            panic_with_error!(e, PoolError::StalePrice);
        }
        self.prices.set(asset.clone(), price_data.price);
        price_data.price
    }

    /// Load the price of an NFT collection from the Pool's NFT oracle, expressed in the reserve
    /// oracle's base asset and decimals. Uses the time weighted average price over the pool's
    /// `twap_interval` if it is set. Returns a cached version if one already exists.
    ///
    /// ### Arguments
    /// * nft_asset - The address of the NFT collection
    pub fn load_nft_price(&mut self, e: &Env, nft_asset: &Address) -> i128 {
        if let Some(price) = self.nft_prices.get(nft_asset.clone()) {
            return price;
        }
        let nft_oracle = NftPriceClient::new(e, &self.config.nft_oracle);
        let nft_decimals = match self.nft_price_decimals {
            Some(decimals) => decimals,
            None => {
                let decimals = nft_oracle.decimals();
                self.nft_price_decimals = Some(decimals);
                decimals
            }
        };
        let raw_price = if self.config.twap_interval > 0 {
            nft_oracle.get_twap_price(nft_asset, &self.config.twap_interval)
        } else {
            nft_oracle.get_asset_price(nft_asset)
        };

        let base_decimals = self.load_price_decimals(e);
        let price = raw_price
            .fixed_mul_floor(10i128.pow(base_decimals), 10i128.pow(nft_decimals))
            .unwrap_optimized();
        self.nft_prices.set(nft_asset.clone(), price);
        price
    }

    /// Convert an amount of the reserve oracle's base asset into reserve tokens
    ///
    /// ### Arguments
    /// * reserve - The reserve to convert into
    /// * base_amount - The amount in the oracle's base asset
    pub fn to_reserve_amount(&mut self, e: &Env, reserve: &Reserve, base_amount: i128) -> i128 {
        let price = self.load_price(e, &reserve.asset);
        base_amount
            .fixed_div_floor(price, reserve.scalar)
            .unwrap_optimized()
    }

    /// Load the price of an NFT collection expressed in reserve tokens
    ///
    /// ### Arguments
    /// * nft_asset - The address of the NFT collection
    /// * reserve - The reserve to price the collection in
    pub fn load_nft_price_in_reserve(
        &mut self,
        e: &Env,
        nft_asset: &Address,
        reserve: &Reserve,
    ) -> i128 {
        let base_price = self.load_nft_price(e, nft_asset);
        self.to_reserve_amount(e, reserve, base_price)
    }
}
