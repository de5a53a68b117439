use crate::{
    errors::NftOracleError,
    price_feed,
    storage::{self, ValidityParams},
    validity,
};
use soroban_sdk::{
    contract, contractclient, contractimpl, panic_with_error, Address, Env, Symbol, Vec,
};

/// ### NftOracle
///
/// A price oracle for NFT collections. Prices are pushed by a trusted price feed admin and
/// stored as a history of rounds per collection, allowing time weighted average prices.
#[contract]
pub struct NftOracleContract;

#[contractclient(name = "NftOracleClient")]
pub trait NftOracle {
    /// Initialize the oracle
    ///
    /// ### Arguments
    /// * `admin` - The Address for the admin
    /// * `price_feed_admin` - The Address allowed to push prices
    /// * `decimals` - The number of decimals prices are reported with
    /// * `params` - The price validity parameters
    ///
    /// ### Panics
    /// If the oracle is already initialized or the parameters are invalid
    fn initialize(
        e: Env,
        admin: Address,
        price_feed_admin: Address,
        decimals: u32,
        params: ValidityParams,
    );

    /// (Admin only) Set a new address as the admin of this oracle
    ///
    /// ### Arguments
    /// * `new_admin` - The new admin address
    fn set_admin(e: Env, new_admin: Address);

    /// (Admin only) Set a new address as the price feed admin
    ///
    /// ### Arguments
    /// * `new_feed_admin` - The new price feed admin address
    fn set_price_feed_admin(e: Env, new_feed_admin: Address);

    /// (Admin only) Register a collection
    ///
    /// ### Panics
    /// If the collection is already registered
    fn add_asset(e: Env, asset: Address);

    /// (Admin only) Register a set of collections
    ///
    /// ### Panics
    /// If any collection is already registered
    fn add_assets(e: Env, assets: Vec<Address>);

    /// (Admin only) Deregister a collection and drop its price history
    ///
    /// ### Panics
    /// If the collection is not registered
    fn remove_asset(e: Env, asset: Address);

    /// (Admin only) Pause or unpause price updates for a collection
    fn set_pause(e: Env, asset: Address, paused: bool);

    /// (Admin only) Update the price validity parameters
    ///
    /// ### Arguments
    /// * `max_price_deviation` - The max deviation within `time_interval_with_price`, in 7 decimals
    /// * `max_price_deviation_with_time` - The max deviation once `time_interval_with_price` has passed, in 7 decimals
    /// * `time_interval_with_price` - The time in seconds after which the tighter bound applies
    /// * `minimum_update_time` - The minimum time in seconds between two updates
    fn set_data_validity_parameters(
        e: Env,
        max_price_deviation: i128,
        max_price_deviation_with_time: i128,
        time_interval_with_price: u64,
        minimum_update_time: u64,
    );

    /// (Price feed admin only) Push a new price for a collection
    ///
    /// ### Arguments
    /// * `asset` - The collection
    /// * `price` - The price, in the oracle's decimals
    /// * `timestamp` - The time the price was observed
    /// * `round_id` - An identifier for the update round
    ///
    /// ### Panics
    /// If the collection is unknown or paused, or the price fails validation
    fn set_asset_data(e: Env, asset: Address, price: i128, timestamp: u64, round_id: u64);

    /// Fetch the number of decimals prices are reported with
    fn decimals(e: Env) -> u32;

    /// Fetch the registered collections
    fn get_assets(e: Env) -> Vec<Address>;

    /// Check if price updates are paused for a collection
    fn is_paused(e: Env, asset: Address) -> bool;

    /// Fetch the price validity parameters
    fn get_data_validity_parameters(e: Env) -> ValidityParams;

    /// Fetch the latest price for a collection
    fn get_asset_price(e: Env, asset: Address) -> i128;

    /// Fetch the timestamp of the latest price for a collection
    fn get_latest_timestamp(e: Env, asset: Address) -> u64;

    /// Fetch the price `back` rounds before the latest price
    fn get_previous_price(e: Env, asset: Address, back: u32) -> i128;

    /// Fetch the timestamp of the price `back` rounds before the latest price
    fn get_previous_timestamp(e: Env, asset: Address, back: u32) -> u64;

    /// Fetch the time weighted average price for a collection over the trailing `interval` seconds
    fn get_twap_price(e: Env, asset: Address, interval: u64) -> i128;
}

#[contractimpl]
impl NftOracle for NftOracleContract {
    fn initialize(
        e: Env,
        admin: Address,
        price_feed_admin: Address,
        decimals: u32,
        params: ValidityParams,
    ) {
        storage::extend_instance(&e);
        if storage::has_admin(&e) {
            panic_with_error!(&e, NftOracleError::AlreadyInitializedError);
        }
        validity::require_valid_params(&e, &params);

        storage::set_admin(&e, &admin);
        storage::set_price_feed_admin(&e, &price_feed_admin);
        storage::set_decimals(&e, decimals);
        storage::set_validity_params(&e, &params);
    }

    fn set_admin(e: Env, new_admin: Address) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();
        new_admin.require_auth();

        storage::set_admin(&e, &new_admin);

        e.events()
            .publish((Symbol::new(&e, "set_admin"), admin), new_admin);
    }

    fn set_price_feed_admin(e: Env, new_feed_admin: Address) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        storage::set_price_feed_admin(&e, &new_feed_admin);

        e.events().publish(
            (Symbol::new(&e, "set_price_feed_admin"), admin),
            new_feed_admin,
        );
    }

    fn add_asset(e: Env, asset: Address) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        price_feed::execute_add_asset(&e, &asset);

        e.events()
            .publish((Symbol::new(&e, "add_asset"), admin), asset);
    }

    fn add_assets(e: Env, assets: Vec<Address>) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        for asset in assets.iter() {
            price_feed::execute_add_asset(&e, &asset);
            e.events()
                .publish((Symbol::new(&e, "add_asset"), admin.clone()), asset);
        }
    }

    fn remove_asset(e: Env, asset: Address) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        price_feed::execute_remove_asset(&e, &asset);

        e.events()
            .publish((Symbol::new(&e, "remove_asset"), admin), asset);
    }

    fn set_pause(e: Env, asset: Address, paused: bool) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        price_feed::execute_set_pause(&e, &asset, paused);

        e.events()
            .publish((Symbol::new(&e, "set_pause"), asset), paused);
    }

    fn set_data_validity_parameters(
        e: Env,
        max_price_deviation: i128,
        max_price_deviation_with_time: i128,
        time_interval_with_price: u64,
        minimum_update_time: u64,
    ) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        let params = ValidityParams {
            max_price_deviation,
            max_price_deviation_with_time,
            time_interval_with_price,
            minimum_update_time,
        };
        validity::require_valid_params(&e, &params);
        storage::set_validity_params(&e, &params);

        e.events()
            .publish((Symbol::new(&e, "set_validity_params"), admin), params);
    }

    fn set_asset_data(e: Env, asset: Address, price: i128, timestamp: u64, round_id: u64) {
        storage::extend_instance(&e);
        let feed_admin = storage::get_price_feed_admin(&e);
        feed_admin.require_auth();

        price_feed::execute_set_asset_data(&e, &asset, price, timestamp, round_id);

        e.events().publish(
            (Symbol::new(&e, "set_asset_data"), asset),
            (price, timestamp, round_id),
        );
    }

    fn decimals(e: Env) -> u32 {
        storage::get_decimals(&e)
    }

    fn get_assets(e: Env) -> Vec<Address> {
        storage::get_assets(&e)
    }

    fn is_paused(e: Env, asset: Address) -> bool {
        price_feed::load_feed(&e, &asset).paused
    }

    fn get_data_validity_parameters(e: Env) -> ValidityParams {
        storage::get_validity_params(&e)
    }

    fn get_asset_price(e: Env, asset: Address) -> i128 {
        price_feed::load_latest(&e, &asset).price
    }

    fn get_latest_timestamp(e: Env, asset: Address) -> u64 {
        price_feed::load_latest(&e, &asset).timestamp
    }

    fn get_previous_price(e: Env, asset: Address, back: u32) -> i128 {
        price_feed::load_previous(&e, &asset, back).price
    }

    fn get_previous_timestamp(e: Env, asset: Address, back: u32) -> u64 {
        price_feed::load_previous(&e, &asset, back).timestamp
    }

    fn get_twap_price(e: Env, asset: Address, interval: u64) -> i128 {
        price_feed::calc_twap_price(&e, &asset, interval)
    }
}
