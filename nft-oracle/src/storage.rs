use soroban_sdk::{
    contracttype, unwrap::UnwrapOptimized, vec, Address, Env, IntoVal, Symbol, TryFromVal, Val,
    Vec,
};

pub(crate) const LEDGER_THRESHOLD_SHARED: u32 = 172800; // ~ 10 days
pub(crate) const LEDGER_BUMP_SHARED: u32 = 241920; // ~ 14 days

/********** Storage Types **********/

/// A single price observation for an asset
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PriceData {
    pub price: i128,
    pub timestamp: u64,
    pub round_id: u64,
}

/// The registration info for an asset's price feed
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FeedInfo {
    pub paused: bool,
    pub len: u32, // the number of rounds stored for the feed
}

/// The parameters used to reject suspicious price updates
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ValidityParams {
    pub max_price_deviation: i128, // the max deviation from the last price before `time_interval_with_price` has passed, expressed in 7 decimals
    pub max_price_deviation_with_time: i128, // the max deviation once `time_interval_with_price` has passed, expressed in 7 decimals
    pub time_interval_with_price: u64, // the time in seconds after which the tighter deviation bound applies
    pub minimum_update_time: u64, // the minimum time in seconds between two updates
}

/********** Storage Key Types **********/

const ADMIN_KEY: &str = "Admin";
const FEED_ADMIN_KEY: &str = "FeedAdmin";
const DECIMALS_KEY: &str = "Decimals";
const PARAMS_KEY: &str = "Params";
const ASSETS_KEY: &str = "Assets";

#[derive(Clone)]
#[contracttype]
pub struct RoundKey {
    pub asset: Address,
    pub round: u32,
}

#[derive(Clone)]
#[contracttype]
pub enum OracleDataKey {
    // The feed registration info for an asset
    Feed(Address),
    // A stored price round for an asset
    Round(RoundKey),
}

/********** Storage **********/

/// Bump the instance rent for the contract
pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/// Fetch an entry in persistent storage that has a default value if it doesn't exist
fn get_persistent_default<K: IntoVal<Env, Val>, V: TryFromVal<Env, Val>>(
    e: &Env,
    key: &K,
    default: V,
    bump_threshold: u32,
    bump_amount: u32,
) -> V {
    if let Some(result) = e.storage().persistent().get::<K, V>(key) {
        e.storage()
            .persistent()
            .extend_ttl(key, bump_threshold, bump_amount);
        result
    } else {
        default
    }
}

/********** Admin **********/

/// Fetch the current admin Address
///
/// ### Panics
/// If the admin does not exist
pub fn get_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, ADMIN_KEY))
        .unwrap_optimized()
}

/// Set a new admin
///
/// ### Arguments
/// * `new_admin` - The Address for the admin
pub fn set_admin(e: &Env, new_admin: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, ADMIN_KEY), new_admin);
}

/// Checks if an admin is set
pub fn has_admin(e: &Env) -> bool {
    e.storage().instance().has(&Symbol::new(e, ADMIN_KEY))
}

/// Fetch the address allowed to push prices
///
/// ### Panics
/// If the price feed admin does not exist
pub fn get_price_feed_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, FEED_ADMIN_KEY))
        .unwrap_optimized()
}

/// Set the address allowed to push prices
///
/// ### Arguments
/// * `feed_admin` - The Address for the price feed admin
pub fn set_price_feed_admin(e: &Env, feed_admin: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, FEED_ADMIN_KEY), feed_admin);
}

/********** Config **********/

/// Fetch the number of decimals prices are reported with
pub fn get_decimals(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&Symbol::new(e, DECIMALS_KEY))
        .unwrap_optimized()
}

/// Set the number of decimals prices are reported with
pub fn set_decimals(e: &Env, decimals: u32) {
    e.storage()
        .instance()
        .set::<Symbol, u32>(&Symbol::new(e, DECIMALS_KEY), &decimals);
}

/// Fetch the price validity parameters
pub fn get_validity_params(e: &Env) -> ValidityParams {
    e.storage()
        .instance()
        .get(&Symbol::new(e, PARAMS_KEY))
        .unwrap_optimized()
}

/// Set the price validity parameters
///
/// ### Arguments
/// * `params` - The new validity parameters
pub fn set_validity_params(e: &Env, params: &ValidityParams) {
    e.storage()
        .instance()
        .set::<Symbol, ValidityParams>(&Symbol::new(e, PARAMS_KEY), params);
}

/********** Feed Keys **********/

/// Fetch the list of registered assets
pub fn get_assets(e: &Env) -> Vec<Address> {
    get_persistent_default(
        e,
        &Symbol::new(e, ASSETS_KEY),
        vec![e],
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    )
}

/// Set the list of registered assets
///
/// ### Arguments
/// * `assets` - The registered assets
pub fn set_assets(e: &Env, assets: &Vec<Address>) {
    let key = Symbol::new(e, ASSETS_KEY);
    e.storage()
        .persistent()
        .set::<Symbol, Vec<Address>>(&key, assets);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/********** Feeds **********/

/// Fetch the feed info for an asset, if the asset is registered
///
/// ### Arguments
/// * `asset` - The asset the feed prices
pub fn get_feed(e: &Env, asset: &Address) -> Option<FeedInfo> {
    let key = OracleDataKey::Feed(asset.clone());
    get_persistent_default::<OracleDataKey, Option<FeedInfo>>(
        e,
        &key,
        None,
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    )
}

/// Set the feed info for an asset
///
/// ### Arguments
/// * `asset` - The asset the feed prices
/// * `feed` - The feed info
pub fn set_feed(e: &Env, asset: &Address, feed: &FeedInfo) {
    let key = OracleDataKey::Feed(asset.clone());
    e.storage()
        .persistent()
        .set::<OracleDataKey, FeedInfo>(&key, feed);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/// Remove the feed info for an asset
///
/// ### Arguments
/// * `asset` - The asset the feed prices
pub fn del_feed(e: &Env, asset: &Address) {
    let key = OracleDataKey::Feed(asset.clone());
    e.storage().persistent().remove(&key);
}

/********** Rounds **********/

/// Fetch a stored price round for an asset
///
/// ### Panics
/// If the round does not exist
pub fn get_round(e: &Env, asset: &Address, round: u32) -> PriceData {
    let key = OracleDataKey::Round(RoundKey {
        asset: asset.clone(),
        round,
    });
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    e.storage()
        .persistent()
        .get::<OracleDataKey, PriceData>(&key)
        .unwrap_optimized()
}

/// Store a price round for an asset
///
/// ### Arguments
/// * `asset` - The asset the price is for
/// * `round` - The round index
/// * `data` - The price data
pub fn set_round(e: &Env, asset: &Address, round: u32, data: &PriceData) {
    let key = OracleDataKey::Round(RoundKey {
        asset: asset.clone(),
        round,
    });
    e.storage()
        .persistent()
        .set::<OracleDataKey, PriceData>(&key, data);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}
