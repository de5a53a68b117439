use soroban_sdk::{
    contracttype, panic_with_error, unwrap::UnwrapOptimized, vec, Address, Env, IntoVal, Symbol,
    TryFromVal, Val, Vec,
};

use crate::{constants::MAX_RESERVES, PoolError};

pub(crate) const LEDGER_THRESHOLD_SHARED: u32 = 172800; // ~ 10 days
pub(crate) const LEDGER_BUMP_SHARED: u32 = 241920; // ~ 14 days

pub(crate) const LEDGER_THRESHOLD_USER: u32 = 518400; // ~ 30 days
pub(crate) const LEDGER_BUMP_USER: u32 = 535670; // ~ 31 days

/********** Storage Types **********/

/// The pool's config
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PoolConfig {
    pub reserve_oracle: Address, // the SEP-40 price feed for reserve assets
    pub nft_oracle: Address,     // the NFT price oracle
    pub treasury: Address,       // the address credited with the reserve factor share of interest
    pub twap_interval: u64, // the window in seconds NFT prices are averaged over, 0 for spot prices
}

/// The configuration information about a reserve asset
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReserveConfig {
    pub index: u32,          // the index of the reserve in the list
    pub decimals: u32,       // the decimals used by the underlying contract
    pub reserve_factor: u32, // the share of borrow interest kept by the treasury in basis points
    pub optimal_util: i128,  // the utilization rate the rate curve kinks at, in ray
    pub base_rate: i128,     // the borrow rate at zero utilization, in ray
    pub slope_one: i128,     // the borrow rate increase from zero to optimal utilization, in ray
    pub slope_two: i128,     // the borrow rate increase from optimal to full utilization, in ray
    pub active: bool,
    pub frozen: bool,
    pub borrowing_enabled: bool,
}

/// The data for a reserve asset
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ReserveData {
    pub liquidity_index: i128,       // the cumulative supply interest index in ray
    pub variable_borrow_index: i128, // the cumulative borrow interest index in ray
    pub liquidity_rate: i128,        // the current annual supply rate in ray
    pub variable_borrow_rate: i128,  // the current annual borrow rate in ray
    pub available_liquidity: i128,   // the underlying tokens held for the reserve
    pub scaled_supply: i128,         // the total deposits normalized by the liquidity index
    pub scaled_variable_debt: i128,  // the total debt normalized by the borrow index
    pub accrued_to_treasury: i128, // interest owed to the treasury normalized by the liquidity index
    pub last_time: u64,            // the last time the data was updated
}

/// The configuration information about an NFT collection accepted as collateral
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct NftConfig {
    pub ltv: u32,              // the max loan to value in basis points
    pub liq_threshold: u32,    // the loan to value a loan becomes auctionable at, in basis points
    pub liq_bonus: u32,        // the discount to the NFT price a first bid must clear, in basis points
    pub redeem_duration: u64,  // the seconds after the first bid the borrower can redeem for
    pub auction_duration: u64, // the seconds after the first bid bids are accepted for
    pub redeem_fine: u32,      // the fine paid to the first bidder on redeem, in basis points
    pub redeem_threshold: u32, // the minimum share of debt repaid on redeem, in basis points
    pub min_bid_fine: i128,    // the minimum redeem fine in the reserve oracle's base asset
    pub max_supply: u32,       // the max collection supply accepted, 0 for no limit
    pub max_token_id: u32,     // the max token id accepted, 0 for no limit
    pub active: bool,
    pub frozen: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum LoanState {
    // Never written to the ledger
    None = 0,
    // The loan is being created
    Created = 1,
    // The loan is open and has debt
    Active = 2,
    // The loan has at least one bid placed on its collateral
    Auction = 3,
    // The loan was repaid in full and the collateral returned
    Repaid = 4,
    // The loan was liquidated and the collateral sold to the winning bidder
    Defaulted = 5,
}

/// A loan taken against a single NFT
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LoanData {
    pub loan_id: u64,
    pub state: LoanState,
    pub borrower: Address,
    pub nft_asset: Address,
    pub nft_token_id: u32,
    pub reserve_asset: Address,
    pub scaled_amount: i128, // the debt normalized by the reserve's borrow index
    pub bid_start_time: u64,
    pub bidder: Option<Address>,
    pub first_bidder: Option<Address>,
    pub bid_price: i128,
    pub bid_borrow_amount: i128, // the debt at the time of the first bid
    pub bid_fine: i128,
    pub bid_paused_time: u64, // the cumulative pool pause duration at the time of the first bid
}

/// The pool's pause state
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PauseData {
    pub paused: bool,
    pub start_time: u64, // the start of the most recent pause
    pub duration: u64,   // the cumulative length of all completed pauses
}

/********** Storage Key Types **********/

const ADMIN_KEY: &str = "Admin";
const EMERGENCY_ADMIN_KEY: &str = "EmgAdmin";
const POOL_CONFIG_KEY: &str = "Config";
const PAUSE_KEY: &str = "Pause";
const LOAN_ID_KEY: &str = "LoanId";
const RES_LIST_KEY: &str = "ResList";
const NFT_LIST_KEY: &str = "NftList";

#[derive(Clone)]
#[contracttype]
pub struct UserReserveKey {
    pub user: Address,
    pub asset: Address,
}

#[derive(Clone)]
#[contracttype]
pub struct NftKey {
    pub nft_asset: Address,
    pub token_id: u32,
}

#[derive(Clone)]
#[contracttype]
pub enum PoolDataKey {
    // A map of underlying asset's contract address to reserve config
    ResConfig(Address),
    // A map of underlying asset's contract address to reserve data
    ResData(Address),
    // A map of NFT collection address to its collateral config
    NftConfig(Address),
    // The scaled deposit of a user in a reserve
    Deposit(UserReserveKey),
    // A loan by id
    Loan(u64),
    // The id of the latest loan taken against an NFT
    NftLoan(NftKey),
    // The loan-repaid interceptors registered for an NFT
    Interceptors(NftKey),
    // If an interceptor contract is allowed to register itself
    Approved(Address),
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

/// Write an entry to persistent storage and bump its rent
fn set_persistent<K: IntoVal<Env, Val>, V: IntoVal<Env, Val>>(
    e: &Env,
    key: &K,
    value: &V,
    bump_threshold: u32,
    bump_amount: u32,
) {
    e.storage().persistent().set::<K, V>(key, value);
    e.storage()
        .persistent()
        .extend_ttl(key, bump_threshold, bump_amount);
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

/// Fetch the current emergency admin Address
///
/// ### Panics
/// If the emergency admin does not exist
pub fn get_emergency_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, EMERGENCY_ADMIN_KEY))
        .unwrap_optimized()
}

/// Set a new emergency admin
///
/// ### Arguments
/// * `new_emergency_admin` - The Address for the emergency admin
pub fn set_emergency_admin(e: &Env, new_emergency_admin: &Address) {
    e.storage().instance().set::<Symbol, Address>(
        &Symbol::new(e, EMERGENCY_ADMIN_KEY),
        new_emergency_admin,
    );
}

/********** Pool Config **********/

/// Fetch the pool configuration
///
/// ### Panics
/// If the pool's config is not set
pub fn get_pool_config(e: &Env) -> PoolConfig {
    e.storage()
        .instance()
        .get(&Symbol::new(e, POOL_CONFIG_KEY))
        .unwrap_optimized()
}

/// Set the pool configuration
///
/// ### Arguments
/// * `config` - The pool configuration
pub fn set_pool_config(e: &Env, config: &PoolConfig) {
    e.storage()
        .instance()
        .set::<Symbol, PoolConfig>(&Symbol::new(e, POOL_CONFIG_KEY), config);
}

/********** Pause **********/

/// Fetch the pool's pause state
pub fn get_pause(e: &Env) -> PauseData {
    e.storage()
        .instance()
        .get(&Symbol::new(e, PAUSE_KEY))
        .unwrap_or(PauseData {
            paused: false,
            start_time: 0,
            duration: 0,
        })
}

/// Set the pool's pause state
pub fn set_pause(e: &Env, pause: &PauseData) {
    e.storage()
        .instance()
        .set::<Symbol, PauseData>(&Symbol::new(e, PAUSE_KEY), pause);
}

/********** Reserve Config (ResConfig) **********/

/// Fetch the reserve config for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
///
/// ### Panics
/// If the reserve does not exist
pub fn get_res_config(e: &Env, asset: &Address) -> ReserveConfig {
    let key = PoolDataKey::ResConfig(asset.clone());
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    e.storage()
        .persistent()
        .get::<PoolDataKey, ReserveConfig>(&key)
        .unwrap_optimized()
}

/// Set the reserve configuration for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
/// * `config` - The reserve configuration for the asset
pub fn set_res_config(e: &Env, asset: &Address, config: &ReserveConfig) {
    let key = PoolDataKey::ResConfig(asset.clone());
    set_persistent(
        e,
        &key,
        config,
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    );
}

/// Checks if a reserve exists for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
pub fn has_res(e: &Env, asset: &Address) -> bool {
    let key = PoolDataKey::ResConfig(asset.clone());
    e.storage().persistent().has(&key)
}

/********** Reserve Data (ResData) **********/

/// Fetch the reserve data for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
///
/// ### Panics
/// If the reserve does not exist
pub fn get_res_data(e: &Env, asset: &Address) -> ReserveData {
    let key = PoolDataKey::ResData(asset.clone());
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    e.storage()
        .persistent()
        .get::<PoolDataKey, ReserveData>(&key)
        .unwrap_optimized()
}

/// Set the reserve data for an asset
///
/// ### Arguments
/// * `asset` - The contract address of the asset
/// * `data` - The reserve data for the asset
pub fn set_res_data(e: &Env, asset: &Address, data: &ReserveData) {
    let key = PoolDataKey::ResData(asset.clone());
    set_persistent(e, &key, data, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/********** Reserve List (ResList) **********/

/// Fetch the list of reserves
pub fn get_res_list(e: &Env) -> Vec<Address> {
    get_persistent_default(
        e,
        &Symbol::new(e, RES_LIST_KEY),
        vec![e],
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    )
}

/// Add a reserve to the back of the list and returns the index
///
/// ### Arguments
/// * `asset` - The contract address of the underlying asset
///
/// ### Panics
/// If the number of reserves in the list exceeds 32
///
// @dev: Once added it can't be removed
pub fn push_res_list(e: &Env, asset: &Address) -> u32 {
    let mut res_list = get_res_list(e);
    if res_list.len() == MAX_RESERVES {
        panic_with_error!(e, PoolError::BadRequest)
    }
    res_list.push_back(asset.clone());
    let new_index = res_list.len() - 1;
    set_persistent(
        e,
        &Symbol::new(e, RES_LIST_KEY),
        &res_list,
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    );
    new_index
}

/********** NFT Config **********/

/// Fetch the collateral config for an NFT collection, if it is listed
///
/// ### Arguments
/// * `nft_asset` - The contract address of the collection
pub fn get_nft_config(e: &Env, nft_asset: &Address) -> Option<NftConfig> {
    let key = PoolDataKey::NftConfig(nft_asset.clone());
    get_persistent_default::<PoolDataKey, Option<NftConfig>>(
        e,
        &key,
        None,
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    )
}

/// Set the collateral config for an NFT collection
///
/// ### Arguments
/// * `nft_asset` - The contract address of the collection
/// * `config` - The collateral config
pub fn set_nft_config(e: &Env, nft_asset: &Address, config: &NftConfig) {
    let key = PoolDataKey::NftConfig(nft_asset.clone());
    set_persistent(
        e,
        &key,
        config,
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    );
}

/// Fetch the list of NFT collections
pub fn get_nft_list(e: &Env) -> Vec<Address> {
    get_persistent_default(
        e,
        &Symbol::new(e, NFT_LIST_KEY),
        vec![e],
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    )
}

/// Add an NFT collection to the back of the list
///
/// ### Arguments
/// * `nft_asset` - The contract address of the collection
pub fn push_nft_list(e: &Env, nft_asset: &Address) {
    let mut nft_list = get_nft_list(e);
    nft_list.push_back(nft_asset.clone());
    set_persistent(
        e,
        &Symbol::new(e, NFT_LIST_KEY),
        &nft_list,
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    );
}

/********** Deposits **********/

/// Fetch the scaled deposit of a user in a reserve, or 0
///
/// ### Arguments
/// * `user` - The address of the user
/// * `asset` - The reserve asset
pub fn get_deposit(e: &Env, user: &Address, asset: &Address) -> i128 {
    let key = PoolDataKey::Deposit(UserReserveKey {
        user: user.clone(),
        asset: asset.clone(),
    });
    get_persistent_default(e, &key, 0i128, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER)
}

/// Set the scaled deposit of a user in a reserve
///
/// ### Arguments
/// * `user` - The address of the user
/// * `asset` - The reserve asset
/// * `scaled_amount` - The new scaled deposit
pub fn set_deposit(e: &Env, user: &Address, asset: &Address, scaled_amount: i128) {
    let key = PoolDataKey::Deposit(UserReserveKey {
        user: user.clone(),
        asset: asset.clone(),
    });
    set_persistent(
        e,
        &key,
        &scaled_amount,
        LEDGER_THRESHOLD_USER,
        LEDGER_BUMP_USER,
    );
}

/********** Loans **********/

/// Assign the next loan id. Loan ids start at 1.
pub fn next_loan_id(e: &Env) -> u64 {
    let key = Symbol::new(e, LOAN_ID_KEY);
    let loan_id = e.storage().instance().get::<Symbol, u64>(&key).unwrap_or(0) + 1;
    e.storage().instance().set::<Symbol, u64>(&key, &loan_id);
    loan_id
}

/// Fetch a loan, if it exists
///
/// ### Arguments
/// * `loan_id` - The id of the loan
pub fn get_loan(e: &Env, loan_id: u64) -> Option<LoanData> {
    let key = PoolDataKey::Loan(loan_id);
    get_persistent_default::<PoolDataKey, Option<LoanData>>(
        e,
        &key,
        None,
        LEDGER_THRESHOLD_USER,
        LEDGER_BUMP_USER,
    )
}

/// Set a loan
///
/// ### Arguments
/// * `loan` - The loan
pub fn set_loan(e: &Env, loan: &LoanData) {
    let key = PoolDataKey::Loan(loan.loan_id);
    set_persistent(e, &key, loan, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}

/// Fetch the id of the latest loan taken against an NFT, if any
///
/// ### Arguments
/// * `nft_asset` - The NFT collection
/// * `token_id` - The token id
pub fn get_nft_loan_id(e: &Env, nft_asset: &Address, token_id: u32) -> Option<u64> {
    let key = PoolDataKey::NftLoan(NftKey {
        nft_asset: nft_asset.clone(),
        token_id,
    });
    get_persistent_default::<PoolDataKey, Option<u64>>(
        e,
        &key,
        None,
        LEDGER_THRESHOLD_USER,
        LEDGER_BUMP_USER,
    )
}

/// Set the id of the latest loan taken against an NFT
///
/// ### Arguments
/// * `nft_asset` - The NFT collection
/// * `token_id` - The token id
/// * `loan_id` - The loan id
pub fn set_nft_loan_id(e: &Env, nft_asset: &Address, token_id: u32, loan_id: u64) {
    let key = PoolDataKey::NftLoan(NftKey {
        nft_asset: nft_asset.clone(),
        token_id,
    });
    set_persistent(e, &key, &loan_id, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}

/********** Interceptors **********/

/// Fetch the interceptors registered for an NFT
///
/// ### Arguments
/// * `nft_asset` - The NFT collection
/// * `token_id` - The token id
pub fn get_interceptors(e: &Env, nft_asset: &Address, token_id: u32) -> Vec<Address> {
    let key = PoolDataKey::Interceptors(NftKey {
        nft_asset: nft_asset.clone(),
        token_id,
    });
    get_persistent_default(e, &key, vec![e], LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER)
}

/// Set the interceptors registered for an NFT. An empty list removes the entry.
///
/// ### Arguments
/// * `nft_asset` - The NFT collection
/// * `token_id` - The token id
/// * `interceptors` - The interceptors, in invocation order
pub fn set_interceptors(e: &Env, nft_asset: &Address, token_id: u32, interceptors: &Vec<Address>) {
    let key = PoolDataKey::Interceptors(NftKey {
        nft_asset: nft_asset.clone(),
        token_id,
    });
    if interceptors.is_empty() {
        e.storage().persistent().remove(&key);
    } else {
        set_persistent(
            e,
            &key,
            interceptors,
            LEDGER_THRESHOLD_USER,
            LEDGER_BUMP_USER,
        );
    }
}

/// Check if an interceptor is approved
///
/// ### Arguments
/// * `interceptor` - The interceptor contract
pub fn get_interceptor_approved(e: &Env, interceptor: &Address) -> bool {
    let key = PoolDataKey::Approved(interceptor.clone());
    get_persistent_default(
        e,
        &key,
        false,
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    )
}

/// Set if an interceptor is approved
///
/// ### Arguments
/// * `interceptor` - The interceptor contract
/// * `approved` - If the interceptor is approved
pub fn set_interceptor_approved(e: &Env, interceptor: &Address, approved: bool) {
    let key = PoolDataKey::Approved(interceptor.clone());
    set_persistent(
        e,
        &key,
        &approved,
        LEDGER_THRESHOLD_SHARED,
        LEDGER_BUMP_SHARED,
    );
}
