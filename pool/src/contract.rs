use crate::{
    auctions::{
        execute_auction, execute_liquidate, execute_redeem, AuctionRequest, LiquidateRequest,
        RedeemRequest,
    },
    loans::{self, execute_borrow, execute_repay, BorrowRequest, RepayRequest},
    pool::{self, AuctionData, CollateralData, DebtData, Pool, Reserve},
    storage::{self, LoanData, NftConfig, PoolConfig, ReserveConfig, ReserveData},
};
use soroban_sdk::{contract, contractclient, contractimpl, vec, Address, Env, Symbol, Vec};

/// ### Pool
///
/// A lending pool where fungible reserves are lent out against individual NFTs.
#[contract]
pub struct PoolContract;

#[contractclient(name = "PoolClient")]
pub trait PoolTrait {
    /// Initialize the pool
    ///
    /// ### Arguments
    /// * `admin` - The Address for the admin
    /// * `emergency_admin` - The Address allowed to pause the pool
    /// * `config` - The PoolConfig for the pool
    ///
    /// ### Panics
    /// If the pool is already initialized
    fn initialize(e: Env, admin: Address, emergency_admin: Address, config: PoolConfig);

    /// (Admin only) Set a new address as the admin of this pool
    ///
    /// ### Arguments
    /// * `new_admin` - The new admin address
    ///
    /// ### Panics
    /// If the caller is not the admin
    fn set_admin(e: Env, new_admin: Address);

    /// (Admin only) Set a new address as the emergency admin of this pool
    ///
    /// ### Arguments
    /// * `new_emergency_admin` - The new emergency admin address
    ///
    /// ### Panics
    /// If the caller is not the admin
    fn set_emergency_admin(e: Env, new_emergency_admin: Address);

    /// (Admin only) Update the pool
    ///
    /// ### Arguments
    /// * `config` - The new PoolConfig
    ///
    /// ### Panics
    /// If the caller is not the admin
    fn update_pool(e: Env, config: PoolConfig);

    /// (Admin only) Initialize a reserve in the pool
    ///
    /// Returns the index of the reserve
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset to add as a reserve
    /// * `config` - The ReserveConfig for the reserve
    ///
    /// ### Panics
    /// If the caller is not the admin or the reserve is already setup
    fn init_reserve(e: Env, asset: Address, config: ReserveConfig) -> u32;

    /// (Admin only) Update a reserve in the pool
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset of the reserve
    /// * `config` - The ReserveConfig for the reserve
    ///
    /// ### Panics
    /// If the caller is not the admin or the reserve does not exist
    fn update_reserve(e: Env, asset: Address, config: ReserveConfig);

    /// (Admin only) Accept an NFT collection as collateral
    ///
    /// ### Arguments
    /// * `nft_asset` - The NFT contract
    /// * `config` - The NftConfig for the collection
    ///
    /// ### Panics
    /// If the caller is not the admin or the collection is already setup
    fn init_nft(e: Env, nft_asset: Address, config: NftConfig);

    /// (Admin only) Update the configuration of an NFT collection
    ///
    /// ### Arguments
    /// * `nft_asset` - The NFT contract
    /// * `config` - The NftConfig for the collection
    ///
    /// ### Panics
    /// If the caller is not the admin or the collection does not exist
    fn update_nft(e: Env, nft_asset: Address, config: NftConfig);

    /********* Supply Functions **********/

    /// Deposit tokens from `from` into a reserve, credited to `on_behalf_of`
    ///
    /// Returns the scaled deposit minted
    ///
    /// ### Arguments
    /// * `from` - The address sending the tokens
    /// * `asset` - The underlying asset of the reserve
    /// * `amount` - The amount of tokens to deposit
    /// * `on_behalf_of` - The address credited with the deposit
    /// * `referral_code` - A code identifying the integrator, only emitted
    ///
    /// ### Panics
    /// If the pool is paused or the reserve is inactive or frozen
    fn deposit(
        e: Env,
        from: Address,
        asset: Address,
        amount: i128,
        on_behalf_of: Address,
        referral_code: u32,
    ) -> i128;

    /// Withdraw tokens deposited by `from` and send them to `to`
    ///
    /// Returns the amount withdrawn
    ///
    /// ### Arguments
    /// * `from` - The address owning the deposit
    /// * `asset` - The underlying asset of the reserve
    /// * `amount` - The amount of tokens to withdraw, or i128::MAX for the full deposit
    /// * `to` - The address receiving the tokens
    ///
    /// ### Panics
    /// If the pool is paused, the deposit is too small or the reserve lacks liquidity
    fn withdraw(e: Env, from: Address, asset: Address, amount: i128, to: Address) -> i128;

    /// Credit the interest accrued to the treasury for each asset
    ///
    /// Returns the scaled deposit credited for each asset
    ///
    /// ### Arguments
    /// * `assets` - The underlying assets of the reserves
    fn mint_to_treasury(e: Env, assets: Vec<Address>) -> Vec<i128>;

    /********* Loan Functions **********/

    /// Borrow from a reserve against an NFT. The first borrow against an NFT moves it from
    /// `from` into the pool.
    ///
    /// Returns the loan id
    ///
    /// ### Arguments
    /// * `from` - The address owning the NFT and receiving the tokens
    /// * `asset` - The underlying asset of the reserve
    /// * `amount` - The amount of tokens to borrow
    /// * `nft_asset` - The NFT contract
    /// * `nft_token_id` - The id of the NFT
    /// * `on_behalf_of` - The address taking on the debt
    /// * `referral_code` - A code identifying the integrator, only emitted
    ///
    /// ### Panics
    /// If the pool is paused or the NFT can't support the debt
    #[allow(clippy::too_many_arguments)]
    fn borrow(
        e: Env,
        from: Address,
        asset: Address,
        amount: i128,
        nft_asset: Address,
        nft_token_id: u32,
        on_behalf_of: Address,
        referral_code: u32,
    ) -> u64;

    /// Submit a set of borrows. Fails if any borrow fails.
    ///
    /// Returns the loan id of each borrow
    fn batch_borrow(
        e: Env,
        from: Address,
        requests: Vec<BorrowRequest>,
        on_behalf_of: Address,
        referral_code: u32,
    ) -> Vec<u64>;

    /// Repay the loan against an NFT
    ///
    /// Returns (the amount repaid, if the loan was repaid in full)
    ///
    /// ### Arguments
    /// * `from` - The address sending the tokens
    /// * `nft_asset` - The NFT contract
    /// * `nft_token_id` - The id of the NFT
    /// * `amount` - The amount to repay, or i128::MAX to repay in full
    ///
    /// ### Panics
    /// If the pool is paused or the loan is not Active
    fn repay(
        e: Env,
        from: Address,
        nft_asset: Address,
        nft_token_id: u32,
        amount: i128,
    ) -> (i128, bool);

    /// Submit a set of repayments. Fails if any repayment fails.
    fn batch_repay(e: Env, from: Address, requests: Vec<RepayRequest>) -> Vec<(i128, bool)>;

    /***** Auction / Liquidation Functions *****/

    /// Bid on the NFT backing an unhealthy loan. The bid is held by the pool until it is
    /// outbid, redeemed or liquidated.
    ///
    /// ### Arguments
    /// * `from` - The address sending the bid
    /// * `nft_asset` - The NFT contract
    /// * `nft_token_id` - The id of the NFT
    /// * `bid_price` - The amount of reserve tokens bid
    /// * `on_behalf_of` - The address credited as the bidder
    ///
    /// ### Panics
    /// If the pool is paused, the loan is healthy or the bid is too low
    fn auction(
        e: Env,
        from: Address,
        nft_asset: Address,
        nft_token_id: u32,
        bid_price: i128,
        on_behalf_of: Address,
    );

    /// Submit a set of bids. Fails if any bid fails.
    fn batch_auction(
        e: Env,
        from: Address,
        requests: Vec<AuctionRequest>,
        on_behalf_of: Address,
    );

    /// Redeem an NFT from auction by repaying part of its debt and paying the first bidder
    /// a fine
    ///
    /// Returns the amount repaid plus the fine paid
    ///
    /// ### Arguments
    /// * `from` - The address sending the tokens
    /// * `nft_asset` - The NFT contract
    /// * `nft_token_id` - The id of the NFT
    /// * `amount` - The amount of debt to repay
    /// * `bid_fine` - The maximum fine `from` is willing to pay
    ///
    /// ### Panics
    /// If the pool is paused, the redeem window has passed or the amounts are out of range
    fn redeem(
        e: Env,
        from: Address,
        nft_asset: Address,
        nft_token_id: u32,
        amount: i128,
        bid_fine: i128,
    ) -> i128;

    /// Submit a set of redeems. Fails if any redeem fails.
    fn batch_redeem(e: Env, from: Address, requests: Vec<RedeemRequest>) -> Vec<i128>;

    /// Settle a finished auction, sending the NFT to the winning bidder
    ///
    /// Returns the debt not covered by the winning bid that `from` paid
    ///
    /// ### Arguments
    /// * `from` - The address covering any debt the bid falls short of
    /// * `nft_asset` - The NFT contract
    /// * `nft_token_id` - The id of the NFT
    /// * `amount` - The maximum amount `from` is willing to pay
    ///
    /// ### Panics
    /// If the pool is paused or the auction is still running
    fn liquidate(
        e: Env,
        from: Address,
        nft_asset: Address,
        nft_token_id: u32,
        amount: i128,
    ) -> i128;

    /// Submit a set of liquidations. Fails if any liquidation fails.
    fn batch_liquidate(e: Env, from: Address, requests: Vec<LiquidateRequest>) -> Vec<i128>;

    /********* Pause Functions **********/

    /// (Emergency admin only) Pause or unpause the pool
    ///
    /// ### Arguments
    /// * `paused` - If the pool should be paused
    ///
    /// ### Panics
    /// If the caller is not the emergency admin
    fn set_pool_pause(e: Env, paused: bool);

    /// Fetch (the start of the latest pause, the cumulative duration of completed pauses)
    fn get_paused_time(e: Env) -> (u64, u64);

    /********* Interceptor Functions **********/

    /// (Admin only) Allow or disallow a contract from registering as an interceptor
    ///
    /// ### Arguments
    /// * `interceptor` - The interceptor contract
    /// * `approved` - If the interceptor is approved
    fn approve_interceptor(e: Env, interceptor: Address, approved: bool);

    /// (Interceptor only) Register to be notified when the loan against an NFT closes
    ///
    /// ### Panics
    /// If the interceptor is not approved
    fn add_interceptor(e: Env, interceptor: Address, nft_asset: Address, token_id: u32);

    /// (Interceptor only) Stop being notified when the loan against an NFT closes
    ///
    /// ### Panics
    /// If the interceptor is not approved
    fn delete_interceptor(e: Env, interceptor: Address, nft_asset: Address, token_id: u32);

    /// (Admin only) Remove every interceptor from a set of NFTs
    fn purge_interceptors(e: Env, nft_asset: Address, token_ids: Vec<u32>);

    /// Fetch the interceptors of an NFT, in call order
    fn get_interceptors(e: Env, nft_asset: Address, token_id: u32) -> Vec<Address>;

    /********* Read Functions **********/

    /// Fetch the pool configuration
    fn get_pool_config(e: Env) -> PoolConfig;

    /// Fetch the configuration of a reserve
    fn get_reserve_config(e: Env, asset: Address) -> ReserveConfig;

    /// Fetch the data of a reserve, accrued to the current ledger timestamp
    fn get_reserve_data(e: Env, asset: Address) -> ReserveData;

    /// Fetch the underlying assets of every reserve
    fn get_reserve_list(e: Env) -> Vec<Address>;

    /// Fetch the liquidity index of a reserve at the current ledger timestamp
    fn get_reserve_normalized_income(e: Env, asset: Address) -> i128;

    /// Fetch the variable borrow index of a reserve at the current ledger timestamp
    fn get_reserve_normalized_variable_debt(e: Env, asset: Address) -> i128;

    /// Fetch the deposit of `user` in a reserve in underlying tokens
    fn get_deposit_balance(e: Env, asset: Address, user: Address) -> i128;

    /// Fetch the configuration of an NFT collection
    fn get_nft_config(e: Env, nft_asset: Address) -> NftConfig;

    /// Fetch every NFT collection accepted as collateral
    fn get_nft_list(e: Env) -> Vec<Address>;

    /// Fetch the borrowing capacity of an NFT from a collection against a reserve
    fn get_nft_collateral_data(e: Env, nft_asset: Address, reserve_asset: Address)
        -> CollateralData;

    /// Fetch the debt state of the latest loan against an NFT
    fn get_nft_debt_data(e: Env, nft_asset: Address, token_id: u32) -> DebtData;

    /// Fetch the auction state of the latest loan against an NFT
    fn get_nft_auction_data(e: Env, nft_asset: Address, token_id: u32) -> AuctionData;

    /// Fetch (the minimum first bid, the debt) of the latest loan against an NFT
    fn get_nft_liquidate_price(e: Env, nft_asset: Address, token_id: u32) -> (i128, i128);

    /// Fetch a loan by id
    fn get_loan(e: Env, loan_id: u64) -> Option<LoanData>;

    /// Fetch the id of the latest loan taken against an NFT
    fn get_collateral_loan_id(e: Env, nft_asset: Address, token_id: u32) -> Option<u64>;
}

#[contractimpl]
impl PoolTrait for PoolContract {
    fn initialize(e: Env, admin: Address, emergency_admin: Address, config: PoolConfig) {
        storage::extend_instance(&e);

        pool::execute_initialize(&e, &admin, &emergency_admin, &config);

        e.events()
            .publish((Symbol::new(&e, "initialize"), admin), config);
    }

    fn set_admin(e: Env, new_admin: Address) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        storage::set_admin(&e, &new_admin);

        e.events()
            .publish((Symbol::new(&e, "set_admin"), admin), new_admin);
    }

    fn set_emergency_admin(e: Env, new_emergency_admin: Address) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        storage::set_emergency_admin(&e, &new_emergency_admin);

        e.events().publish(
            (Symbol::new(&e, "set_emergency_admin"), admin),
            new_emergency_admin,
        );
    }

    fn update_pool(e: Env, config: PoolConfig) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        pool::execute_update_pool(&e, &config);

        e.events()
            .publish((Symbol::new(&e, "update_pool"), admin), config);
    }

    fn init_reserve(e: Env, asset: Address, config: ReserveConfig) -> u32 {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        let index = pool::initialize_reserve(&e, &asset, &config);

        e.events()
            .publish((Symbol::new(&e, "init_reserve"), admin), (asset, index));
        index
    }

    fn update_reserve(e: Env, asset: Address, config: ReserveConfig) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        pool::execute_update_reserve(&e, &asset, &config);

        e.events()
            .publish((Symbol::new(&e, "update_reserve"), admin), asset);
    }

    fn init_nft(e: Env, nft_asset: Address, config: NftConfig) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        pool::execute_init_nft(&e, &nft_asset, &config);

        e.events()
            .publish((Symbol::new(&e, "init_nft"), admin), nft_asset);
    }

    fn update_nft(e: Env, nft_asset: Address, config: NftConfig) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        pool::execute_update_nft(&e, &nft_asset, &config);

        e.events()
            .publish((Symbol::new(&e, "update_nft"), admin), nft_asset);
    }

    /********* Supply Functions **********/

    fn deposit(
        e: Env,
        from: Address,
        asset: Address,
        amount: i128,
        on_behalf_of: Address,
        referral_code: u32,
    ) -> i128 {
        storage::extend_instance(&e);
        from.require_auth();

        let scaled_amount = pool::execute_deposit(&e, &from, &asset, amount, &on_behalf_of);

        e.events().publish(
            (Symbol::new(&e, "deposit"), asset, on_behalf_of),
            (from, amount, referral_code),
        );
        scaled_amount
    }

    fn withdraw(e: Env, from: Address, asset: Address, amount: i128, to: Address) -> i128 {
        storage::extend_instance(&e);
        from.require_auth();

        let amount_withdrawn = pool::execute_withdraw(&e, &from, &asset, amount, &to);

        e.events().publish(
            (Symbol::new(&e, "withdraw"), asset, from),
            (to, amount_withdrawn),
        );
        amount_withdrawn
    }

    fn mint_to_treasury(e: Env, assets: Vec<Address>) -> Vec<i128> {
        storage::extend_instance(&e);

        let minted = pool::execute_mint_to_treasury(&e, &assets);

        e.events()
            .publish((Symbol::new(&e, "mint_to_treasury"),), (assets, minted.clone()));
        minted
    }

    /********* Loan Functions **********/

    fn borrow(
        e: Env,
        from: Address,
        asset: Address,
        amount: i128,
        nft_asset: Address,
        nft_token_id: u32,
        on_behalf_of: Address,
        referral_code: u32,
    ) -> u64 {
        let request = BorrowRequest {
            asset,
            amount,
            nft_asset,
            nft_token_id,
        };
        Self::batch_borrow(e.clone(), from, vec![&e, request], on_behalf_of, referral_code)
            .get_unchecked(0)
    }

    fn batch_borrow(
        e: Env,
        from: Address,
        requests: Vec<BorrowRequest>,
        on_behalf_of: Address,
        referral_code: u32,
    ) -> Vec<u64> {
        storage::extend_instance(&e);
        from.require_auth();
        if from != on_behalf_of {
            on_behalf_of.require_auth();
        }

        let mut pool = Pool::load(&e);
        pool.require_not_paused(&e);
        let mut loan_ids = vec![&e];
        for request in requests.iter() {
            let loan_id = execute_borrow(&e, &mut pool, &from, &request, &on_behalf_of);
            e.events().publish(
                (
                    Symbol::new(&e, "borrow"),
                    request.nft_asset,
                    request.nft_token_id,
                ),
                (
                    from.clone(),
                    on_behalf_of.clone(),
                    request.asset,
                    request.amount,
                    loan_id,
                    referral_code,
                ),
            );
            loan_ids.push_back(loan_id);
        }
        pool.store_cached_reserves(&e);
        loan_ids
    }

    fn repay(
        e: Env,
        from: Address,
        nft_asset: Address,
        nft_token_id: u32,
        amount: i128,
    ) -> (i128, bool) {
        let request = RepayRequest {
            nft_asset,
            nft_token_id,
            amount,
        };
        Self::batch_repay(e.clone(), from, vec![&e, request]).get_unchecked(0)
    }

    fn batch_repay(e: Env, from: Address, requests: Vec<RepayRequest>) -> Vec<(i128, bool)> {
        storage::extend_instance(&e);
        from.require_auth();

        let mut pool = Pool::load(&e);
        pool.require_not_paused(&e);
        let mut results = vec![&e];
        for request in requests.iter() {
            let (amount, is_full) = execute_repay(&e, &mut pool, &from, &request);
            e.events().publish(
                (
                    Symbol::new(&e, "repay"),
                    request.nft_asset,
                    request.nft_token_id,
                ),
                (from.clone(), amount, is_full),
            );
            results.push_back((amount, is_full));
        }
        pool.store_cached_reserves(&e);
        results
    }

    /***** Auction / Liquidation Functions *****/

    fn auction(
        e: Env,
        from: Address,
        nft_asset: Address,
        nft_token_id: u32,
        bid_price: i128,
        on_behalf_of: Address,
    ) {
        let request = AuctionRequest {
            nft_asset,
            nft_token_id,
            bid_price,
        };
        Self::batch_auction(e.clone(), from, vec![&e, request], on_behalf_of);
    }

    fn batch_auction(
        e: Env,
        from: Address,
        requests: Vec<AuctionRequest>,
        on_behalf_of: Address,
    ) {
        storage::extend_instance(&e);
        from.require_auth();

        let mut pool = Pool::load(&e);
        pool.require_not_paused(&e);
        for request in requests.iter() {
            execute_auction(&e, &mut pool, &from, &request, &on_behalf_of);
            e.events().publish(
                (
                    Symbol::new(&e, "auction"),
                    request.nft_asset,
                    request.nft_token_id,
                ),
                (from.clone(), on_behalf_of.clone(), request.bid_price),
            );
        }
        pool.store_cached_reserves(&e);
    }

    fn redeem(
        e: Env,
        from: Address,
        nft_asset: Address,
        nft_token_id: u32,
        amount: i128,
        bid_fine: i128,
    ) -> i128 {
        let request = RedeemRequest {
            nft_asset,
            nft_token_id,
            amount,
            bid_fine,
        };
        Self::batch_redeem(e.clone(), from, vec![&e, request]).get_unchecked(0)
    }

    fn batch_redeem(e: Env, from: Address, requests: Vec<RedeemRequest>) -> Vec<i128> {
        storage::extend_instance(&e);
        from.require_auth();

        let mut pool = Pool::load(&e);
        pool.require_not_paused(&e);
        let mut results = vec![&e];
        for request in requests.iter() {
            let paid = execute_redeem(&e, &mut pool, &from, &request);
            e.events().publish(
                (
                    Symbol::new(&e, "redeem"),
                    request.nft_asset,
                    request.nft_token_id,
                ),
                (from.clone(), request.amount, paid - request.amount),
            );
            results.push_back(paid);
        }
        pool.store_cached_reserves(&e);
        results
    }

    fn liquidate(
        e: Env,
        from: Address,
        nft_asset: Address,
        nft_token_id: u32,
        amount: i128,
    ) -> i128 {
        let request = LiquidateRequest {
            nft_asset,
            nft_token_id,
            amount,
        };
        Self::batch_liquidate(e.clone(), from, vec![&e, request]).get_unchecked(0)
    }

    fn batch_liquidate(e: Env, from: Address, requests: Vec<LiquidateRequest>) -> Vec<i128> {
        storage::extend_instance(&e);
        from.require_auth();

        let mut pool = Pool::load(&e);
        pool.require_not_paused(&e);
        let mut results = vec![&e];
        for request in requests.iter() {
            let extra_debt = execute_liquidate(&e, &mut pool, &from, &request);
            e.events().publish(
                (
                    Symbol::new(&e, "liquidate"),
                    request.nft_asset,
                    request.nft_token_id,
                ),
                (from.clone(), extra_debt),
            );
            results.push_back(extra_debt);
        }
        pool.store_cached_reserves(&e);
        results
    }

    /********* Pause Functions **********/

    fn set_pool_pause(e: Env, paused: bool) {
        storage::extend_instance(&e);
        let emergency_admin = storage::get_emergency_admin(&e);
        emergency_admin.require_auth();

        let pause = pool::execute_set_pool_pause(&e, paused);

        e.events().publish(
            (Symbol::new(&e, "set_pool_pause"), emergency_admin),
            (pause.paused, pause.start_time, pause.duration),
        );
    }

    fn get_paused_time(e: Env) -> (u64, u64) {
        pool::get_paused_time(&e)
    }

    /********* Interceptor Functions **********/

    fn approve_interceptor(e: Env, interceptor: Address, approved: bool) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        loans::execute_approve_interceptor(&e, &interceptor, approved);

        e.events().publish(
            (Symbol::new(&e, "approve_interceptor"), admin),
            (interceptor, approved),
        );
    }

    fn add_interceptor(e: Env, interceptor: Address, nft_asset: Address, token_id: u32) {
        storage::extend_instance(&e);
        interceptor.require_auth();

        loans::execute_add_interceptor(&e, &interceptor, &nft_asset, token_id);

        e.events().publish(
            (Symbol::new(&e, "add_interceptor"), nft_asset, token_id),
            interceptor,
        );
    }

    fn delete_interceptor(e: Env, interceptor: Address, nft_asset: Address, token_id: u32) {
        storage::extend_instance(&e);
        interceptor.require_auth();

        loans::execute_delete_interceptor(&e, &interceptor, &nft_asset, token_id);

        e.events().publish(
            (Symbol::new(&e, "delete_interceptor"), nft_asset, token_id),
            interceptor,
        );
    }

    fn purge_interceptors(e: Env, nft_asset: Address, token_ids: Vec<u32>) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        loans::execute_purge_interceptors(&e, &nft_asset, &token_ids);

        e.events().publish(
            (Symbol::new(&e, "purge_interceptors"), admin),
            (nft_asset, token_ids),
        );
    }

    fn get_interceptors(e: Env, nft_asset: Address, token_id: u32) -> Vec<Address> {
        storage::get_interceptors(&e, &nft_asset, token_id)
    }

    /********* Read Functions **********/

    fn get_pool_config(e: Env) -> PoolConfig {
        storage::get_pool_config(&e)
    }

    fn get_reserve_config(e: Env, asset: Address) -> ReserveConfig {
        Reserve::load(&e, &asset).config
    }

    fn get_reserve_data(e: Env, asset: Address) -> ReserveData {
        Reserve::load(&e, &asset).data
    }

    fn get_reserve_list(e: Env) -> Vec<Address> {
        storage::get_res_list(&e)
    }

    fn get_reserve_normalized_income(e: Env, asset: Address) -> i128 {
        Reserve::load(&e, &asset).data.liquidity_index
    }

    fn get_reserve_normalized_variable_debt(e: Env, asset: Address) -> i128 {
        Reserve::load(&e, &asset).data.variable_borrow_index
    }

    fn get_deposit_balance(e: Env, asset: Address, user: Address) -> i128 {
        let reserve = Reserve::load(&e, &asset);
        reserve.to_asset_from_scaled_supply(&e, storage::get_deposit(&e, &user, &asset))
    }

    fn get_nft_config(e: Env, nft_asset: Address) -> NftConfig {
        loans::load_nft_config(&e, &nft_asset)
    }

    fn get_nft_list(e: Env) -> Vec<Address> {
        storage::get_nft_list(&e)
    }

    fn get_nft_collateral_data(
        e: Env,
        nft_asset: Address,
        reserve_asset: Address,
    ) -> CollateralData {
        pool::get_collateral_data(&e, &nft_asset, &reserve_asset)
    }

    fn get_nft_debt_data(e: Env, nft_asset: Address, token_id: u32) -> DebtData {
        pool::get_debt_data(&e, &nft_asset, token_id)
    }

    fn get_nft_auction_data(e: Env, nft_asset: Address, token_id: u32) -> AuctionData {
        pool::get_auction_data(&e, &nft_asset, token_id)
    }

    fn get_nft_liquidate_price(e: Env, nft_asset: Address, token_id: u32) -> (i128, i128) {
        pool::get_liquidate_price(&e, &nft_asset, token_id)
    }

    fn get_loan(e: Env, loan_id: u64) -> Option<LoanData> {
        storage::get_loan(&e, loan_id)
    }

    fn get_collateral_loan_id(e: Env, nft_asset: Address, token_id: u32) -> Option<u64> {
        storage::get_nft_loan_id(&e, &nft_asset, token_id)
    }
}
