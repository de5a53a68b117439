mod config;
pub use config::{
    execute_init_nft, execute_initialize, execute_update_nft, execute_update_pool,
    execute_update_reserve, initialize_reserve,
};

mod health_factor;
pub use health_factor::{calc_bid_fine, LoanPosition};

mod interest;

#[allow(clippy::module_inception)]
mod pool;
pub use pool::Pool;

mod reserve;
pub use reserve::Reserve;

mod status;
pub use status::{calc_auction_extension, execute_set_pool_pause, get_paused_time};

mod supply;
pub use supply::{execute_deposit, execute_mint_to_treasury, execute_withdraw};

mod views;
pub use views::{
    get_auction_data, get_collateral_data, get_debt_data, get_liquidate_price, AuctionData,
    CollateralData, DebtData,
};
