#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod auctions;
mod constants;
mod contract;
mod dependencies;
mod errors;
mod loans;
mod math;
mod pool;
mod storage;
mod testutils;
mod validator;

pub use auctions::{AuctionRequest, LiquidateRequest, RedeemRequest};
pub use contract::*;
pub use errors::PoolError;
pub use loans::{BorrowRequest, RepayRequest};
pub use pool::{AuctionData, CollateralData, DebtData, Reserve};
pub use storage::{
    LoanData, LoanState, NftConfig, NftKey, PauseData, PoolConfig, PoolDataKey, ReserveConfig,
    ReserveData, UserReserveKey,
};
