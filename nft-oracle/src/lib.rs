#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod constants;
mod contract;
mod errors;
mod price_feed;
mod storage;
mod validity;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use contract::*;
pub use errors::NftOracleError;
pub use storage::{FeedInfo, OracleDataKey, PriceData, RoundKey, ValidityParams};
