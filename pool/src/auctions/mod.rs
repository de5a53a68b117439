mod auction;
pub use auction::{execute_auction, AuctionRequest};

mod liquidate;
pub use liquidate::{execute_liquidate, LiquidateRequest};

mod redeem;
pub use redeem::{execute_redeem, RedeemRequest};
