use cast::i128;
use soroban_sdk::{panic_with_error, Address, Env};

use crate::{
    constants::{ONE_PERCENT, WAD},
    errors::PoolError,
    math::{PercentMath, WadMath},
    storage::NftConfig,
};

use super::{pool::Pool, reserve::Reserve};

/// The valuation of a single NFT against a debt, all in reserve tokens
pub struct LoanPosition {
    /// The price of the NFT denominated in the reserve asset
    pub nft_price: i128,
    /// The outstanding debt denominated in the reserve asset
    pub debt: i128,
    pub ltv: u32,
    pub liq_threshold: u32,
    pub liq_bonus: u32,
}

impl LoanPosition {
    /// Value an NFT from `nft_asset` against `debt` of `reserve`
    ///
    /// ### Arguments
    /// * pool - The pool
    /// * reserve - The reserve the debt is denominated in
    /// * nft_asset - The NFT collection
    /// * nft_config - The collateral configuration of the collection
    /// * debt - The debt in reserve tokens
    pub fn calculate(
        e: &Env,
        pool: &mut Pool,
        reserve: &Reserve,
        nft_asset: &Address,
        nft_config: &NftConfig,
        debt: i128,
    ) -> Self {
        let nft_price = pool.load_nft_price_in_reserve(e, nft_asset, reserve);
        LoanPosition {
            nft_price,
            debt,
            ltv: nft_config.ltv,
            liq_threshold: nft_config.liq_threshold,
            liq_bonus: nft_config.liq_bonus,
        }
    }

    /// The health factor in wad. `i128::MAX` with no debt.
    pub fn as_health_factor(&self, e: &Env) -> i128 {
        if self.debt == 0 {
            return i128::MAX;
        }
        self.threshold_price(e).wad_div(e, self.debt)
    }

    /// The debt above which the loan can be auctioned
    pub fn threshold_price(&self, e: &Env) -> i128 {
        self.nft_price.percent_mul(e, i128(self.liq_threshold))
    }

    /// The maximum debt the NFT can back
    pub fn max_debt(&self, e: &Env) -> i128 {
        self.nft_price.percent_mul(e, i128(self.ltv))
    }

    /// The additional amount that can be borrowed against the NFT
    pub fn available_borrows(&self, e: &Env) -> i128 {
        let max_debt = self.max_debt(e);
        if max_debt > self.debt {
            max_debt - self.debt
        } else {
            0
        }
    }

    /// The minimum first bid for the NFT. Bids must always cover the debt, so the discounted
    /// price is raised above the debt when it falls short.
    pub fn liquidate_price(&self, e: &Env) -> i128 {
        let liquidate_price = self.nft_price - self.nft_price.percent_mul(e, i128(self.liq_bonus));
        if liquidate_price < self.debt {
            self.debt + self.debt.percent_mul(e, ONE_PERCENT)
        } else {
            liquidate_price
        }
    }

    /// Check if the loan can be liquidated
    pub fn is_liquidatable(&self, e: &Env) -> bool {
        self.as_health_factor(e) < WAD
    }

    /// Check that the position is healthy and within the loan to value, panic if not
    pub fn require_healthy(&self, e: &Env) {
        if self.nft_price <= 0 {
            panic_with_error!(e, PoolError::CollateralBalanceZero);
        }
        if self.debt > self.max_debt(e) {
            panic_with_error!(e, PoolError::CollateralCannotCoverBorrow);
        }
        if self.as_health_factor(e) < WAD {
            panic_with_error!(e, PoolError::InvalidHf);
        }
    }
}

/// Calculate the fine a borrower pays the first bidder to redeem their NFT, in reserve tokens
///
/// ### Arguments
/// * pool - The pool
/// * reserve - The reserve the loan is denominated in
/// * nft_config - The collateral configuration of the collection
/// * bid_borrow_amount - The debt when the auction started, 0 if no auction was started
pub fn calc_bid_fine(
    e: &Env,
    pool: &mut Pool,
    reserve: &Reserve,
    nft_config: &NftConfig,
    bid_borrow_amount: i128,
) -> i128 {
    if bid_borrow_amount == 0 {
        return 0;
    }
    let bid_fine = bid_borrow_amount.percent_mul(e, i128(nft_config.redeem_fine));
    let min_bid_fine = if nft_config.min_bid_fine > 0 {
        pool.to_reserve_amount(e, reserve, nft_config.min_bid_fine)
    } else {
        0
    };
    bid_fine.max(min_bid_fine)
}
