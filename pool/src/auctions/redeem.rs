use cast::i128;
use sep_41_token::TokenClient;
use soroban_sdk::{contracttype, panic_with_error, unwrap::UnwrapOptimized, Address, Env};

use crate::{
    constants::MAX_REDEEM_PERCENT,
    errors::PoolError,
    loans::{clear_bid, load_collateral_loan, load_nft_config, loan_debt, require_loan_state},
    math::PercentMath,
    pool::{calc_auction_extension, Pool},
    storage::{self, LoanState},
    validator::require_positive,
};

/// A request to redeem an NFT from auction
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RedeemRequest {
    pub nft_asset: Address,
    pub nft_token_id: u32,
    pub amount: i128,
    pub bid_fine: i128,
}

/// Redeem the NFT backing a loan in auction by repaying part of its debt from `from` and
/// paying the fine to the first bidder. The highest bid is refunded and the loan returns
/// to Active with the NFT still pledged.
///
/// Returns the amount repaid plus the fine paid
///
/// ### Panics
/// If the loan is not in auction, the redeem window has passed, or the amounts are out of range
pub fn execute_redeem(e: &Env, pool: &mut Pool, from: &Address, request: &RedeemRequest) -> i128 {
    require_positive(e, request.amount);

    let mut loan = load_collateral_loan(e, &request.nft_asset, request.nft_token_id);
    require_loan_state(e, &loan, LoanState::Auction);
    let mut reserve = pool.load_reserve(e, &loan.reserve_asset);
    reserve.require_active(e);
    let nft_config = load_nft_config(e, &loan.nft_asset);

    let extension = calc_auction_extension(&pool.pause, loan.bid_paused_time);
    if e.ledger().timestamp() >= loan.bid_start_time + nft_config.redeem_duration + extension {
        panic_with_error!(e, PoolError::RedeemDurationEnded);
    }

    if request.bid_fine < loan.bid_fine {
        panic_with_error!(e, PoolError::InvalidBidFine);
    }

    let debt = loan_debt(e, &reserve, &loan);
    if request.amount < debt.percent_mul(e, i128(nft_config.redeem_threshold)) {
        panic_with_error!(e, PoolError::AmountLessThanRedeemThreshold);
    }
    if request.amount > debt.percent_mul(e, MAX_REDEEM_PERCENT) {
        panic_with_error!(e, PoolError::AmountGreaterThanMaxRepay);
    }

    let scaled_amount = reserve.to_scaled_debt(e, request.amount);
    if scaled_amount <= 0 {
        panic_with_error!(e, PoolError::InvalidScaledAmount);
    }
    reserve.repay(scaled_amount, request.amount);
    reserve.update_rates(e);
    pool.cache_reserve(reserve, true);

    let bid_fine = loan.bid_fine;
    let bid_price = loan.bid_price;
    let bidder = loan.bidder.clone().unwrap_optimized();
    let first_bidder = loan.first_bidder.clone().unwrap_optimized();
    loan.scaled_amount -= scaled_amount;
    loan.state = LoanState::Active;
    clear_bid(&mut loan);
    storage::set_loan(e, &loan);

    let token_client = TokenClient::new(e, &loan.reserve_asset);
    token_client.transfer(from, &e.current_contract_address(), &request.amount);
    token_client.transfer(&e.current_contract_address(), &bidder, &bid_price);
    if bid_fine > 0 {
        token_client.transfer(from, &first_bidder, &bid_fine);
    }
    request.amount + bid_fine
}
