use sep_41_token::TokenClient;
use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::{
    constants::ONE_PERCENT,
    errors::PoolError,
    loans::{load_collateral_loan, load_nft_config, loan_debt, require_nft_active},
    math::PercentMath,
    pool::{calc_auction_extension, calc_bid_fine, LoanPosition, Pool},
    storage::{self, LoanState},
    validator::require_positive,
};

/// A bid on the NFT backing an unhealthy loan
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct AuctionRequest {
    pub nft_asset: Address,
    pub nft_token_id: u32,
    pub bid_price: i128,
}

/// Bid `bid_price` from `from` on the NFT backing a loan, with `on_behalf_of` as the bidder.
/// The first bid on an Active loan starts the auction, later bids must outbid the highest
/// bid by at least 1% of the debt and refund it.
///
/// ### Panics
/// If the loan is healthy, the bid is too low, or the auction has ended
pub fn execute_auction(
    e: &Env,
    pool: &mut Pool,
    from: &Address,
    request: &AuctionRequest,
    on_behalf_of: &Address,
) {
    require_positive(e, request.bid_price);

    let mut loan = load_collateral_loan(e, &request.nft_asset, request.nft_token_id);
    let reserve = pool.load_reserve(e, &loan.reserve_asset);
    reserve.require_active(e);
    let nft_config = load_nft_config(e, &loan.nft_asset);
    require_nft_active(e, &nft_config);

    let debt = loan_debt(e, &reserve, &loan);
    let token_client = TokenClient::new(e, &loan.reserve_asset);
    match loan.state {
        LoanState::Active => {
            let position =
                LoanPosition::calculate(e, pool, &reserve, &loan.nft_asset, &nft_config, debt);
            if !position.is_liquidatable(e) {
                panic_with_error!(e, PoolError::BorrowNotExceedLiquidationThreshold);
            }
            if request.bid_price < position.liquidate_price(e) {
                panic_with_error!(e, PoolError::BidPriceLessThanLiquidationPrice);
            }
            if request.bid_price < debt {
                panic_with_error!(e, PoolError::BidPriceLessThanBorrow);
            }

            loan.state = LoanState::Auction;
            loan.bid_start_time = e.ledger().timestamp();
            loan.first_bidder = Some(on_behalf_of.clone());
            loan.bid_borrow_amount = debt;
            loan.bid_fine = calc_bid_fine(e, pool, &reserve, &nft_config, debt);
            loan.bid_paused_time = pool.pause.duration;
        }
        LoanState::Auction => {
            let extension = calc_auction_extension(&pool.pause, loan.bid_paused_time);
            let auction_end = loan.bid_start_time + nft_config.auction_duration + extension;
            if e.ledger().timestamp() >= auction_end {
                panic_with_error!(e, PoolError::AuctionDurationEnded);
            }
            if request.bid_price < debt {
                panic_with_error!(e, PoolError::BidPriceLessThanBorrow);
            }
            let min_bid = loan.bid_price + debt.percent_mul(e, ONE_PERCENT);
            if request.bid_price < min_bid || request.bid_price <= loan.bid_price {
                panic_with_error!(e, PoolError::BidPriceLessThanHighestPrice);
            }

            if let Some(prev_bidder) = &loan.bidder {
                token_client.transfer(&e.current_contract_address(), prev_bidder, &loan.bid_price);
            }
        }
        _ => panic_with_error!(e, PoolError::InvalidLoanState),
    }

    loan.bidder = Some(on_behalf_of.clone());
    loan.bid_price = request.bid_price;
    storage::set_loan(e, &loan);
    pool.cache_reserve(reserve, true);

    token_client.transfer(from, &e.current_contract_address(), &request.bid_price);
}
