use soroban_sdk::{contracttype, Address, Env};

use crate::{
    loans::{load_collateral_loan, load_nft_config, loan_debt},
    storage::LoanState,
};

use super::{health_factor::LoanPosition, pool::Pool};

/// The borrowing capacity of an NFT from a collection against a reserve
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CollateralData {
    pub nft_price: i128, // the price of the NFT in reserve tokens
    pub available_borrows: i128,
    pub ltv: u32,
    pub liq_threshold: u32,
    pub liq_bonus: u32,
}

/// The debt state of the latest loan against an NFT
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DebtData {
    pub loan_id: u64,
    pub reserve_asset: Address,
    pub nft_price: i128, // the price of the NFT in reserve tokens
    pub total_debt: i128,
    pub available_borrows: i128,
    pub health_factor: i128, // the health factor in wad
}

/// The auction state of the latest loan against an NFT
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct AuctionData {
    pub loan_id: u64,
    pub bidder: Option<Address>,
    pub bid_price: i128,
    pub bid_borrow_amount: i128,
    pub bid_fine: i128,
}

/// Fetch the borrowing capacity of an NFT from `nft_asset` against `reserve_asset`
pub fn get_collateral_data(e: &Env, nft_asset: &Address, reserve_asset: &Address) -> CollateralData {
    let mut pool = Pool::load(e);
    let reserve = pool.load_reserve(e, reserve_asset);
    let nft_config = load_nft_config(e, nft_asset);
    let position = LoanPosition::calculate(e, &mut pool, &reserve, nft_asset, &nft_config, 0);
    CollateralData {
        nft_price: position.nft_price,
        available_borrows: position.available_borrows(e),
        ltv: nft_config.ltv,
        liq_threshold: nft_config.liq_threshold,
        liq_bonus: nft_config.liq_bonus,
    }
}

/// Fetch the debt state of the latest loan against an NFT
pub fn get_debt_data(e: &Env, nft_asset: &Address, token_id: u32) -> DebtData {
    let (loan_id, reserve_asset, position) = load_loan_position(e, nft_asset, token_id);
    DebtData {
        loan_id,
        reserve_asset,
        nft_price: position.nft_price,
        total_debt: position.debt,
        available_borrows: position.available_borrows(e),
        health_factor: position.as_health_factor(e),
    }
}

/// Fetch the auction state of the latest loan against an NFT
pub fn get_auction_data(e: &Env, nft_asset: &Address, token_id: u32) -> AuctionData {
    let loan = load_collateral_loan(e, nft_asset, token_id);
    AuctionData {
        loan_id: loan.loan_id,
        bidder: loan.bidder,
        bid_price: loan.bid_price,
        bid_borrow_amount: loan.bid_borrow_amount,
        bid_fine: loan.bid_fine,
    }
}

/// Fetch the minimum first bid for an NFT and the debt a winning bid must cover
///
/// Returns (liquidate price, debt)
pub fn get_liquidate_price(e: &Env, nft_asset: &Address, token_id: u32) -> (i128, i128) {
    let (_, _, position) = load_loan_position(e, nft_asset, token_id);
    (position.liquidate_price(e), position.debt)
}

fn load_loan_position(e: &Env, nft_asset: &Address, token_id: u32) -> (u64, Address, LoanPosition) {
    let loan = load_collateral_loan(e, nft_asset, token_id);
    let mut pool = Pool::load(e);
    let reserve = pool.load_reserve(e, &loan.reserve_asset);
    let nft_config = load_nft_config(e, nft_asset);
    let debt = match loan.state {
        LoanState::Active | LoanState::Auction => loan_debt(e, &reserve, &loan),
        _ => 0,
    };
    let position = LoanPosition::calculate(e, &mut pool, &reserve, nft_asset, &nft_config, debt);
    (loan.loan_id, loan.reserve_asset, position)
}
