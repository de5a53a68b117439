use soroban_sdk::{panic_with_error, unwrap::UnwrapOptimized, Address, Env};

use crate::{
    errors::PoolError,
    pool::Reserve,
    storage::{self, LoanData, LoanState, NftConfig},
};

/// Load the collateral configuration of an NFT collection
///
/// ### Panics
/// If the collection is not accepted as collateral
pub fn load_nft_config(e: &Env, nft_asset: &Address) -> NftConfig {
    match storage::get_nft_config(e, nft_asset) {
        Some(config) => config,
        None => panic_with_error!(e, PoolError::NftNotFound),
    }
}

/// Require that the NFT collection is active, or panic
pub fn require_nft_active(e: &Env, config: &NftConfig) {
    if !config.active {
        panic_with_error!(e, PoolError::NftInactive);
    }
}

/// Require that the NFT collection is active and not frozen, or panic
pub fn require_nft_active_not_frozen(e: &Env, config: &NftConfig) {
    require_nft_active(e, config);
    if config.frozen {
        panic_with_error!(e, PoolError::NftFrozen);
    }
}

/// Load the open (Active or Auction) loan against an NFT, if one exists
pub fn load_open_loan(e: &Env, nft_asset: &Address, token_id: u32) -> Option<LoanData> {
    let loan_id = storage::get_nft_loan_id(e, nft_asset, token_id)?;
    let loan = storage::get_loan(e, loan_id).unwrap_optimized();
    match loan.state {
        LoanState::Active | LoanState::Auction => Some(loan),
        _ => None,
    }
}

/// Load the latest loan taken against an NFT
///
/// ### Panics
/// If the NFT has never been used as collateral
pub fn load_collateral_loan(e: &Env, nft_asset: &Address, token_id: u32) -> LoanData {
    match storage::get_nft_loan_id(e, nft_asset, token_id) {
        Some(loan_id) => storage::get_loan(e, loan_id).unwrap_optimized(),
        None => panic_with_error!(e, PoolError::NftNotUsedAsCollateral),
    }
}

/// Require that the loan is in `state`, or panic
pub fn require_loan_state(e: &Env, loan: &LoanData, state: LoanState) {
    if loan.state != state {
        panic_with_error!(e, PoolError::InvalidLoanState);
    }
}

/// Create a new loan for `borrower` against an NFT
pub fn create_loan(
    e: &Env,
    borrower: &Address,
    nft_asset: &Address,
    token_id: u32,
    reserve_asset: &Address,
) -> LoanData {
    LoanData {
        loan_id: storage::next_loan_id(e),
        state: LoanState::Created,
        borrower: borrower.clone(),
        nft_asset: nft_asset.clone(),
        nft_token_id: token_id,
        reserve_asset: reserve_asset.clone(),
        scaled_amount: 0,
        bid_start_time: 0,
        bidder: None,
        first_bidder: None,
        bid_price: 0,
        bid_borrow_amount: 0,
        bid_fine: 0,
        bid_paused_time: 0,
    }
}

/// Clear all bid information from a loan
pub fn clear_bid(loan: &mut LoanData) {
    loan.bid_start_time = 0;
    loan.bidder = None;
    loan.first_bidder = None;
    loan.bid_price = 0;
    loan.bid_borrow_amount = 0;
    loan.bid_fine = 0;
    loan.bid_paused_time = 0;
}

/// The current debt of the loan in reserve tokens
pub fn loan_debt(e: &Env, reserve: &Reserve, loan: &LoanData) -> i128 {
    reserve.to_asset_from_scaled_debt(e, loan.scaled_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils;
    use soroban_sdk::testutils::Address as _;

    #[test]
    fn test_load_open_loan() {
        let e = Env::default();
        let pool = testutils::create_pool(&e);
        let samwise = Address::generate(&e);
        let nft_asset = Address::generate(&e);
        let reserve_asset = Address::generate(&e);

        e.as_contract(&pool, || {
            assert!(load_open_loan(&e, &nft_asset, 7).is_none());

            let mut loan = create_loan(&e, &samwise, &nft_asset, 7, &reserve_asset);
            assert_eq!(loan.loan_id, 1);
            assert_eq!(loan.state, LoanState::Created);
            loan.state = LoanState::Active;
            storage::set_loan(&e, &loan);
            storage::set_nft_loan_id(&e, &nft_asset, 7, loan.loan_id);
            assert_eq!(load_open_loan(&e, &nft_asset, 7), Some(loan.clone()));

            loan.state = LoanState::Repaid;
            storage::set_loan(&e, &loan);
            assert!(load_open_loan(&e, &nft_asset, 7).is_none());
            // terminal loans remain reachable from the collateral
            assert_eq!(load_collateral_loan(&e, &nft_asset, 7), loan);

            let next = create_loan(&e, &samwise, &nft_asset, 7, &reserve_asset);
            assert_eq!(next.loan_id, 2);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1233)")]
    fn test_load_collateral_loan_missing() {
        let e = Env::default();
        let pool = testutils::create_pool(&e);
        let nft_asset = Address::generate(&e);

        e.as_contract(&pool, || {
            load_collateral_loan(&e, &nft_asset, 1);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1215)")]
    fn test_require_nft_active_not_frozen() {
        let e = Env::default();
        let pool = testutils::create_pool(&e);
        let mut config = testutils::default_nft_config();
        config.frozen = true;

        e.as_contract(&pool, || {
            require_nft_active(&e, &config);
            require_nft_active_not_frozen(&e, &config);
        });
    }

    #[test]
    fn test_clear_bid() {
        let e = Env::default();
        let pool = testutils::create_pool(&e);
        let samwise = Address::generate(&e);

        e.as_contract(&pool, || {
            let mut loan = create_loan(&e, &samwise, &Address::generate(&e), 1, &samwise);
            loan.bidder = Some(samwise.clone());
            loan.first_bidder = Some(samwise.clone());
            loan.bid_price = 100;
            loan.bid_start_time = 12;
            clear_bid(&mut loan);
            assert_eq!(loan.bidder, None);
            assert_eq!(loan.first_bidder, None);
            assert_eq!(loan.bid_price, 0);
            assert_eq!(loan.bid_start_time, 0);
        });
    }
}
