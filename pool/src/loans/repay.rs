use sep_41_token::TokenClient;
use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::{
    constants::MAX_AMOUNT,
    dependencies::NftClient,
    errors::PoolError,
    pool::Pool,
    storage::{self, LoanState},
    validator::require_positive,
};

use super::{
    interceptors::{after_loan_repaid, before_loan_repaid},
    loan::{load_collateral_loan, loan_debt, require_loan_state},
};

/// A request to repay the loan against an NFT
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RepayRequest {
    pub nft_asset: Address,
    pub nft_token_id: u32,
    pub amount: i128,
}

/// Repay `amount` of the loan against an NFT from `from`. Repaying `i128::MAX` or at least the
/// outstanding debt closes the loan and returns the NFT to the borrower.
///
/// Returns (the amount repaid, if the loan was repaid in full)
///
/// ### Panics
/// If the loan is not Active or an interceptor rejects the repayment
pub fn execute_repay(
    e: &Env,
    pool: &mut Pool,
    from: &Address,
    request: &RepayRequest,
) -> (i128, bool) {
    require_positive(e, request.amount);

    let mut loan = load_collateral_loan(e, &request.nft_asset, request.nft_token_id);
    require_loan_state(e, &loan, LoanState::Active);

    let mut reserve = pool.load_reserve(e, &loan.reserve_asset);
    reserve.require_active(e);

    let debt = loan_debt(e, &reserve, &loan);
    let is_full = request.amount == MAX_AMOUNT || request.amount >= debt;
    let (paid, scaled_amount) = if is_full {
        (debt, loan.scaled_amount)
    } else {
        let scaled_amount = reserve.to_scaled_debt(e, request.amount);
        if scaled_amount <= 0 {
            panic_with_error!(e, PoolError::InvalidScaledAmount);
        }
        (request.amount, scaled_amount)
    };

    if is_full {
        before_loan_repaid(e, &loan.nft_asset, loan.nft_token_id);
    }

    reserve.repay(scaled_amount, paid);
    reserve.update_rates(e);
    pool.cache_reserve(reserve, true);

    loan.scaled_amount -= scaled_amount;
    if is_full {
        loan.state = LoanState::Repaid;
    }
    storage::set_loan(e, &loan);

    TokenClient::new(e, &loan.reserve_asset).transfer(from, &e.current_contract_address(), &paid);
    if is_full {
        NftClient::new(e, &loan.nft_asset).transfer(
            &e.current_contract_address(),
            &loan.borrower,
            &loan.nft_token_id,
        );
        after_loan_repaid(e, &loan.nft_asset, loan.nft_token_id);
    }
    (paid, is_full)
}
