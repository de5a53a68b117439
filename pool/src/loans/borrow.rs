use sep_41_token::TokenClient;
use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::{
    dependencies::NftClient,
    errors::PoolError,
    pool::{LoanPosition, Pool},
    storage::{self, LoanState},
    validator::require_positive,
};

use super::loan::{
    create_loan, load_nft_config, load_open_loan, loan_debt, require_loan_state,
    require_nft_active_not_frozen,
};

/// A request to borrow against an NFT
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct BorrowRequest {
    pub asset: Address,
    pub amount: i128,
    pub nft_asset: Address,
    pub nft_token_id: u32,
}

/// Borrow `amount` of `asset` against an NFT for `on_behalf_of`. The borrowed tokens are sent
/// to `from`. If no loan is open against the NFT, `from` must own the NFT and it is escrowed by
/// the pool, otherwise the existing loan is topped up.
///
/// Returns the id of the loan
///
/// ### Panics
/// If the reserve or NFT collection does not accept new borrows, or the NFT can't back the debt
pub fn execute_borrow(
    e: &Env,
    pool: &mut Pool,
    from: &Address,
    request: &BorrowRequest,
    on_behalf_of: &Address,
) -> u64 {
    require_positive(e, request.amount);

    let mut reserve = pool.load_reserve(e, &request.asset);
    reserve.require_active_not_frozen(e);
    if !reserve.config.borrowing_enabled {
        panic_with_error!(e, PoolError::BorrowingNotEnabled);
    }

    let nft_config = load_nft_config(e, &request.nft_asset);
    require_nft_active_not_frozen(e, &nft_config);
    if nft_config.max_token_id > 0 && request.nft_token_id > nft_config.max_token_id {
        panic_with_error!(e, PoolError::NftTokenIdExceedMax);
    }
    let nft_client = NftClient::new(e, &request.nft_asset);
    if nft_config.max_supply > 0 && nft_client.total_supply() > nft_config.max_supply {
        panic_with_error!(e, PoolError::NftSupplyExceedMax);
    }

    let open_loan = load_open_loan(e, &request.nft_asset, request.nft_token_id);
    let debt = match &open_loan {
        Some(loan) => {
            require_loan_state(e, loan, LoanState::Active);
            if loan.reserve_asset != request.asset || loan.borrower != *on_behalf_of {
                panic_with_error!(e, PoolError::InconsistentParams);
            }
            loan_debt(e, &reserve, loan)
        }
        None => {
            if nft_client.owner_of(&request.nft_token_id) != *from {
                panic_with_error!(e, PoolError::NftNotOwned);
            }
            0
        }
    };

    let mut position = LoanPosition::calculate(
        e,
        pool,
        &reserve,
        &request.nft_asset,
        &nft_config,
        debt,
    );
    if position.is_liquidatable(e) {
        panic_with_error!(e, PoolError::InvalidHf);
    }
    position.debt += request.amount;
    position.require_healthy(e);

    let scaled_amount = reserve.borrow(e, request.amount);
    reserve.update_rates(e);
    pool.cache_reserve(reserve, true);

    let mut loan = match open_loan {
        Some(loan) => loan,
        None => {
            let mut loan = create_loan(
                e,
                on_behalf_of,
                &request.nft_asset,
                request.nft_token_id,
                &request.asset,
            );
            nft_client.transfer(from, &e.current_contract_address(), &request.nft_token_id);
            storage::set_nft_loan_id(e, &request.nft_asset, request.nft_token_id, loan.loan_id);
            loan.state = LoanState::Active;
            loan
        }
    };
    loan.scaled_amount += scaled_amount;
    storage::set_loan(e, &loan);

    TokenClient::new(e, &request.asset).transfer(
        &e.current_contract_address(),
        from,
        &request.amount,
    );
    loan.loan_id
}
