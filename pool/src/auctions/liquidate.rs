use sep_41_token::TokenClient;
use soroban_sdk::{contracttype, panic_with_error, unwrap::UnwrapOptimized, Address, Env};

use crate::{
    dependencies::NftClient,
    errors::PoolError,
    loans::{
        after_loan_repaid, before_loan_repaid, load_collateral_loan, load_nft_config, loan_debt,
        require_loan_state,
    },
    pool::{calc_auction_extension, Pool},
    storage::{self, LoanState},
    validator::require_nonnegative,
};

/// A request to settle a finished auction
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LiquidateRequest {
    pub nft_asset: Address,
    pub nft_token_id: u32,
    pub amount: i128,
}

/// Settle a finished auction. The winning bid repays the debt, with `from` covering any debt
/// the bid falls short of up to `amount`. Any surplus is sent to the borrower and the NFT to
/// the winning bidder.
///
/// Returns the amount of debt covered by `from`
///
/// ### Panics
/// If the loan is not in auction, the auction is still running, or `amount` can't cover the debt
pub fn execute_liquidate(
    e: &Env,
    pool: &mut Pool,
    from: &Address,
    request: &LiquidateRequest,
) -> i128 {
    require_nonnegative(e, request.amount);

    let mut loan = load_collateral_loan(e, &request.nft_asset, request.nft_token_id);
    require_loan_state(e, &loan, LoanState::Auction);
    let mut reserve = pool.load_reserve(e, &loan.reserve_asset);
    reserve.require_active(e);
    let nft_config = load_nft_config(e, &loan.nft_asset);

    let extension = calc_auction_extension(&pool.pause, loan.bid_paused_time);
    if e.ledger().timestamp() < loan.bid_start_time + nft_config.auction_duration + extension {
        panic_with_error!(e, PoolError::AuctionDurationNotEnded);
    }

    let debt = loan_debt(e, &reserve, &loan);
    let extra_debt = if debt > loan.bid_price {
        debt - loan.bid_price
    } else {
        0
    };
    if request.amount < extra_debt {
        panic_with_error!(e, PoolError::AmountLessThanExtraDebt);
    }
    let remaining = if loan.bid_price > debt {
        loan.bid_price - debt
    } else {
        0
    };

    before_loan_repaid(e, &loan.nft_asset, loan.nft_token_id);

    reserve.repay(loan.scaled_amount, debt);
    reserve.update_rates(e);
    pool.cache_reserve(reserve, true);

    let bidder = loan.bidder.clone().unwrap_optimized();
    loan.scaled_amount = 0;
    loan.state = LoanState::Defaulted;
    storage::set_loan(e, &loan);

    let token_client = TokenClient::new(e, &loan.reserve_asset);
    if extra_debt > 0 {
        token_client.transfer(from, &e.current_contract_address(), &extra_debt);
    }
    if remaining > 0 {
        token_client.transfer(&e.current_contract_address(), &loan.borrower, &remaining);
    }
    NftClient::new(e, &loan.nft_asset).transfer(
        &e.current_contract_address(),
        &bidder,
        &loan.nft_token_id,
    );

    after_loan_repaid(e, &loan.nft_asset, loan.nft_token_id);
    extra_debt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auctions::{execute_auction, AuctionRequest},
        constants::RAY,
        testutils,
    };
    use soroban_sdk::testutils::Address as _;

    fn start_auction(e: &Env, fixture: &testutils::LendingFixture, bidder: &Address, bid: i128) {
        fixture.set_nft_price(e, 60_0000000);
        fixture.reserve_client.mint(bidder, &bid);
        let request = AuctionRequest {
            nft_asset: fixture.nft_asset.clone(),
            nft_token_id: 1,
            bid_price: bid,
        };
        e.as_contract(&fixture.pool, || {
            let mut pool = Pool::load(e);
            execute_auction(e, &mut pool, bidder, &request, bidder);
        });
    }

    #[test]
    fn test_liquidate_with_surplus() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        let fixture = testutils::setup_lending(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        testutils::borrow_against(&e, &fixture, &samwise, 1, 50_0000000);
        start_auction(&e, &fixture, &frodo, 57_0000000);
        testutils::jump(&e, testutils::default_nft_config().auction_duration);

        let request = LiquidateRequest {
            nft_asset: fixture.nft_asset.clone(),
            nft_token_id: 1,
            amount: 0,
        };
        let mut debt = 0;
        e.as_contract(&fixture.pool, || {
            let mut pool = Pool::load(&e);
            let reserve = pool.load_reserve(&e, &fixture.reserve_asset);
            debt = reserve.total_debt(&e);
            assert!(debt > 50_0000000);

            let extra = execute_liquidate(&e, &mut pool, &frodo, &request);
            pool.store_cached_reserves(&e);
            assert_eq!(extra, 0);

            let loan = storage::get_loan(&e, 1).unwrap();
            assert_eq!(loan.state, LoanState::Defaulted);
            assert_eq!(loan.scaled_amount, 0);
            let res_data = storage::get_res_data(&e, &fixture.reserve_asset);
            assert_eq!(res_data.scaled_variable_debt, 0);
            assert_eq!(res_data.available_liquidity, 50_0000000 + debt);
        });
        assert_eq!(fixture.nft_client.owner_of(&1), frodo);
        // borrowed 50 plus the surplus of the bid over the debt
        assert_eq!(
            fixture.reserve_client.balance(&samwise),
            50_0000000 + 57_0000000 - debt
        );
    }

    #[test]
    fn test_liquidate_covers_extra_debt() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        let fixture = testutils::setup_lending(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        testutils::borrow_against(&e, &fixture, &samwise, 1, 50_0000000);
        start_auction(&e, &fixture, &frodo, 57_0000000);
        testutils::jump(&e, testutils::default_nft_config().auction_duration);
        fixture.reserve_client.mint(&frodo, &10_0000000);

        let request = LiquidateRequest {
            nft_asset: fixture.nft_asset.clone(),
            nft_token_id: 1,
            amount: 10_0000000,
        };
        e.as_contract(&fixture.pool, || {
            // debt grew past the bid during the auction
            let mut res_data = storage::get_res_data(&e, &fixture.reserve_asset);
            res_data.variable_borrow_index = RAY + RAY / 5;
            res_data.variable_borrow_rate = 0;
            res_data.last_time = e.ledger().timestamp();
            storage::set_res_data(&e, &fixture.reserve_asset, &res_data);

            let mut pool = Pool::load(&e);
            let extra = execute_liquidate(&e, &mut pool, &frodo, &request);
            assert_eq!(extra, 3_0000000);
        });
        assert_eq!(fixture.nft_client.owner_of(&1), frodo);
        assert_eq!(fixture.reserve_client.balance(&frodo), 7_0000000);
        assert_eq!(fixture.reserve_client.balance(&samwise), 50_0000000);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1224)")]
    fn test_liquidate_amount_under_extra_debt() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        let fixture = testutils::setup_lending(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        testutils::borrow_against(&e, &fixture, &samwise, 1, 50_0000000);
        start_auction(&e, &fixture, &frodo, 57_0000000);
        testutils::jump(&e, testutils::default_nft_config().auction_duration);

        let request = LiquidateRequest {
            nft_asset: fixture.nft_asset.clone(),
            nft_token_id: 1,
            amount: 2_9999999,
        };
        e.as_contract(&fixture.pool, || {
            let mut res_data = storage::get_res_data(&e, &fixture.reserve_asset);
            res_data.variable_borrow_index = RAY + RAY / 5;
            res_data.variable_borrow_rate = 0;
            res_data.last_time = e.ledger().timestamp();
            storage::set_res_data(&e, &fixture.reserve_asset, &res_data);

            let mut pool = Pool::load(&e);
            execute_liquidate(&e, &mut pool, &frodo, &request);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1255)")]
    fn test_liquidate_before_auction_end() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        let fixture = testutils::setup_lending(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        testutils::borrow_against(&e, &fixture, &samwise, 1, 50_0000000);
        start_auction(&e, &fixture, &frodo, 57_0000000);
        testutils::jump(&e, testutils::default_nft_config().auction_duration - 1);

        let request = LiquidateRequest {
            nft_asset: fixture.nft_asset.clone(),
            nft_token_id: 1,
            amount: 0,
        };
        e.as_contract(&fixture.pool, || {
            let mut pool = Pool::load(&e);
            execute_liquidate(&e, &mut pool, &frodo, &request);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1255)")]
    fn test_liquidate_waits_for_pause_extension() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();
        let fixture = testutils::setup_lending(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        testutils::borrow_against(&e, &fixture, &samwise, 1, 50_0000000);
        start_auction(&e, &fixture, &frodo, 57_0000000);
        testutils::jump(&e, testutils::default_nft_config().auction_duration);

        let request = LiquidateRequest {
            nft_asset: fixture.nft_asset.clone(),
            nft_token_id: 1,
            amount: 0,
        };
        e.as_contract(&fixture.pool, || {
            let mut pause = storage::get_pause(&e);
            pause.duration += 60;
            storage::set_pause(&e, &pause);

            let mut pool = Pool::load(&e);
            execute_liquidate(&e, &mut pool, &frodo, &request);
        });
    }
}
