use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

const ACCEPT_KEY: &str = "Accept";
const BEFORE_KEY: &str = "Before";
const AFTER_KEY: &str = "After";

/// A loan-repaid interceptor that records how often it was invoked and
/// can be told to reject repayments
#[contract]
pub struct MockInterceptor;

pub trait MockInterceptorTrait {
    /// Mock Only: Set whether `before_loan_repaid` accepts the repayment
    fn set_accept(e: Env, accept: bool);

    /// Hook invoked before a loan against `nft_asset`/`token_id` is closed
    fn before_loan_repaid(e: Env, nft_asset: Address, token_id: u32) -> bool;

    /// Hook invoked after a loan against `nft_asset`/`token_id` is closed
    fn after_loan_repaid(e: Env, nft_asset: Address, token_id: u32) -> bool;

    /// Mock Only: Fetch the number of (before, after) invocations
    fn get_calls(e: Env) -> (u32, u32);
}

fn get_count(e: &Env, key: &str) -> u32 {
    e.storage()
        .instance()
        .get(&Symbol::new(e, key))
        .unwrap_or(0)
}

fn bump_count(e: &Env, key: &str) {
    let count = get_count(e, key) + 1;
    e.storage()
        .instance()
        .set::<Symbol, u32>(&Symbol::new(e, key), &count);
}

#[contractimpl]
impl MockInterceptorTrait for MockInterceptor {
    fn set_accept(e: Env, accept: bool) {
        e.storage()
            .instance()
            .set::<Symbol, bool>(&Symbol::new(&e, ACCEPT_KEY), &accept);
    }

    fn before_loan_repaid(e: Env, nft_asset: Address, token_id: u32) -> bool {
        bump_count(&e, BEFORE_KEY);
        e.events()
            .publish((Symbol::new(&e, "before_loan_repaid"), nft_asset), token_id);
        e.storage()
            .instance()
            .get(&Symbol::new(&e, ACCEPT_KEY))
            .unwrap_or(true)
    }

    fn after_loan_repaid(e: Env, nft_asset: Address, token_id: u32) -> bool {
        bump_count(&e, AFTER_KEY);
        e.events()
            .publish((Symbol::new(&e, "after_loan_repaid"), nft_asset), token_id);
        true
    }

    fn get_calls(e: Env) -> (u32, u32) {
        (get_count(&e, BEFORE_KEY), get_count(&e, AFTER_KEY))
    }
}
