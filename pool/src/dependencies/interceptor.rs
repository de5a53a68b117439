use soroban_sdk::{contractclient, Address, Env};

/// The interface of a contract notified when a loan against an NFT is closed
#[allow(dead_code)]
#[contractclient(name = "InterceptorClient")]
pub trait LoanRepaidInterceptor {
    /// Invoked before the loan is closed. Returning false aborts the repayment.
    fn before_loan_repaid(e: Env, nft_asset: Address, token_id: u32) -> bool;

    /// Invoked after the loan is closed
    fn after_loan_repaid(e: Env, nft_asset: Address, token_id: u32) -> bool;
}
