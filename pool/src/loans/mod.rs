mod borrow;
pub use borrow::{execute_borrow, BorrowRequest};

mod interceptors;
pub use interceptors::{
    after_loan_repaid, before_loan_repaid, execute_add_interceptor, execute_approve_interceptor,
    execute_delete_interceptor, execute_purge_interceptors,
};

mod loan;
pub use loan::{
    clear_bid, load_collateral_loan, load_nft_config, loan_debt, require_loan_state,
    require_nft_active,
};

mod repay;
pub use repay::{execute_repay, RepayRequest};
