use soroban_sdk::{panic_with_error, Address, Env, Vec};

use crate::{dependencies::InterceptorClient, errors::PoolError, storage};

/// Allow or disallow a contract from registering itself as a loan-repaid interceptor
pub fn execute_approve_interceptor(e: &Env, interceptor: &Address, approved: bool) {
    storage::set_interceptor_approved(e, interceptor, approved);
}

/// Register `interceptor` to be notified when the loan against an NFT is closed
///
/// ### Panics
/// If the interceptor is not approved
pub fn execute_add_interceptor(e: &Env, interceptor: &Address, nft_asset: &Address, token_id: u32) {
    require_approved(e, interceptor);
    let mut interceptors = storage::get_interceptors(e, nft_asset, token_id);
    if !interceptors.contains(interceptor) {
        interceptors.push_back(interceptor.clone());
        storage::set_interceptors(e, nft_asset, token_id, &interceptors);
    }
}

/// Remove `interceptor` from the interceptors of an NFT
///
/// ### Panics
/// If the interceptor is not approved
pub fn execute_delete_interceptor(
    e: &Env,
    interceptor: &Address,
    nft_asset: &Address,
    token_id: u32,
) {
    require_approved(e, interceptor);
    let mut interceptors = storage::get_interceptors(e, nft_asset, token_id);
    if let Some(index) = interceptors.first_index_of(interceptor) {
        interceptors.remove(index);
        storage::set_interceptors(e, nft_asset, token_id, &interceptors);
    }
}

/// Remove every interceptor from each of the `token_ids` of an NFT collection
pub fn execute_purge_interceptors(e: &Env, nft_asset: &Address, token_ids: &Vec<u32>) {
    let empty = Vec::new(e);
    for token_id in token_ids.iter() {
        storage::set_interceptors(e, nft_asset, token_id, &empty);
    }
}

/// Notify the interceptors of an NFT that its loan is about to close
///
/// ### Panics
/// If any interceptor rejects the repayment
pub fn before_loan_repaid(e: &Env, nft_asset: &Address, token_id: u32) {
    for interceptor in storage::get_interceptors(e, nft_asset, token_id).iter() {
        if !InterceptorClient::new(e, &interceptor).before_loan_repaid(nft_asset, &token_id) {
            panic_with_error!(e, PoolError::InterceptorRejected);
        }
    }
}

/// Notify the interceptors of an NFT that its loan was closed
///
/// ### Panics
/// If any interceptor fails to handle the repayment
pub fn after_loan_repaid(e: &Env, nft_asset: &Address, token_id: u32) {
    for interceptor in storage::get_interceptors(e, nft_asset, token_id).iter() {
        if !InterceptorClient::new(e, &interceptor).after_loan_repaid(nft_asset, &token_id) {
            panic_with_error!(e, PoolError::InterceptorRejected);
        }
    }
}

fn require_approved(e: &Env, interceptor: &Address) {
    if !storage::get_interceptor_approved(e, interceptor) {
        panic_with_error!(e, PoolError::InterceptorNotApproved);
    }
}
