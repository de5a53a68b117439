#![cfg(any(test, feature = "testutils"))]

use crate::{storage::ValidityParams, NftOracleClient, NftOracleContract};
use soroban_sdk::{Address, Env};

/// Register an uninitialized oracle contract
pub fn create_nft_oracle_contract(e: &Env) -> Address {
    e.register_contract(None, NftOracleContract {})
}

/// Validity parameters loose enough to accept typical test price moves
pub fn default_validity_params() -> ValidityParams {
    ValidityParams {
        max_price_deviation: 1_0000000,
        max_price_deviation_with_time: 0_2000000,
        time_interval_with_price: 1800,
        minimum_update_time: 0,
    }
}

/// Register and initialize an oracle reporting prices in 7 decimals
pub fn create_nft_oracle<'a>(
    e: &Env,
    admin: &Address,
    price_feed_admin: &Address,
) -> (Address, NftOracleClient<'a>) {
    let address = create_nft_oracle_contract(e);
    let client = NftOracleClient::new(e, &address);
    client.initialize(admin, price_feed_admin, &7, &default_validity_params());
    (address, client)
}

#[cfg(test)]
pub(crate) fn setup_oracle_storage(e: &Env) {
    use crate::storage;
    use soroban_sdk::testutils::Address as _;

    storage::set_admin(e, &Address::generate(e));
    storage::set_price_feed_admin(e, &Address::generate(e));
    storage::set_decimals(e, 7);
    storage::set_validity_params(e, &default_validity_params());
}
