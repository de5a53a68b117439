use soroban_sdk::{contractclient, Address, Env};

/// The read interface of the NFT price oracle
#[allow(dead_code)]
#[contractclient(name = "NftPriceClient")]
pub trait NftPrice {
    /// Fetch the number of decimals prices are reported with
    fn decimals(e: Env) -> u32;

    /// Fetch the latest price for a collection
    fn get_asset_price(e: Env, asset: Address) -> i128;

    /// Fetch the time weighted average price for a collection over the trailing `interval` seconds
    fn get_twap_price(e: Env, asset: Address, interval: u64) -> i128;
}
