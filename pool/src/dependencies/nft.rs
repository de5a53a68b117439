use soroban_sdk::{contractclient, Address, Env};

/// The interface of an NFT collection accepted as collateral
#[allow(dead_code)]
#[contractclient(name = "NftClient")]
pub trait Nft {
    /// Fetch the owner of a token
    fn owner_of(e: Env, token_id: u32) -> Address;

    /// Fetch the number of tokens in the collection
    fn total_supply(e: Env) -> u32;

    /// Transfer a token. Requires authorization from `from`.
    fn transfer(e: Env, from: Address, to: Address, token_id: u32);
}
