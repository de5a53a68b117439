use crate::storage;
use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, Address, Env, Symbol,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockNftError {
    AlreadyInitializedError = 3,
    NotMinted = 1500,
    AlreadyMinted = 1501,
    NotOwner = 1502,
}

/// A minimal non-fungible token collection for testing
#[contract]
pub struct MockNft;

pub trait MockNftTrait {
    /// Setup the collection
    ///
    /// ### Arguments
    /// * `admin` - The address allowed to mint
    fn initialize(e: Env, admin: Address);

    /// (Admin only) Mint `token_id` to `to`
    fn mint(e: Env, to: Address, token_id: u32);

    /// Fetch the owner of `token_id`
    ///
    /// ### Panics
    /// If the token has not been minted
    fn owner_of(e: Env, token_id: u32) -> Address;

    /// Fetch the number of minted tokens
    fn total_supply(e: Env) -> u32;

    /// Transfer `token_id` from `from` to `to`
    ///
    /// ### Panics
    /// If `from` does not own the token
    fn transfer(e: Env, from: Address, to: Address, token_id: u32);
}

#[contractimpl]
impl MockNftTrait for MockNft {
    fn initialize(e: Env, admin: Address) {
        if storage::has_admin(&e) {
            panic_with_error!(&e, MockNftError::AlreadyInitializedError);
        }
        storage::set_admin(&e, &admin);
    }

    fn mint(e: Env, to: Address, token_id: u32) {
        storage::get_admin(&e).require_auth();
        if storage::get_owner(&e, token_id).is_some() {
            panic_with_error!(&e, MockNftError::AlreadyMinted);
        }
        storage::set_owner(&e, token_id, &to);
        storage::set_total_supply(&e, storage::get_total_supply(&e) + 1);

        e.events().publish((Symbol::new(&e, "mint"), to), token_id);
    }

    fn owner_of(e: Env, token_id: u32) -> Address {
        match storage::get_owner(&e, token_id) {
            Some(owner) => owner,
            None => panic_with_error!(&e, MockNftError::NotMinted),
        }
    }

    fn total_supply(e: Env) -> u32 {
        storage::get_total_supply(&e)
    }

    fn transfer(e: Env, from: Address, to: Address, token_id: u32) {
        from.require_auth();
        if Self::owner_of(e.clone(), token_id) != from {
            panic_with_error!(&e, MockNftError::NotOwner);
        }
        storage::set_owner(&e, token_id, &to);

        e.events()
            .publish((Symbol::new(&e, "transfer"), from, to), token_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    #[test]
    fn test_mint_and_transfer() {
        let e = Env::default();
        e.mock_all_auths();
        let admin = Address::generate(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);

        let address = e.register_contract(None, MockNft {});
        let client = MockNftClient::new(&e, &address);
        client.initialize(&admin);
        client.mint(&samwise, &1);
        client.mint(&samwise, &2);
        assert_eq!(client.total_supply(), 2);
        assert_eq!(client.owner_of(&1), samwise);

        client.transfer(&samwise, &frodo, &1);
        assert_eq!(client.owner_of(&1), frodo);
        assert_eq!(client.owner_of(&2), samwise);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1502)")]
    fn test_transfer_not_owner() {
        let e = Env::default();
        e.mock_all_auths();
        let admin = Address::generate(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);

        let address = e.register_contract(None, MockNft {});
        let client = MockNftClient::new(&e, &address);
        client.initialize(&admin);
        client.mint(&samwise, &1);
        client.transfer(&frodo, &samwise, &1);
    }
}
