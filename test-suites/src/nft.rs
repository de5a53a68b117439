use mock_interceptor::{MockInterceptor, MockInterceptorClient};
use mock_nft::{MockNft, MockNftClient};
use soroban_sdk::{Address, Env};

pub use mock_nft::MockNftClient as NftClient;

pub fn create_nft<'a>(e: &Env, admin: &Address) -> (Address, MockNftClient<'a>) {
    let contract_id = e.register_contract(None, MockNft {});
    let client = MockNftClient::new(e, &contract_id);
    client.initialize(admin);
    (contract_id, client)
}

pub fn create_interceptor<'a>(e: &Env) -> (Address, MockInterceptorClient<'a>) {
    let contract_id = e.register_contract(None, MockInterceptor {});
    (contract_id.clone(), MockInterceptorClient::new(e, &contract_id))
}
