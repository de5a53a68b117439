use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::test_fixture::{TestFixture, TokenIndex, SCALAR_7, SCALAR_9};

/// Create a test fixture with both reserves and NFT collections registered and
/// frodo (users[0]) supplying 100k STABLE and 50 wETH of liquidity
pub fn create_fixture_with_data<'a>() -> TestFixture<'a> {
    let mut fixture = TestFixture::create();
    fixture.create_default_markets();

    let frodo = Address::generate(&fixture.env);
    fixture.users.push(frodo.clone());

    let stable = &fixture.tokens[TokenIndex::STABLE];
    let weth = &fixture.tokens[TokenIndex::WETH];
    stable.mint(&frodo, &(100_000 * SCALAR_7));
    weth.mint(&frodo, &(50 * SCALAR_9));
    fixture.pool.deposit(
        &frodo,
        &stable.address,
        &(100_000 * SCALAR_7),
        &frodo,
        &0,
    );
    fixture
        .pool
        .deposit(&frodo, &weth.address, &(50 * SCALAR_9), &frodo, &0);

    fixture.jump(60);
    fixture
}
