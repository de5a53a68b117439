#![cfg(test)]
use nft_lending_pool::{LoanState, PoolError};
use soroban_sdk::{testutils::Address as _, Address, Error};
use test_suites::{
    create_fixture_with_data,
    pool::default_nft_config,
    test_fixture::{NftIndex, TokenIndex, SCALAR_7},
};

#[test]
fn test_pause_blocks_user_actions() {
    let fixture = create_fixture_with_data();
    let frodo = fixture.users[0].clone();
    let stable = &fixture.tokens[TokenIndex::STABLE];
    let apes = &fixture.nfts[NftIndex::APES];

    let samwise = Address::generate(&fixture.env);
    fixture.mint_nft(NftIndex::APES, &samwise, 1);
    fixture.pool.borrow(
        &samwise,
        &stable.address,
        &(1_000 * SCALAR_7),
        &apes.address,
        &1,
        &samwise,
        &0,
    );

    let pause_start = fixture.env.ledger().timestamp();
    fixture.pool.set_pool_pause(&true);
    assert_eq!(fixture.pool.get_paused_time(), (pause_start, 0));

    fixture.mint_nft(NftIndex::APES, &samwise, 2);
    let result = fixture.pool.try_borrow(
        &samwise,
        &stable.address,
        &(1_000 * SCALAR_7),
        &apes.address,
        &2,
        &samwise,
        &0,
    );
    assert_eq!(
        result.err(),
        Some(Ok(Error::from_contract_error(PoolError::PoolPaused as u32)))
    );
    let result = fixture
        .pool
        .try_repay(&samwise, &apes.address, &1, &i128::MAX);
    assert_eq!(
        result.err(),
        Some(Ok(Error::from_contract_error(PoolError::PoolPaused as u32)))
    );
    let result = fixture
        .pool
        .try_withdraw(&frodo, &stable.address, &SCALAR_7, &frodo);
    assert_eq!(
        result.err(),
        Some(Ok(Error::from_contract_error(PoolError::PoolPaused as u32)))
    );

    // reads still work while paused
    let debt_data = fixture.pool.get_nft_debt_data(&apes.address, &1);
    assert_eq!(debt_data.total_debt, 1_000 * SCALAR_7);

    fixture.jump(60 * 60);
    fixture.pool.set_pool_pause(&false);
    assert_eq!(fixture.pool.get_paused_time(), (pause_start, 60 * 60));

    let (repaid, is_full) = fixture
        .pool
        .repay(&samwise, &apes.address, &1, &i128::MAX);
    assert!(is_full);
    assert!(repaid > 1_000 * SCALAR_7);
}

#[test]
fn test_pause_extends_auction() {
    let fixture = create_fixture_with_data();
    let frodo = fixture.users[0].clone();
    let stable = &fixture.tokens[TokenIndex::STABLE];
    let apes = &fixture.nfts[NftIndex::APES];
    stable.mint(&frodo, &(10_000 * SCALAR_7));

    let samwise = Address::generate(&fixture.env);
    fixture.mint_nft(NftIndex::APES, &samwise, 1);
    fixture.pool.borrow(
        &samwise,
        &stable.address,
        &(4_000 * SCALAR_7),
        &apes.address,
        &1,
        &samwise,
        &0,
    );
    fixture.jump(60 * 60);
    fixture.set_nft_price(NftIndex::APES, 4_500 * SCALAR_7);
    fixture
        .pool
        .auction(&frodo, &apes.address, &1, &(4_300 * SCALAR_7), &frodo);

    // the pool is paused for two hours during the auction
    fixture.jump(60 * 60);
    fixture.pool.set_pool_pause(&true);
    let result = fixture.pool.try_liquidate(&frodo, &apes.address, &1, &0);
    assert_eq!(
        result.err(),
        Some(Ok(Error::from_contract_error(PoolError::PoolPaused as u32)))
    );
    fixture.jump(2 * 60 * 60);
    fixture.pool.set_pool_pause(&false);

    // the auction end moves back by the length of the pause
    fixture.jump(default_nft_config().auction_duration - 60 * 60 - 1);
    let result = fixture.pool.try_liquidate(&frodo, &apes.address, &1, &0);
    assert_eq!(
        result.err(),
        Some(Ok(Error::from_contract_error(
            PoolError::AuctionDurationNotEnded as u32
        )))
    );

    fixture.jump(1);
    fixture.pool.liquidate(&frodo, &apes.address, &1, &0);
    assert_eq!(apes.owner_of(&1), frodo);
    assert_eq!(
        fixture.pool.get_loan(&1).unwrap().state,
        LoanState::Defaulted
    );
}
