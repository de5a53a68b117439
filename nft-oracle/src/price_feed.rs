use cast::i128;
use soroban_sdk::{panic_with_error, Address, Env};

use crate::{
    errors::NftOracleError,
    storage::{self, FeedInfo, PriceData},
    validity,
};

/// Load the feed info for an asset
///
/// ### Panics
/// If the asset is not registered
pub fn load_feed(e: &Env, asset: &Address) -> FeedInfo {
    match storage::get_feed(e, asset) {
        Some(feed) => feed,
        None => panic_with_error!(e, NftOracleError::KeyNotExisted),
    }
}

/// Register a new asset with an empty price history
///
/// ### Panics
/// If the asset is already registered
pub fn execute_add_asset(e: &Env, asset: &Address) {
    if storage::get_feed(e, asset).is_some() {
        panic_with_error!(e, NftOracleError::KeyExisted);
    }
    storage::set_feed(
        e,
        asset,
        &FeedInfo {
            paused: false,
            len: 0,
        },
    );
    let mut assets = storage::get_assets(e);
    assets.push_back(asset.clone());
    storage::set_assets(e, &assets);
}

/// Deregister an asset. The last registered asset takes the removed asset's slot.
///
/// ### Panics
/// If the asset is not registered
pub fn execute_remove_asset(e: &Env, asset: &Address) {
    load_feed(e, asset);
    storage::del_feed(e, asset);

    let mut assets = storage::get_assets(e);
    if let Some(index) = assets.first_index_of(asset) {
        let last_index = assets.len() - 1;
        if index != last_index {
            let last = assets.get_unchecked(last_index);
            assets.set(index, last);
        }
        assets.pop_back();
    }
    storage::set_assets(e, &assets);
}

/// Pause or unpause price updates for an asset
///
/// ### Panics
/// If the asset is not registered
pub fn execute_set_pause(e: &Env, asset: &Address, paused: bool) {
    let mut feed = load_feed(e, asset);
    feed.paused = paused;
    storage::set_feed(e, asset, &feed);
}

/// Append a price observation to an asset's history
///
/// ### Panics
/// * If the asset is not registered or the feed is paused
/// * If the timestamp is not after the last stored timestamp
/// * If the price is not positive or fails the validity check
pub fn execute_set_asset_data(e: &Env, asset: &Address, price: i128, timestamp: u64, round_id: u64) {
    let mut feed = load_feed(e, asset);
    if feed.paused {
        panic_with_error!(e, NftOracleError::FeedPaused);
    }

    let last = get_latest(e, asset, &feed);
    if let Some(last) = &last {
        if timestamp <= last.timestamp {
            panic_with_error!(e, NftOracleError::IncorrectTimestamp);
        }
    }
    if price <= 0 {
        panic_with_error!(e, NftOracleError::PriceIsZero);
    }
    if let Some(last) = &last {
        let params = storage::get_validity_params(e);
        if !validity::is_valid_price(&params, last, price, timestamp) {
            panic_with_error!(e, NftOracleError::InvalidPriceData);
        }
    }

    storage::set_round(
        e,
        asset,
        feed.len,
        &PriceData {
            price,
            timestamp,
            round_id,
        },
    );
    feed.len += 1;
    storage::set_feed(e, asset, &feed);
}

/// Fetch the latest price observation for a feed, if any exists
pub fn get_latest(e: &Env, asset: &Address, feed: &FeedInfo) -> Option<PriceData> {
    if feed.len == 0 {
        return None;
    }
    Some(storage::get_round(e, asset, feed.len - 1))
}

/// Fetch the latest price observation for an asset
///
/// ### Panics
/// If the asset is not registered or has no price data
pub fn load_latest(e: &Env, asset: &Address) -> PriceData {
    let feed = load_feed(e, asset);
    match get_latest(e, asset, &feed) {
        Some(data) => data,
        None => panic_with_error!(e, NftOracleError::NoPriceData),
    }
}

/// Fetch the price observation `back` rounds before the latest one (0 is the latest)
///
/// ### Panics
/// If the asset is not registered or does not have enough history
pub fn load_previous(e: &Env, asset: &Address, back: u32) -> PriceData {
    let feed = load_feed(e, asset);
    if back >= feed.len {
        panic_with_error!(e, NftOracleError::NotEnoughHistory);
    }
    storage::get_round(e, asset, feed.len - back - 1)
}

/// Calculate the time weighted average price of an asset over the trailing `interval` seconds.
///
/// If the latest observation is older than the interval, or is the only observation, the latest
/// price is returned. If the history does not cover the full interval, the average is taken over
/// the covered time.
///
/// ### Panics
/// If the interval is zero, the asset is not registered or the asset has no price data
pub fn calc_twap_price(e: &Env, asset: &Address, interval: u64) -> i128 {
    if interval == 0 {
        panic_with_error!(e, NftOracleError::IntervalZero);
    }
    let feed = load_feed(e, asset);
    if feed.len == 0 {
        panic_with_error!(e, NftOracleError::NotEnoughHistory);
    }

    let now = e.ledger().timestamp();
    let base_time = now.saturating_sub(interval);
    let mut round = feed.len - 1;
    let latest = storage::get_round(e, asset, round);
    if latest.timestamp < base_time || round == 0 {
        return latest.price;
    }

    let mut cumulative_time = now.saturating_sub(latest.timestamp);
    let mut previous_time = latest.timestamp;
    let mut current_price = latest.price;
    let mut weighted_price = current_price * i128(cumulative_time);
    loop {
        if round == 0 {
            // history exhausted before covering the interval
            if cumulative_time == 0 {
                return current_price;
            }
            return weighted_price / i128(cumulative_time);
        }
        round -= 1;
        let data = storage::get_round(e, asset, round);
        current_price = data.price;
        if data.timestamp <= base_time {
            weighted_price += current_price * i128(previous_time - base_time);
            break;
        }
        let time_fraction = previous_time - data.timestamp;
        weighted_price += current_price * i128(time_fraction);
        cumulative_time += time_fraction;
        previous_time = data.timestamp;
    }
    weighted_price / i128(interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils;
    use soroban_sdk::testutils::{Address as _, Ledger, LedgerInfo};

    fn set_time(e: &Env, timestamp: u64) {
        e.ledger().set(LedgerInfo {
            timestamp,
            protocol_version: 20,
            sequence_number: 1234,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 3110400,
        });
    }

    #[test]
    fn test_twap_reference_case() {
        let e = Env::default();
        let t = 1_700_000_000;
        set_time(&e, t);

        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_asset_data(&e, &asset, 4_000_000_000_000_000, t + 15, 1);
            execute_set_asset_data(&e, &asset, 4_050_000_000_000_000, t + 30, 2);
            execute_set_asset_data(&e, &asset, 4_100_000_000_000_000, t + 45, 3);
        });

        set_time(&e, t + 60);
        e.as_contract(&oracle, || {
            assert_eq!(calc_twap_price(&e, &asset, 45), 4_050_000_000_000_000);
            assert_eq!(calc_twap_price(&e, &asset, 44), 4_051_136_363_636_363);
            // asking interval longer than the asset's history
            assert_eq!(calc_twap_price(&e, &asset, 46), 4_050_000_000_000_000);
        });
    }

    #[test]
    fn test_twap_stale_latest_price_returned() {
        let e = Env::default();
        let t = 1_700_000_000;
        set_time(&e, t);

        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_asset_data(&e, &asset, 100_0000000, t + 10, 1);
            execute_set_asset_data(&e, &asset, 105_0000000, t + 20, 2);
        });

        // latest update is 80 seconds old, older than the 60 second interval
        set_time(&e, t + 100);
        e.as_contract(&oracle, || {
            assert_eq!(calc_twap_price(&e, &asset, 60), 105_0000000);
        });
    }

    #[test]
    fn test_twap_single_entry() {
        let e = Env::default();
        let t = 1_700_000_000;
        set_time(&e, t);

        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_asset_data(&e, &asset, 100_0000000, t - 10, 1);
            assert_eq!(calc_twap_price(&e, &asset, 3600), 100_0000000);
        });
    }

    #[test]
    fn test_twap_weights_latest_price_to_now() {
        let e = Env::default();
        let t = 1_700_000_000;
        set_time(&e, t);

        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_asset_data(&e, &asset, 100_0000000, t, 1);
            execute_set_asset_data(&e, &asset, 110_0000000, t + 100, 2);
        });

        // window [t + 50, t + 200]: 50s at 100, 100s at 110
        set_time(&e, t + 200);
        e.as_contract(&oracle, || {
            assert_eq!(calc_twap_price(&e, &asset, 150), 106_6666666);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1422)")]
    fn test_twap_interval_zero() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_asset_data(&e, &asset, 100_0000000, 10, 1);
            calc_twap_price(&e, &asset, 0);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1421)")]
    fn test_twap_no_history() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            calc_twap_price(&e, &asset, 10);
        });
    }

    #[test]
    fn test_load_previous() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_asset_data(&e, &asset, 100_0000000, 10, 1);
            execute_set_asset_data(&e, &asset, 101_0000000, 20, 1);
            execute_set_asset_data(&e, &asset, 102_0000000, 30, 2);

            assert_eq!(load_previous(&e, &asset, 0).price, 102_0000000);
            assert_eq!(load_previous(&e, &asset, 1).price, 101_0000000);
            let oldest = load_previous(&e, &asset, 2);
            assert_eq!(oldest.price, 100_0000000);
            assert_eq!(oldest.timestamp, 10);
            assert_eq!(oldest.round_id, 1);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1421)")]
    fn test_load_previous_not_enough_history() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_asset_data(&e, &asset, 100_0000000, 10, 1);
            load_previous(&e, &asset, 1);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1410)")]
    fn test_set_asset_data_equal_timestamp() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_asset_data(&e, &asset, 100_0000000, 10, 1);
            execute_set_asset_data(&e, &asset, 100_0000000, 10, 2);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1400)")]
    fn test_set_asset_data_unregistered() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_set_asset_data(&e, &asset, 100_0000000, 10, 1);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1402)")]
    fn test_set_asset_data_paused() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_pause(&e, &asset, true);
            execute_set_asset_data(&e, &asset, 100_0000000, 10, 1);
        });
    }

    #[test]
    fn test_remove_asset_swaps_last() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset_0 = Address::generate(&e);
        let asset_1 = Address::generate(&e);
        let asset_2 = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset_0);
            execute_add_asset(&e, &asset_1);
            execute_add_asset(&e, &asset_2);

            execute_remove_asset(&e, &asset_0);
            let assets = storage::get_assets(&e);
            assert_eq!(assets.len(), 2);
            assert_eq!(assets.get_unchecked(0), asset_2);
            assert_eq!(assets.get_unchecked(1), asset_1);
            assert!(storage::get_feed(&e, &asset_0).is_none());

            execute_remove_asset(&e, &asset_1);
            execute_remove_asset(&e, &asset_2);
            assert_eq!(storage::get_assets(&e).len(), 0);
        });
    }

    #[test]
    fn test_readd_asset_resets_history() {
        let e = Env::default();
        let oracle = testutils::create_nft_oracle_contract(&e);
        let asset = Address::generate(&e);
        e.as_contract(&oracle, || {
            testutils::setup_oracle_storage(&e);
            execute_add_asset(&e, &asset);
            execute_set_asset_data(&e, &asset, 100_0000000, 10, 1);
            execute_remove_asset(&e, &asset);
            execute_add_asset(&e, &asset);

            let feed = load_feed(&e, &asset);
            assert_eq!(feed.len, 0);
            assert!(get_latest(&e, &asset, &feed).is_none());
            // a fresh history accepts any timestamp and price
            execute_set_asset_data(&e, &asset, 500_0000000, 5, 1);
            assert_eq!(load_latest(&e, &asset).price, 500_0000000);
        });
    }
}
