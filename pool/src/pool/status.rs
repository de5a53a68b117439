use crate::storage::{self, PauseData};
use soroban_sdk::Env;

/// Pause or unpause the pool. Unpausing adds the length of the pause to the cumulative
/// pause duration, which extends any auction running while the pool was paused.
///
/// Returns the updated pause data
pub fn execute_set_pool_pause(e: &Env, paused: bool) -> PauseData {
    let mut pause = storage::get_pause(e);
    if pause.paused == paused {
        return pause;
    }

    let now = e.ledger().timestamp();
    if paused {
        pause.start_time = now;
    } else {
        pause.duration += now - pause.start_time;
    }
    pause.paused = paused;
    storage::set_pause(e, &pause);
    pause
}

/// Fetch the start of the most recent pause and the cumulative duration of all completed pauses
pub fn get_paused_time(e: &Env) -> (u64, u64) {
    let pause = storage::get_pause(e);
    (pause.start_time, pause.duration)
}

/// The additional time granted to an auction started when the cumulative pause duration
/// was `bid_paused_time`
pub fn calc_auction_extension(pause: &PauseData, bid_paused_time: u64) -> u64 {
    pause.duration.saturating_sub(bid_paused_time)
}
