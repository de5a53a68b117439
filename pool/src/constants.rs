/// Fixed-point scalar for 27 decimal numbers (ray)
pub const RAY: i128 = 1_000_000_000_000_000_000_000_000_000;

pub const HALF_RAY: i128 = RAY / 2;

/// Fixed-point scalar for 18 decimal numbers (wad)
pub const WAD: i128 = 1_000_000_000_000_000_000;

pub const HALF_WAD: i128 = WAD / 2;

/// The ratio between a ray and a wad
pub const WAD_RAY_RATIO: i128 = 1_000_000_000;

/// Fixed-point scalar for basis points (100% = 10000)
pub const PERCENTAGE_FACTOR: i128 = 1_0000;

pub const HALF_PERCENT: i128 = PERCENTAGE_FACTOR / 2;

/// One percent in basis points. The minimum increment between consecutive bids is this
/// share of the outstanding debt.
pub const ONE_PERCENT: i128 = 100;

/// The largest share of the outstanding debt, in basis points, that can be repaid by a redeem
pub const MAX_REDEEM_PERCENT: i128 = 9000;

/// Sentinel amount meaning "the full outstanding balance"
pub const MAX_AMOUNT: i128 = i128::MAX;

/// Seconds in a (non-leap) year
pub const SECONDS_PER_YEAR: u64 = 31536000;

/// The maximum age in seconds of a reserve price before it is considered stale
pub const MAX_PRICE_AGE: u64 = 24 * 60 * 60;

/// The maximum number of reserves a pool can list
pub const MAX_RESERVES: u32 = 32;
