use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
/// Error codes for the NFT oracle contract. Common errors are codes that match up with the built-in
/// contracts error reporting. Oracle specific errors start at 1400.
pub enum NftOracleError {
    // Common Errors
    InternalError = 1,
    AlreadyInitializedError = 3,

    UnauthorizedError = 4,

    NegativeAmountError = 8,

    // Feed Registry Errors (start at 1400)
    KeyNotExisted = 1400,
    KeyExisted = 1401,
    FeedPaused = 1402,
    InvalidParams = 1403,

    // Price Update Errors
    IncorrectTimestamp = 1410,
    PriceIsZero = 1411,
    InvalidPriceData = 1412,

    // Price Query Errors
    NoPriceData = 1420,
    NotEnoughHistory = 1421,
    IntervalZero = 1422,
}
