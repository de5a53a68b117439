use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
/// Error codes for the pool contract. Common errors are codes that match up with the built-in
/// contracts error reporting. Pool specific errors start at 1200.
pub enum PoolError {
    // Common Errors
    InternalError = 1,
    AlreadyInitializedError = 3,

    UnauthorizedError = 4,

    NegativeAmountError = 8,
    BalanceError = 10,
    OverflowError = 12,

    // Pool Request Errors (start at 1200)
    BadRequest = 1200,
    InvalidPoolInitArgs = 1201,
    InvalidReserveConfig = 1202,
    InvalidNftConfig = 1203,
    InvalidAmount = 1204,

    // Pool State Errors
    PoolPaused = 1210,
    ReserveInactive = 1211,
    ReserveFrozen = 1212,
    BorrowingNotEnabled = 1213,
    NftInactive = 1214,
    NftFrozen = 1215,
    InvalidLoanState = 1216,
    InconsistentParams = 1217,
    ReserveNotFound = 1218,
    NftNotFound = 1219,

    // Amount Errors
    InsufficientLiquidity = 1220,
    AmountLessThanRedeemThreshold = 1221,
    AmountGreaterThanMaxRepay = 1222,
    InvalidBidFine = 1223,
    AmountLessThanExtraDebt = 1224,
    InvalidScaledAmount = 1225,

    // Collateral Errors
    NftTokenIdExceedMax = 1230,
    NftSupplyExceedMax = 1231,
    NftNotOwned = 1232,
    NftNotUsedAsCollateral = 1233,
    CollateralCannotCoverBorrow = 1234,
    CollateralBalanceZero = 1235,

    // Health Factor Errors
    InvalidHf = 1240,
    BorrowNotExceedLiquidationThreshold = 1241,

    // Auction Errors
    BidPriceLessThanLiquidationPrice = 1250,
    BidPriceLessThanBorrow = 1251,
    BidPriceLessThanHighestPrice = 1252,
    AuctionDurationEnded = 1253,
    RedeemDurationEnded = 1254,
    AuctionDurationNotEnded = 1255,

    // Oracle Errors
    StalePrice = 1260,
    InvalidPrice = 1261,

    // Interceptor Errors
    InterceptorNotApproved = 1270,
    InterceptorRejected = 1271,
}
