mod nft;
pub use nft::NftClient;

mod nft_oracle;
pub use nft_oracle::NftPriceClient;

mod interceptor;
pub use interceptor::InterceptorClient;
