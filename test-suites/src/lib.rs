pub mod assertions;
pub mod nft;
pub mod pool;
pub mod test_fixture;
pub mod token;

mod setup;
pub use setup::create_fixture_with_data;
