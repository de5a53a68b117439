#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod nft;
mod storage;

pub use nft::*;
