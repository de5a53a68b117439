#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod interceptor;

pub use interceptor::*;
