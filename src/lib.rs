#![forbid(unsafe_code)]

pub mod acquisition;
pub mod aggregation;
pub mod backend;
pub mod client;
pub mod config;
pub mod datamodel;
pub mod error;
pub mod http;
pub mod parsing;
pub mod query;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
