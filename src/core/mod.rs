//! Feed fetching, parsing and the product catalogue.

pub mod error;
pub mod feed;
pub mod http;
pub mod nbm;
pub mod products;
pub mod spc;
