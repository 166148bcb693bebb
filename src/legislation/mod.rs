//! # Legislation Module
//!
//! Protocol-agnostic core of the proxy: the cached upstream token, the
//! translation of REST query parameters into an upstream search, the
//! reshaping of upstream records into the public JSON records, and the
//! catalog of principal codes.

pub mod catalog;
pub mod mapper;
pub mod models;
pub mod query;
pub mod token_cache;

pub use models::*;
pub use token_cache::TokenCache;
