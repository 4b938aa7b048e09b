//! Marketplace endpoints
//!
//! Concrete remote APIs the sync jobs talk to.

pub mod flipkart;
pub mod shopify;
