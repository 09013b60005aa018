//! Data layer module
//!
//! Holds all canonical state:
//! - Entity models
//! - The in-memory store and its query/mutation facade
//! - The seeded demo dataset

mod models;
mod seed;
mod store;

pub use models::*;
pub use seed::demo_store;
pub use store::{Outcome, Store};

#[cfg(test)]
mod store_test;
