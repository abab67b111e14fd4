// src/lib.rs
// Library surface of the relay, shared by the binary and the unit tests.

pub mod config;
pub mod countries;
pub mod driver;
pub mod error;
pub mod models;
pub mod push;
pub mod sources;

pub use crate::config::Config;
pub use crate::driver::{Driver, RunSummary};
pub use crate::models::{TrendBatch, TrendItem, TrendSource};
