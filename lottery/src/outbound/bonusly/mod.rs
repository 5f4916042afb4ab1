//! Bonusly outbound adapter.
//!
//! A thin HTTP implementation of the `RewardsApi` port.

mod dto;
mod http_client;

pub use http_client::{BonuslyHttpClient, DEFAULT_API_BASE_URL};
