//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod rewards_api;

#[cfg(test)]
pub use rewards_api::MockRewardsApi;
pub use rewards_api::{Bonus, BonusRequest, RewardsApi, RewardsApiError};
