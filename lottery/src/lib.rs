//! Monthly giving-balance lottery for Bonusly.
//!
//! On the last day of the month the acting user's unspent giving balance is
//! split over randomly ordered colleagues and posted as bonuses.
//!
//! - [`domain`] holds the colleague model, run gate, award formatting and the
//!   [`domain::MonthlyLotteryService`].
//! - [`outbound`] implements the rewards API port over HTTP.
//! - [`config`] loads and validates `BONUSLY_*` settings.

pub mod config;
pub mod domain;
pub mod outbound;
