//! Errors raised by the monthly lottery run.

use thiserror::Error;

use crate::domain::ports::RewardsApiError;

/// Failures that abort a run.
///
/// Awards already posted before a failure stay posted; there is no
/// compensating transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotteryError {
    /// The caller's profile could not be fetched.
    #[error("failed to fetch the caller profile")]
    FetchCaller(#[source] RewardsApiError),
    /// The roster could not be fetched.
    #[error("failed to fetch the roster")]
    FetchRoster(#[source] RewardsApiError),
    /// The caller's profile did not include a giving balance.
    #[error("caller profile does not include a giving balance")]
    MissingGivingBalance,
    /// Posting a bonus failed; later places were not awarded.
    #[error("failed to award place {place} to @{username}")]
    Award {
        /// Place of the winner whose bonus failed.
        place: usize,
        /// Username of that winner.
        username: String,
        /// Underlying port error.
        #[source]
        source: RewardsApiError,
    },
}
