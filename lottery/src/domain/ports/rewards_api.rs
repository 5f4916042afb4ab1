//! Driven port for the rewards API (Bonusly).
//!
//! The domain owns the colleague and bonus shapes so the monthly run stays
//! independent of the HTTP adapter.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Colleague;

/// Bonus transaction submitted for one winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusRequest {
    /// Free-text reason; the API derives amount and receiver from it.
    pub reason: String,
}

/// Bonus record echoed back by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bonus {
    /// Reason as stored by the API.
    pub reason: String,
}

define_port_error! {
    /// Errors surfaced while calling the rewards API.
    pub enum RewardsApiError {
        /// Network transport failed before receiving a response.
        Transport =>
            "rewards API transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout =>
            "rewards API timeout: {message}",
        /// The access token was missing, invalid or lacks permission.
        Unauthorized =>
            "rewards API rejected the access token: {message}",
        /// The API rate-limited the request.
        RateLimited =>
            "rewards API rate limited request: {message}",
        /// The API refused the request or reported `success: false`.
        Rejected =>
            "rewards API rejected request: {message}",
        /// The response body could not be decoded.
        Decode =>
            "rewards API response decode failed: {message}",
    }
}

/// Port for reading the roster and posting bonuses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardsApi: Send + Sync {
    /// Fetch the acting user's profile including the giving balance.
    async fn fetch_self(&self) -> Result<Colleague, RewardsApiError>;

    /// Fetch up to 100 active, non-archived accounts sorted by display name.
    async fn fetch_roster(&self) -> Result<Vec<Colleague>, RewardsApiError>;

    /// Submit one bonus transaction.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use bonus_lottery::domain::ports::{BonusRequest, RewardsApi};
    ///
    /// let bonus = api
    ///     .create_bonus(&BonusRequest {
    ///         reason: "+10 @ada omdat hij/zij de 1ste prijs won in de loterij! #winnaar"
    ///             .to_owned(),
    ///     })
    ///     .await?;
    /// assert!(bonus.reason.starts_with("+10 @ada"));
    /// ```
    async fn create_bonus(&self, request: &BonusRequest) -> Result<Bonus, RewardsApiError>;
}
