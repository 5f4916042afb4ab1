//! DTOs for the Bonusly JSON API.
//!
//! Every response is wrapped as `{ "success": bool, "result": ... }`. Field
//! names are snake_case and unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{Bonus, RewardsApiError};
use crate::domain::{Colleague, ColleagueId};

#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto<T> {
    pub(super) success: bool,
    pub(super) result: Option<T>,
    pub(super) message: Option<String>,
}

impl<T> EnvelopeDto<T> {
    pub(super) fn into_result(self) -> Result<T, RewardsApiError> {
        if !self.success {
            let message = self
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| "response reported success=false".to_owned());
            return Err(RewardsApiError::rejected(message));
        }
        self.result
            .ok_or_else(|| RewardsApiError::decode("response envelope is missing `result`"))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: String,
    pub(super) display_name: String,
    pub(super) username: String,
    pub(super) email: String,
    pub(super) giving_balance: Option<u64>,
    pub(super) user_mode: String,
}

impl From<UserDto> for Colleague {
    fn from(value: UserDto) -> Self {
        Self {
            id: ColleagueId::new(value.id),
            display_name: value.display_name,
            username: value.username,
            email: value.email,
            giving_balance: value.giving_balance,
            user_mode: value.user_mode,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreateBonusDto<'a> {
    pub(super) reason: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct BonusDto {
    pub(super) reason: String,
}

impl From<BonusDto> for Bonus {
    fn from(value: BonusDto) -> Self {
        Self {
            reason: value.reason,
        }
    }
}
