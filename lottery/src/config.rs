//! Lottery configuration loaded via OrthoConfig.
//!
//! Raw settings come from `BONUSLY_*` environment variables or the matching
//! CLI flags. [`LotterySettings::resolve`] validates them once into a
//! [`LotteryConfig`] before any network call is made.
//!
//! OrthoConfig turns an environment value containing commas into a list, so
//! text settings that may contain commas accept both shapes.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use prize_allocation::{AllocationPolicy, PolicyParseError};
use serde::{Deserialize, Deserializer};
use url::Url;
use zeroize::Zeroizing;

use crate::domain::{DEFAULT_LOTTERY_NAME, LotteryRules, PreferredUsernames};
use crate::outbound::bonusly::DEFAULT_API_BASE_URL;

/// Raw configuration values for one lottery run.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BONUSLY")]
pub struct LotterySettings {
    /// Bonusly API access token.
    pub api_access_token: Option<String>,
    /// Comma-separated usernames singled out by the allocation policy.
    #[serde(default, deserialize_with = "comma_list")]
    pub preferred_users: Option<String>,
    /// Older name for `preferred_users`; both lists are merged.
    #[serde(default, deserialize_with = "comma_list")]
    pub losing_users: Option<String>,
    /// Allocation policy: `linear-decay` or `lottery`.
    pub policy: Option<String>,
    /// Override for the Bonusly API root.
    pub api_base_url: Option<String>,
    /// Lottery name used in award messages.
    #[serde(default, deserialize_with = "comma_text")]
    pub lottery_name: Option<String>,
    /// Per-request timeout in seconds. Zero disables the timeout.
    #[ortho_config(default = 0)]
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrList {
    Text(String),
    Number(u64),
    List(Vec<String>),
}

impl TextOrList {
    fn join(self, separator: &str) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
            Self::List(items) => items.join(separator),
        }
    }
}

fn comma_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrList>::deserialize(deserializer)?;
    Ok(value.map(|value| value.join(",")))
}

fn comma_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrList>::deserialize(deserializer)?;
    Ok(value.map(|value| value.join(", ")))
}

/// Errors raised while validating [`LotterySettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No usable access token was configured.
    #[error("BONUSLY_API_ACCESS_TOKEN must be set to a non-empty token")]
    MissingAccessToken,
    /// The policy name is not recognised.
    #[error(transparent)]
    InvalidPolicy(#[from] PolicyParseError),
    /// The API root is not an absolute HTTP(S) URL.
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Why it was refused.
        reason: String,
    },
}

/// Bonusly access token. Zeroized on drop and never printed.
#[derive(Clone)]
pub struct ApiToken(Zeroizing<String>);

impl ApiToken {
    /// Wrap a token, trimming surrounding whitespace. Blank input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Token text for the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct LotteryConfig {
    /// Credentials for the rewards API.
    pub token: ApiToken,
    /// Rewards API root.
    pub api_base_url: Url,
    /// Per-request timeout, if any.
    pub request_timeout: Option<Duration>,
    /// Allocation and messaging rules.
    pub rules: LotteryRules,
}

impl LotterySettings {
    /// Validate the raw settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the token is missing or blank, the policy
    /// is unknown, or the base URL is not an absolute HTTP(S) URL.
    pub fn resolve(&self) -> Result<LotteryConfig, ConfigError> {
        let token = self
            .api_access_token
            .as_deref()
            .and_then(ApiToken::new)
            .ok_or(ConfigError::MissingAccessToken)?;

        let policy = match self.policy.as_deref().map(str::trim) {
            None | Some("") => AllocationPolicy::default(),
            Some(raw) => raw.parse()?,
        };

        let lottery_name = self
            .lottery_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_LOTTERY_NAME)
            .to_owned();

        Ok(LotteryConfig {
            token,
            api_base_url: parse_base_url(self.api_base_url.as_deref())?,
            request_timeout: self
                .request_timeout_seconds
                .filter(|seconds| *seconds > 0)
                .map(Duration::from_secs),
            rules: LotteryRules {
                policy,
                preferred: self.preferred_usernames(),
                lottery_name,
            },
        })
    }

    fn preferred_usernames(&self) -> PreferredUsernames {
        [&self.preferred_users, &self.losing_users]
            .into_iter()
            .flatten()
            .flat_map(|raw| raw.split(','))
            .collect()
    }
}

fn parse_base_url(raw: Option<&str>) -> Result<Url, ConfigError> {
    let value = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: value.to_owned(),
        reason,
    };

    let url = Url::parse(value).map_err(|error| invalid(error.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_owned()));
    }
    Ok(url)
}
