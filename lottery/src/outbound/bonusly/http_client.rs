//! Reqwest-backed Bonusly adapter.
//!
//! This adapter owns transport details only: endpoint construction, bearer
//! authentication, HTTP error mapping, and decoding of the response envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{BonusDto, CreateBonusDto, EnvelopeDto, UserDto};
use crate::config::ApiToken;
use crate::domain::Colleague;
use crate::domain::ports::{Bonus, BonusRequest, RewardsApi, RewardsApiError};

/// Production Bonusly API root.
pub const DEFAULT_API_BASE_URL: &str = "https://bonus.ly/api/v1";

const DEFAULT_USER_AGENT: &str = "bonus-lottery/0.1";
const ROSTER_QUERY: [(&str, &str); 3] = [
    ("limit", "100"),
    ("include_archived", "false"),
    ("sort", "display_name"),
];
const CALLER_QUERY: [(&str, &str); 1] = [("show_financial_data", "true")];

/// Bonusly adapter issuing authenticated JSON requests against one API root.
pub struct BonuslyHttpClient {
    client: Client,
    base_url: Url,
    token: ApiToken,
}

impl BonuslyHttpClient {
    /// Build an adapter. `timeout` bounds each request when provided.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        token: ApiToken,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
            token,
        })
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(self.token.expose())
            .header(ACCEPT, "application/json")
    }

    async fn get<T>(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<T, RewardsApiError>
    where
        T: DeserializeOwned,
    {
        let url = endpoint(&self.base_url, segments)?;
        debug!(method = "GET", path = url.path(), "calling rewards API");
        let response = self
            .authorised(self.client.get(url))
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_envelope(response).await
    }

    async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, RewardsApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = endpoint(&self.base_url, segments)?;
        debug!(method = "POST", path = url.path(), "calling rewards API");
        let response = self
            .authorised(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_envelope(response).await
    }
}

#[async_trait]
impl RewardsApi for BonuslyHttpClient {
    async fn fetch_self(&self) -> Result<Colleague, RewardsApiError> {
        let user: UserDto = self.get(&["users", "me"], &CALLER_QUERY).await?;
        Ok(user.into())
    }

    async fn fetch_roster(&self) -> Result<Vec<Colleague>, RewardsApiError> {
        let users: Vec<UserDto> = self.get(&["users"], &ROSTER_QUERY).await?;
        Ok(users.into_iter().map(Colleague::from).collect())
    }

    async fn create_bonus(&self, request: &BonusRequest) -> Result<Bonus, RewardsApiError> {
        let body = CreateBonusDto {
            reason: &request.reason,
        };
        let bonus: BonusDto = self.post(&["bonuses"], &body).await?;
        Ok(bonus.into())
    }
}

fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, RewardsApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| RewardsApiError::rejected(format!("base URL {base_url} cannot have a path")))?
        .pop_if_empty()
        .extend(segments.iter().copied());
    Ok(url)
}

async fn read_envelope<T>(response: reqwest::Response) -> Result<T, RewardsApiError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    parse_envelope(body.as_ref())
}

fn parse_envelope<T>(body: &[u8]) -> Result<T, RewardsApiError>
where
    T: DeserializeOwned,
{
    let envelope: EnvelopeDto<T> = serde_json::from_slice(body).map_err(|error| {
        RewardsApiError::decode(format!("invalid Bonusly JSON payload: {error}"))
    })?;
    envelope.into_result()
}

fn map_transport_error(error: reqwest::Error) -> RewardsApiError {
    if error.is_timeout() {
        RewardsApiError::timeout(error.to_string())
    } else {
        RewardsApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RewardsApiError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RewardsApiError::unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => RewardsApiError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RewardsApiError::timeout(message)
        }
        _ if status.is_client_error() => RewardsApiError::rejected(message),
        _ => RewardsApiError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
