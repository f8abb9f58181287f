// src/discord/client.rs
//! Discord REST API client authenticated as a bot.

use super::{MessagePayload, MessageTransport, PostedMessage};
use crate::api::client::{extract_response_text, normalize_base_url, ApiResponse};
use crate::api::parser::parse_api_response;
use crate::constants::{DISCORD_API_BASE_URL, THREAD_AUTO_ARCHIVE_MINUTES, THREAD_NAME_MAX_CHARS};
use crate::discord::embeds::clip;
use crate::error::{AppError, RemoteService};
use crate::types::{ApiToken, ChannelId, GuildId, MessageId};
use reqwest::{header, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Used when a 429 carries no readable delay.
const FALLBACK_RETRY_AFTER: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct DiscordHttpClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChannelResponse {
    #[serde(default)]
    guild_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: MessageId,
    channel_id: ChannelId,
}

#[derive(Debug, Deserialize)]
struct ThreadResponse {
    id: ChannelId,
}

#[derive(Debug, Deserialize)]
struct RateLimitBody {
    retry_after: f64,
}

#[derive(Debug, Serialize)]
struct StartThreadRequest<'a> {
    name: &'a str,
    auto_archive_duration: u32,
}

impl DiscordHttpClient {
    pub fn new(token: &ApiToken) -> Result<Self, AppError> {
        Self::with_base_url(token, DISCORD_API_BASE_URL)
    }

    pub fn with_base_url(token: &ApiToken, base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(&base_url.into())?,
        })
    }

    fn create_headers(token: &ApiToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bot {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid Discord token format: {}", e))
            })?,
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!(
                "DiscordBot (https://github.com/neos2discord, ",
                env!("CARGO_PKG_VERSION"),
                ")"
            )),
        );

        Ok(headers)
    }

    async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    async fn post<T: Serialize + ?Sized>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }

    /// Rate limits become [`AppError::RateLimited`]; everything else goes
    /// through the shared parser.
    async fn read<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let header_delay = retry_after_header(&response);
        let result = extract_response_text(response).await?;
        if result.status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimited {
                retry_after: rate_limit_delay(&result, header_delay),
            });
        }
        parse_api_response(result, RemoteService::Discord)
    }
}

#[async_trait::async_trait]
impl MessageTransport for DiscordHttpClient {
    async fn resolve_channel(
        &self,
        guild_id: &GuildId,
        channel_id: &ChannelId,
    ) -> Result<(), AppError> {
        let not_found = || AppError::ChannelNotFound {
            guild_id: guild_id.to_string(),
            channel_id: channel_id.to_string(),
        };

        let response = self.get(&format!("channels/{}", channel_id)).await?;
        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN
        ) {
            return Err(not_found());
        }

        let channel: ChannelResponse = Self::read(response).await?;
        match channel.guild_id {
            Some(owner) if owner == guild_id.as_str() => Ok(()),
            _ => Err(not_found()),
        }
    }

    async fn send_message(
        &self,
        channel_id: &ChannelId,
        payload: &MessagePayload,
    ) -> Result<PostedMessage, AppError> {
        let response = self
            .post(&format!("channels/{}/messages", channel_id), payload)
            .await?;
        let message: MessageResponse = Self::read(response).await?;
        Ok(PostedMessage {
            id: message.id,
            channel_id: message.channel_id,
        })
    }

    async fn start_thread(
        &self,
        message: &PostedMessage,
        name: &str,
    ) -> Result<ChannelId, AppError> {
        let name = clip(name, THREAD_NAME_MAX_CHARS);
        let request = StartThreadRequest {
            name: &name,
            auto_archive_duration: THREAD_AUTO_ARCHIVE_MINUTES,
        };
        let response = self
            .post(
                &format!("channels/{}/messages/{}/threads", message.channel_id, message.id),
                &request,
            )
            .await?;
        let thread: ThreadResponse = Self::read(response).await?;
        Ok(thread.id)
    }
}

fn retry_after_header(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<f64>().ok())
        .and_then(seconds_to_duration)
}

/// Discord reports `retry_after` in (fractional) seconds in the JSON body.
fn rate_limit_delay(result: &ApiResponse<String>, header_delay: Option<Duration>) -> Duration {
    serde_json::from_str::<RateLimitBody>(&result.data)
        .ok()
        .and_then(|body| seconds_to_duration(body.retry_after))
        .or(header_delay)
        .unwrap_or(FALLBACK_RETRY_AFTER)
}

/// Millisecond precision, which is what Discord reports.
fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    let millis = (seconds * 1000.0).round();
    if millis.is_finite() && millis > 0.0 && millis < u64::MAX as f64 {
        Some(Duration::from_millis(millis as u64))
    } else {
        None
    }
}
