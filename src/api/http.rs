//! reqwest implementation of [`StoryApi`]
//!
//! Talks to the Hack or Snooze v3 REST API. HTTP failures are mapped onto
//! the client's error taxonomy so callers can report them by category.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{LoggedIn, NewStory, Story, StoryApi, User};
use crate::config::ApiConfig;
use crate::error::{Result, SnoozeError};
use crate::session::Session;

/// HTTP client for the Hack or Snooze API
///
/// # Examples
///
/// ```
/// use snooze::api::HttpStoryApi;
/// use snooze::config::ApiConfig;
///
/// let api = HttpStoryApi::new(&ApiConfig::default());
/// assert!(api.is_ok());
/// ```
pub struct HttpStoryApi {
    client: Client,
    base: Url,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupFields<'a> {
    name: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct UserEnvelope<T> {
    user: T,
}

#[derive(Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct NewStoryBody<'a> {
    token: &'a str,
    story: &'a NewStory,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Deserialize)]
struct StoriesResponse {
    stories: Vec<Story>,
}

#[derive(Deserialize)]
struct StoryResponse {
    story: Story,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpStoryApi {
    /// Create a client for the configured API
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for an unusable base URL, or an error if the
    /// HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            SnoozeError::Config(format!("Invalid API base URL {}: {}", config.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(SnoozeError::Config(format!(
                "API base URL cannot carry paths: {}",
                config.base_url
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SnoozeError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("Initialized Hack or Snooze client: base={}", base);

        Ok(Self { client, base })
    }

    /// Base URL requests are built from
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SnoozeError::Config(format!("API base URL cannot carry paths: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<Response> {
        tracing::debug!("API request: {}", what);
        let response = request
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("API request failed ({}): {}", what, e);
                SnoozeError::Http(e)
            })
            .with_context(|| format!("{} failed", what))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        tracing::warn!("API returned {} for {}: {}", status, what, detail);
        Err(status_error(status, what, &detail).into())
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let text = response
            .text()
            .await
            .map_err(SnoozeError::Http)
            .with_context(|| format!("Failed to read {} response", what))?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Unexpected {} response: {}", what, e);
            SnoozeError::Serialization(e).into()
        })
    }
}

/// Pull a readable message out of an API error body
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed
            .error
            .message
            .or(parsed.error.title)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.trim().to_string(),
    }
}

fn status_error(status: StatusCode, what: &str, detail: &str) -> SnoozeError {
    let message = if detail.is_empty() {
        format!("{} ({})", what, status)
    } else {
        format!("{}: {}", what, detail)
    };
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SnoozeError::Authentication(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            SnoozeError::Validation(message)
        }
        StatusCode::NOT_FOUND => SnoozeError::NotFound(message),
        _ => SnoozeError::Network(message),
    }
}

#[async_trait]
impl StoryApi for HttpStoryApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoggedIn> {
        let url = self.endpoint(&["login"])?;
        let body = UserEnvelope {
            user: Credentials { username, password },
        };
        let response = self.send(self.client.post(url).json(&body), "login").await?;
        let auth: AuthResponse = Self::decode(response, "login").await?;
        tracing::info!("Logged in as {}", auth.user.username);
        Ok(LoggedIn {
            session: Session::new(auth.token, auth.user.username.clone()),
            user: auth.user,
        })
    }

    async fn create_user(&self, username: &str, password: &str, name: &str) -> Result<LoggedIn> {
        let url = self.endpoint(&["signup"])?;
        let body = UserEnvelope {
            user: SignupFields {
                name,
                username,
                password,
            },
        };
        let response = self.send(self.client.post(url).json(&body), "signup").await?;
        let auth: AuthResponse = Self::decode(response, "signup").await?;
        tracing::info!("Created account {}", auth.user.username);
        Ok(LoggedIn {
            session: Session::new(auth.token, auth.user.username.clone()),
            user: auth.user,
        })
    }

    async fn get_logged_in_user(&self, session: &Session) -> Result<Option<User>> {
        if session.token.is_empty() || session.username.is_empty() {
            return Ok(None);
        }
        let url = self.endpoint(&["users", &session.username])?;
        let request = self
            .client
            .get(url)
            .query(&[("token", session.token.as_str())]);

        match self.send(request, "fetch user").await {
            Ok(response) => {
                let body: UserResponse = Self::decode(response, "fetch user").await?;
                Ok(Some(body.user))
            }
            Err(e) => match e.downcast_ref::<SnoozeError>() {
                Some(SnoozeError::Authentication(_)) | Some(SnoozeError::NotFound(_)) => {
                    tracing::info!("Stored session for {} is no longer valid", session.username);
                    Ok(None)
                }
                _ => Err(e),
            },
        }
    }

    async fn get_stories(&self) -> Result<Vec<Story>> {
        let url = self.endpoint(&["stories"])?;
        let response = self.send(self.client.get(url), "fetch stories").await?;
        let body: StoriesResponse = Self::decode(response, "fetch stories").await?;
        tracing::debug!("Fetched {} stories", body.stories.len());
        Ok(body.stories)
    }

    async fn add_story(&self, session: &Session, story: &NewStory) -> Result<Story> {
        let url = self.endpoint(&["stories"])?;
        let body = NewStoryBody {
            token: &session.token,
            story,
        };
        let response = self
            .send(self.client.post(url).json(&body), "add story")
            .await?;
        let body: StoryResponse = Self::decode(response, "add story").await?;
        Ok(body.story)
    }

    async fn delete_story(&self, session: &Session, story_id: &str) -> Result<()> {
        let url = self.endpoint(&["stories", story_id])?;
        let body = TokenBody {
            token: &session.token,
        };
        self.send(self.client.delete(url).json(&body), "delete story")
            .await?;
        Ok(())
    }

    async fn favorite_story(&self, session: &Session, story_id: &str) -> Result<()> {
        let url = self.endpoint(&["users", &session.username, "favorites", story_id])?;
        let body = TokenBody {
            token: &session.token,
        };
        self.send(self.client.post(url).json(&body), "favorite story")
            .await?;
        Ok(())
    }

    async fn unfavorite_story(&self, session: &Session, story_id: &str) -> Result<()> {
        let url = self.endpoint(&["users", &session.username, "favorites", story_id])?;
        let body = TokenBody {
            token: &session.token,
        };
        self.send(self.client.delete(url).json(&body), "unfavorite story")
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{classify, ErrorKind};

    fn api(base: &str) -> HttpStoryApi {
        let config = ApiConfig {
            base_url: base.to_string(),
            ..ApiConfig::default()
        };
        HttpStoryApi::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = api("http://localhost:5000");
        let url = api.endpoint(&["users", "alice", "favorites", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/users/alice/favorites/abc");
    }

    #[test]
    fn test_endpoint_with_trailing_slash_and_prefix() {
        let api = api("http://localhost:5000/v3/");
        let url = api.endpoint(&["stories"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/v3/stories");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let api = api("http://localhost:5000");
        let url = api.endpoint(&["stories", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/stories/a%2Fb");
    }

    #[test]
    fn test_new_rejects_invalid_base() {
        let config = ApiConfig {
            base_url: "::nope".to_string(),
            ..ApiConfig::default()
        };
        assert!(HttpStoryApi::new(&config).is_err());
    }

    #[test]
    fn test_error_detail_reads_api_message() {
        let body = r#"{"error":{"status":401,"title":"Unauthorized","message":"Invalid password"}}"#;
        assert_eq!(error_detail(body), "Invalid password");
    }

    #[test]
    fn test_error_detail_falls_back_to_title_then_body() {
        let body = r#"{"error":{"title":"Conflict"}}"#;
        assert_eq!(error_detail(body), "Conflict");
        assert_eq!(error_detail("  gateway down "), "gateway down");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (StatusCode::UNAUTHORIZED, ErrorKind::Authentication),
            (StatusCode::FORBIDDEN, ErrorKind::Authentication),
            (StatusCode::BAD_REQUEST, ErrorKind::Validation),
            (StatusCode::CONFLICT, ErrorKind::Validation),
            (StatusCode::NOT_FOUND, ErrorKind::NotFound),
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Network),
            (StatusCode::BAD_GATEWAY, ErrorKind::Network),
        ];
        for (status, kind) in cases {
            let err: anyhow::Error = status_error(status, "login", "").into();
            assert_eq!(classify(&err), kind, "status {}", status);
        }
    }
}
