//! `AuthProvider` obtaining tokens through a credential login.
//!
//! The login endpoint accepts `{ "username", "password" }` and returns the
//! session token in the `Authorization` response header rather than in the
//! body. Tokens are not cached: each call performs a fresh login.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chargepath_core::{AuthError, AuthProvider};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap};
use serde::Serialize;

use crate::http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError, RequestFailure, build_client};

/// Configuration for [`LoginAuthProvider`].
#[derive(Clone)]
pub struct LoginAuthConfig {
    /// Login endpoint receiving the `POST` request.
    pub login_url: String,
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Application credential sent as the login request's own
    /// `Authorization` header, when the service requires one.
    pub app_token: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl fmt::Debug for LoginAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginAuthConfig")
            .field("login_url", &self.login_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("app_token", &self.app_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl LoginAuthConfig {
    /// Create a configuration for the given endpoint and credentials.
    #[must_use]
    pub fn new(
        login_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            login_url: login_url.into(),
            username: username.into(),
            password: password.into(),
            app_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Send `app_token` as the login request's `Authorization` header.
    #[must_use]
    pub fn with_app_token(mut self, app_token: impl Into<String>) -> Self {
        self.app_token = Some(app_token.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Auth provider performing a credential login per token request.
#[derive(Debug, Clone)]
pub struct LoginAuthProvider {
    client: Client,
    config: LoginAuthConfig,
}

impl LoginAuthProvider {
    /// Create a provider with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(
        login_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ProviderBuildError> {
        Self::with_config(LoginAuthConfig::new(login_url, username, password))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: LoginAuthConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// The provider's configuration.
    #[must_use]
    pub const fn config(&self) -> &LoginAuthConfig {
        &self.config
    }

    async fn login(&self) -> Result<String, AuthError> {
        let url = self.config.login_url.as_str();
        let timeout = self.config.timeout;
        log::debug!("logging in at {url} as {}", self.config.username);

        let mut request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&LoginRequest {
                username: &self.config.username,
                password: &self.config.password,
            });
        if let Some(app_token) = &self.config.app_token {
            request = request.header(AUTHORIZATION, app_token.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|err| RequestFailure::classify(&err, url, timeout))?
            .error_for_status()
            .map_err(|err| RequestFailure::classify(&err, url, timeout))?;

        token_from_headers(response.headers()).ok_or_else(|| AuthError::MissingToken {
            url: url.to_owned(),
        })
    }
}

#[async_trait]
impl AuthProvider for LoginAuthProvider {
    async fn token(&self) -> Result<String, AuthError> {
        self.login().await
    }
}

/// Extract a non-blank `Authorization` header value.
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}
