//! Cube REST API client.
//!
//! Only the pre-aggregation refresh endpoint is used. The response status
//! is logged and returned but never treated as an error: callers decide
//! what a non-2xx answer means.
//!
//! Each request carries a fresh HS256 token signed with the API secret.
//! The secret itself never leaves the process.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::header::AUTHORIZATION;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::settings::CubeConfig;
use crate::error::Result;
use crate::port::outbound::cache::{CacheRefresher, RefreshRequest};

/// Lifetime of a signed request token.
const TOKEN_TTL_SECS: i64 = 300;

/// Claims of the token presented to Cube.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iat: i64,
    pub exp: i64,
}

/// Sign a short-lived HS256 token issued at `now` (unix seconds).
///
/// # Errors
/// Returns an error if encoding fails.
pub fn sign_token(secret: &str, now: i64) -> Result<String> {
    let claims = TokenClaims {
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// HTTP client for the Cube API.
pub struct CubeClient {
    http: HttpClient,
    refresh_url: String,
    api_secret: String,
}

impl CubeClient {
    /// Create a client from configuration.
    ///
    /// Falls back to a default `reqwest` client if the configured one
    /// cannot be built.
    #[must_use]
    pub fn from_config(config: &CubeConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            refresh_url: config.refresh_url(),
            api_secret: config.api_token.clone(),
        }
    }

    /// The endpoint refresh requests are posted to.
    #[must_use]
    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }
}

#[async_trait]
impl CacheRefresher for CubeClient {
    fn name(&self) -> &'static str {
        "cube"
    }

    async fn refresh(&self, request: &RefreshRequest) -> Result<u16> {
        let token = sign_token(&self.api_secret, Utc::now().timestamp())?;
        let response = self
            .http
            .post(&self.refresh_url)
            .header(AUTHORIZATION, token)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!(status, body = %body, "Cube refresh response");

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_uses_configured_endpoint() {
        let config = CubeConfig {
            base_url: "http://127.0.0.1:4000".into(),
            ..Default::default()
        };
        let client = CubeClient::from_config(&config);
        assert_eq!(
            client.refresh_url(),
            "http://127.0.0.1:4000/cubejs-api/v1/pre-aggregations/refresh"
        );
        assert_eq!(client.name(), "cube");
    }

    #[test]
    fn signed_token_verifies_with_secret_only() {
        use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

        let now = Utc::now().timestamp();
        let token = sign_token("s3cret", now).unwrap();
        assert!(!token.contains("s3cret"));

        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<TokenClaims>(
            &token,
            &DecodingKey::from_secret(b"s3cret"),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims.iat, now);
        assert_eq!(data.claims.exp, now + TOKEN_TTL_SECS);

        let wrong_key = DecodingKey::from_secret(b"other");
        assert!(decode::<TokenClaims>(&token, &wrong_key, &validation).is_err());
    }

    #[tokio::test]
    async fn refused_connection_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = CubeConfig {
            base_url: format!("http://{addr}"),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = CubeClient::from_config(&config);
        let result = client.refresh(&RefreshRequest::forced("Test")).await;
        assert!(result.is_err());
    }
}
