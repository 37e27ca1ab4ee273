use reqwest::{header, Client, Method, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

use crate::error::ApiError;
use crate::storage::{Storage, AUTH_TOKEN_KEY};

/// Where an expired session is sent.
pub const LOGIN_PATH: &str = "/login";

/// Thin wrapper over [`reqwest::Client`] for the stocks backend.
///
/// Every request carries `Authorization: Bearer <token>` when a token is
/// stored under [`AUTH_TOKEN_KEY`]. A `401` clears that token and surfaces as
/// [`ApiError::Unauthorized`]; any other failure leaves it alone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    storage: Storage,
}

impl ApiClient {
    pub fn new(base_url: &str, storage: Storage, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|_| ApiError::BaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(base_url.to_string()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            storage,
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Store a session token; every following request is authenticated with it.
    pub async fn login(&self, token: &str) -> Result<(), ApiError> {
        self.storage.set(AUTH_TOKEN_KEY, token).await?;
        Ok(())
    }

    /// Forget the session token. Returns whether one was stored.
    pub async fn logout(&self) -> Result<bool, ApiError> {
        Ok(self.storage.remove(AUTH_TOKEN_KEY).await?)
    }

    /// Base URL with `segments` appended, each percent-encoded on its own.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get(
        &self,
        segments: &[&str],
        query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        self.send(Method::GET, segments, query).await
    }

    pub async fn post(&self, segments: &[&str]) -> Result<Value, ApiError> {
        self.send(Method::POST, segments, &[]).await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<Value, ApiError> {
        self.send(Method::DELETE, segments, &[]).await
    }

    /// Execute one request and hand back its JSON body (`null` when empty).
    pub async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(segments)?;
        log::debug!("{method} {url} {query:?}");

        let mut request = self.http.request(method, url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.token().await {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => {
                log::warn!("{url} answered 401; clearing the stored session");
                if let Err(e) = self.storage.remove(AUTH_TOKEN_KEY).await {
                    log::error!("failed to clear the stored session: {e}");
                }
                Err(ApiError::Unauthorized {
                    redirect: LOGIN_PATH,
                })
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(url.path().to_string())),
            _ if !status.is_success() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                Err(ApiError::Status { status, body })
            }
            _ => {
                let bytes = response.bytes().await?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Value::Null);
                }
                Ok(serde_json::from_slice(&bytes)?)
            }
        }
    }

    // an unreadable store means an anonymous request, not a failed one
    async fn token(&self) -> Option<String> {
        match self.storage.get(AUTH_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("could not read session token: {e}");
                None
            }
        }
    }
}
