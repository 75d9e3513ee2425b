use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use super::repository::{Persistence, SESSION_TOKEN_KEY};
use super::types::{Errors, Link};

/// Well known path for creating an account
pub const SIGNUP_PATH: &str = "/v1/signup";
/// Well known path for creating a session
pub const LOGIN_PATH: &str = "/v1/login";

// Header names are case insensitive, `HeaderName` wants them lowercase
const SESSION_TOKEN_HEADER: &str = "session-token";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API Error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API Error: unexpected body for status {status}: {source}")]
    Decode {
        status: u16,
        source: serde_json::Error,
    },
    #[error("API Error: status {0}")]
    Status(u16),
    #[error("API Error: invalid href: {0}")]
    Url(#[from] url::ParseError),
}

/// The outcome of a call that reached the server and returned a
/// well formed body
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Response<T> {
    Success(T),
    /// A 400 with a validation error body
    Invalid(Errors),
}

/// Talks to the hypermedia api. Every call follows a `Link`; relative
/// hrefs are resolved against the base url.
#[derive(Clone)]
pub struct Model {
    pub url: Url,
    client: reqwest::Client,
    repository: Arc<dyn Persistence>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model").field("url", &self.url.as_str()).finish()
    }
}

impl Model {
    pub fn new(url: Url, repository: Arc<dyn Persistence>) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
            repository,
        }
    }

    pub fn resolve(&self, link: &Link) -> Result<Url, ApiError> {
        match Url::parse(&link.href) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(self.url.join(&link.href)?),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, link: &Link) -> Result<Response<T>, ApiError> {
        log::trace!("GET {}", link.href);
        self.send::<(), T>(Method::GET, link, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        link: &Link,
        body: Option<&B>,
    ) -> Result<Response<T>, ApiError> {
        log::trace!("POST {}", link.href);
        self.send(Method::POST, link, body).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        link: &Link,
        body: &B,
    ) -> Result<Response<T>, ApiError> {
        log::trace!("PUT {}", link.href);
        self.send(Method::PUT, link, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, link: &Link) -> Result<Response<T>, ApiError> {
        log::trace!("DELETE {}", link.href);
        self.send::<(), T>(Method::DELETE, link, None).await
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let token = self
            .repository
            .get(SESSION_TOKEN_KEY)
            .and_then(|token| HeaderValue::from_str(&token).ok());
        if let Some(token) = token {
            headers.insert(SESSION_TOKEN_HEADER, token);
        }
        headers
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        link: &Link,
        body: Option<&B>,
    ) -> Result<Response<T>, ApiError> {
        let url = self.resolve(link)?;
        let mut request = self.client.request(method, url).headers(self.headers());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        decode(status, &bytes)
    }
}

fn decode<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<Response<T>, ApiError> {
    if status.is_success() {
        return serde_json::from_slice(bytes)
            .map(Response::Success)
            .map_err(|source| ApiError::Decode {
                status: status.as_u16(),
                source,
            });
    }
    if status == StatusCode::BAD_REQUEST {
        if let Ok(errors) = serde_json::from_slice::<Errors>(bytes) {
            return Ok(Response::Invalid(errors));
        }
    }
    Err(ApiError::Status(status.as_u16()))
}
