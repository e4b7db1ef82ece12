use crate::config::Config;
use crate::mcp::contracts::{PATH_CREATE, PATH_CREATE_TASK, PATH_DOWNLOAD, PATH_EDITOR, PATH_RESULT};
use crate::mcp::errors;
use reqwest::Method;
use serde_json::Value;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API_KEY environment variable is not set")]
    MissingCredential,
    #[error("HTTP request failed: {}", describe(.0))]
    Transport(#[source] reqwest::Error),
    #[error("API request failed: HTTP {0}")]
    Status(u16),
    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingCredential => errors::CONFIGURATION,
            ApiError::Transport(_) => errors::TRANSPORT,
            ApiError::Status(_) => errors::HTTP_STATUS,
            ApiError::Decode(_) => errors::DECODE_FAILED,
        }
    }

    /// The underlying failure, when there is one beyond this layer.
    pub fn cause(&self) -> Option<String> {
        match self {
            ApiError::Transport(err) => Some(describe(err)),
            ApiError::Decode(err) => Some(err.to_string()),
            ApiError::MissingCredential | ApiError::Status(_) => None,
        }
    }
}

/// Flattens an error and its sources into one line.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}

/// One outbound call. GET parameters go in the query string, POST parameters
/// in a url-encoded form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl RequestDescriptor {
    fn get(path: &'static str, key: &'static str, value: &str) -> Self {
        Self {
            method: Method::GET,
            path,
            params: vec![(key, value.to_string())],
        }
    }

    fn post(path: &'static str, key: &'static str, value: &str) -> Self {
        Self {
            method: Method::POST,
            path,
            params: vec![(key, value.to_string())],
        }
    }
}

pub struct ChatPptClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl ChatPptClient {
    /// Redirects are not followed: a 3xx is the answer to the one call made.
    pub fn new(config: Arc<Config>) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_http(config, http))
    }

    pub fn with_http(config: Arc<Config>, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn credential(&self) -> Option<&str> {
        self.config.api_key.as_deref()
    }

    /// `POST /apps/ppt-create`. The only call that checks the credential up
    /// front and rejects non-2xx responses.
    pub async fn create_ppt(&self, text: &str) -> Result<Value, ApiError> {
        if self.credential().is_none_or(str::is_empty) {
            return Err(ApiError::MissingCredential);
        }
        let response = self
            .send(RequestDescriptor::post(PATH_CREATE, "text", text))
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        decode(response).await
    }

    pub async fn query_result(&self, ppt_id: &str) -> Result<Value, ApiError> {
        let response = self
            .send(RequestDescriptor::get(PATH_RESULT, "id", ppt_id))
            .await?;
        decode(response).await
    }

    pub async fn create_task(&self, ppt_id: &str) -> Result<Value, ApiError> {
        let response = self
            .send(RequestDescriptor::post(PATH_CREATE_TASK, "id", ppt_id))
            .await?;
        decode(response).await
    }

    pub async fn download(&self, ppt_id: &str) -> Result<Value, ApiError> {
        let response = self
            .send(RequestDescriptor::get(PATH_DOWNLOAD, "id", ppt_id))
            .await?;
        decode(response).await
    }

    pub async fn editor(&self, ppt_id: &str) -> Result<Value, ApiError> {
        let response = self
            .send(RequestDescriptor::post(PATH_EDITOR, "id", ppt_id))
            .await?;
        decode(response).await
    }

    async fn send(&self, request: RequestDescriptor) -> Result<reqwest::Response, ApiError> {
        let url = self.config.endpoint(request.path);
        debug!(method = %request.method, %url, "calling remote api");

        let builder = self
            .http
            .request(request.method.clone(), &url)
            .bearer_auth(self.credential().unwrap_or_default());
        let builder = if request.method == Method::GET {
            builder.query(&request.params)
        } else {
            builder.form(&request.params)
        };

        builder.send().await.map_err(ApiError::Transport)
    }
}

async fn decode(response: reqwest::Response) -> Result<Value, ApiError> {
    let bytes = response.bytes().await.map_err(ApiError::Transport)?;
    serde_json::from_slice(&bytes).map_err(ApiError::Decode)
}
