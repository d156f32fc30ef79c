//! Search errors and translation of failed provider responses

use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use std::sync::LazyLock;
use thiserror::Error;

static JSON_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/+]json($|;)").expect("valid content type regex"));

/// Errors that can occur while running a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// Connection, timeout or body read failure from the transport
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Field-level error reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpErrorItem {
    pub code: String,
    pub field: String,
    pub message: String,
    pub resource: String,
}

/// A non-2xx provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub request_url: Url,
    pub status_code: u16,
    pub message: String,
    pub errors: Vec<HttpErrorItem>,
}

#[derive(Deserialize)]
struct HttpErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<HttpErrorItem>,
}

impl HttpError {
    /// 422 is the provider's answer to a malformed search query
    pub fn is_invalid_query(&self) -> bool {
        self.status_code == StatusCode::UNPROCESSABLE_ENTITY.as_u16()
    }

    /// The `q` parameter of the failed request, trimmed
    pub fn query(&self) -> String {
        self.request_url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Build from the parts of a failed response. Bodies are only parsed
    /// when the content type is JSON.
    pub fn from_parts(
        request_url: Url,
        status: StatusCode,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<Self, SearchError> {
        let mut error = HttpError {
            request_url,
            status_code: status.as_u16(),
            message: String::new(),
            errors: Vec::new(),
        };

        if !is_json(content_type) {
            error.message = status_line(status);
            return Ok(error);
        }

        let parsed: HttpErrorBody = serde_json::from_slice(body)?;
        error.message = parsed.message;
        error.errors = parsed.errors;
        Ok(error)
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_invalid_query() {
            return write!(
                f,
                "HTTP {}: {} ({})",
                self.status_code, self.message, self.request_url
            );
        }
        let detail = self
            .errors
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or(self.message.as_str());
        write!(f, "Invalid search query {:?}.\n{}", self.query(), detail)
    }
}

impl std::error::Error for HttpError {}

/// `"503 Service Unavailable"`
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Convert a failed response into a [`SearchError`].
pub async fn translate_error(response: Response) -> SearchError {
    let request_url = response.url().clone();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let body = if is_json(content_type.as_deref()) {
        match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(e) => return SearchError::Transport(e),
        }
    } else {
        Vec::new()
    };

    match HttpError::from_parts(request_url, status, content_type.as_deref(), &body) {
        Ok(e) => e.into(),
        Err(e) => e,
    }
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| JSON_TYPE_RE.is_match(ct))
}
