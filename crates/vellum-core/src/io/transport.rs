// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether requests should be issued as cross-origin requests.
///
/// The loader never interprets this value; it is forwarded to the transport and
/// the image loader unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrossOriginPolicy {
    /// Plain same-origin request.
    #[default]
    SameOrigin,
    /// Anonymous cross-origin request.
    CrossOrigin,
}

/// The request method. Manifests and images are only ever read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// HTTP-style GET.
    #[default]
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
        }
    }
}

/// One fetch issued to a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The request method.
    pub method: Method,
    /// The address to fetch.
    pub url: String,
    /// Cross-origin policy forwarded from the loader request.
    pub cross_origin: CrossOriginPolicy,
    /// MIME type the response should be interpreted as, regardless of what the server says.
    pub mime_override: Option<String>,
}

impl FetchRequest {
    /// Creates a GET request for `url`.
    pub fn get(url: impl Into<String>, cross_origin: CrossOriginPolicy) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            cross_origin,
            mime_override: None,
        }
    }

    /// Forces the response MIME type.
    pub fn with_mime_override(mut self, mime: impl Into<String>) -> Self {
        self.mime_override = Some(mime.into());
        self
    }
}

/// The terminal state of a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP-style numeric status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Creates a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only `200` counts as success. Other 2xx codes are not accepted.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Interprets the body as UTF-8 text.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }
}

/// Transport-level failures, i.e. the request never produced a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The address could not be interpreted by this transport.
    InvalidUrl(String),
    /// The underlying connection or file read failed.
    Io {
        /// The address being fetched.
        url: String,
        /// Description of the failure.
        details: String,
    },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidUrl(url) => write!(f, "Invalid URL '{url}'"),
            TransportError::Io { url, details } => {
                write!(f, "Failed to fetch '{url}': {details}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Performs one request and reports its terminal status exactly once.
///
/// Redirects, retries and timeouts are the transport's business; the loader
/// awaits the returned future and never aborts it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues `request` and resolves once the response is complete.
    ///
    /// Non-success statuses are *not* errors at this level: they are returned as
    /// a [`FetchResponse`] so the caller can apply its own success policy.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, TransportError>;

    /// Returns `true` when responses come from an HTTP origin, where the status
    /// code is meaningful. Local transports (files, bundles) return `false`.
    fn is_network_origin(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_200_is_ok() {
        assert!(FetchResponse::new(200, "").is_ok());
        assert!(!FetchResponse::new(204, "").is_ok());
        assert!(!FetchResponse::new(404, "").is_ok());
        assert!(!FetchResponse::new(0, "").is_ok());
    }

    #[test]
    fn text_rejects_invalid_utf8() {
        assert_eq!(FetchResponse::new(200, "{}").text(), Ok("{}"));
        assert!(FetchResponse::new(200, vec![0xff, 0xfe]).text().is_err());
    }

    #[test]
    fn get_request_builder() {
        let request = FetchRequest::get("a/b.json", CrossOriginPolicy::CrossOrigin)
            .with_mime_override("application/json");
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "a/b.json");
        assert_eq!(request.mime_override.as_deref(), Some("application/json"));
        assert_eq!(request.method.to_string(), "GET");
    }
}
