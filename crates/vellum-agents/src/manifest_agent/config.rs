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

use serde::Deserialize;
use vellum_core::io::{is_http_origin, FetchResponse, Transport};

/// Tunables of a [`ManifestLoader`](super::ManifestLoader).
///
/// Every field has a default, so a configuration file only needs to list what
/// it changes:
///
/// ```
/// use vellum_agents::manifest_agent::LoaderConfig;
///
/// let config = LoaderConfig::from_ron("(serving_origin: Some(\"https://cdn.example\"))").unwrap();
/// assert!(config.treat_non_http_origin_as_success);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Accept any status when the serving origin is not HTTP (local files, app bundles).
    pub treat_non_http_origin_as_success: bool,
    /// The origin manifests are served from. When unset, the transport decides
    /// through [`Transport::is_network_origin`].
    pub serving_origin: Option<String>,
    /// MIME type forced on manifest responses.
    pub manifest_mime_type: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            treat_non_http_origin_as_success: true,
            serving_origin: None,
            manifest_mime_type: "application/json".to_owned(),
        }
    }
}

impl LoaderConfig {
    /// Reads a configuration written in RON.
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Decides whether a manifest response counts as a successful fetch.
    ///
    /// `200` always succeeds. Any other status succeeds only when
    /// [`Self::treat_non_http_origin_as_success`] is set and the serving origin
    /// is not an HTTP origin.
    pub fn accepts(&self, transport: &dyn Transport, response: &FetchResponse) -> bool {
        if response.is_ok() {
            return true;
        }
        self.treat_non_http_origin_as_success && !self.serves_over_http(transport)
    }

    /// Whether manifests come from an HTTP origin: `serving_origin` when set,
    /// otherwise whatever the transport reports.
    pub fn serves_over_http(&self, transport: &dyn Transport) -> bool {
        match &self.serving_origin {
            Some(origin) => is_http_origin(origin),
            None => transport.is_network_origin(),
        }
    }
}
