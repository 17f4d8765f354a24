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
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use vellum_core::io::{is_http_origin, FetchRequest, FetchResponse, Transport, TransportError};

/// Serves requests from the local file system.
///
/// Relative addresses resolve against `root`; `file://` addresses and absolute
/// paths are used as they are. Missing files answer with status `404` rather
/// than an error, the same way an HTTP server would.
#[derive(Debug, Clone)]
pub struct FileTransport {
    root: PathBuf,
}

impl FileTransport {
    /// Creates a transport rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory relative addresses resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, url: &str) -> Result<PathBuf, TransportError> {
        if is_http_origin(url) {
            return Err(TransportError::InvalidUrl(url.to_owned()));
        }
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.root.join(path))
        }
    }
}

#[async_trait]
impl Transport for FileTransport {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, TransportError> {
        let path = self.resolve(&request.url)?;
        log::trace!("{} {}", request.method, path.display());

        match tokio::fs::read(&path).await {
            Ok(body) => Ok(FetchResponse::new(200, body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::new(404, Vec::new())),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                Ok(FetchResponse::new(403, Vec::new()))
            }
            Err(e) => Err(TransportError::Io {
                url: request.url.clone(),
                details: e.to_string(),
            }),
        }
    }

    fn is_network_origin(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::io::CrossOriginPolicy;

    fn get(url: &str) -> FetchRequest {
        FetchRequest::get(url, CrossOriginPolicy::SameOrigin)
    }

    #[tokio::test]
    async fn reads_relative_and_file_urls() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("assets")).expect("mkdir");
        std::fs::write(dir.path().join("assets/a.json"), b"{}").expect("write");
        let transport = FileTransport::new(dir.path());

        let relative = transport.fetch(&get("assets/a.json")).await.expect("fetch");
        assert_eq!(relative, FetchResponse::new(200, b"{}".to_vec()));

        let absolute = format!("file://{}", dir.path().join("assets/a.json").display());
        let response = transport.fetch(&get(&absolute)).await.expect("fetch");
        assert!(response.is_ok());
    }

    #[test]
    fn serves_a_local_origin() {
        assert!(!FileTransport::new(".").is_network_origin());
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let dir = tempfile::tempdir().expect("tempdir");
        let transport = FileTransport::new(dir.path());

        let response = transport.fetch(&get("nope.json")).await.expect("fetch");
        assert_eq!(response.status, 404);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn refuses_http_urls() {
        let transport = FileTransport::new(".");
        let result = transport.fetch(&get("https://cdn.example/a.json")).await;
        assert_eq!(
            result,
            Err(TransportError::InvalidUrl("https://cdn.example/a.json".into()))
        );
    }
}
