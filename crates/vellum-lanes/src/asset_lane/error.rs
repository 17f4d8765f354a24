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

use thiserror::Error;

/// Errors raised while turning a manifest body into a classified [`Manifest`](super::Manifest).
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The body is not valid UTF-8.
    #[error("manifest body is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),

    /// The body is not valid JSON.
    #[error("manifest body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An atlas manifest without `meta.image`.
    #[error("atlas manifest has no 'meta.image' entry")]
    MissingImage,

    /// `frames` is neither a mapping nor an array.
    #[error("atlas 'frames' must be an object or an array, found {0}")]
    InvalidFrames(&'static str),

    /// A frame descriptor could not be decoded.
    #[error("invalid descriptor for frame '{key}': {source}")]
    InvalidFrame {
        /// The frame name.
        key: String,
        /// The decoding failure.
        source: serde_json::Error,
    },

    /// A frame is marked `trimmed` but lacks the sizes needed to compute its trim.
    #[error("trimmed frame '{key}' has no '{field}'")]
    MissingTrimData {
        /// The frame name.
        key: String,
        /// The missing field.
        field: &'static str,
    },
}
