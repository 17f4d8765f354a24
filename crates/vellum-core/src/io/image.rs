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

use super::FetchRequest;
use crate::texture::ImageData;
use async_trait::async_trait;
use std::fmt;

/// Failures of the secondary image load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoadError {
    /// The image could not be fetched.
    Fetch {
        /// The image address.
        url: String,
        /// Status code, if the transport produced one.
        status: Option<u16>,
        /// Description of the failure.
        details: String,
    },
    /// The bytes were fetched but could not be decoded.
    Decode {
        /// The image address.
        url: String,
        /// Decoder message.
        details: String,
    },
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageLoadError::Fetch {
                url,
                status: Some(status),
                details,
            } => write!(f, "Failed to fetch image '{url}' (status {status}): {details}"),
            ImageLoadError::Fetch {
                url,
                status: None,
                details,
            } => write!(f, "Failed to fetch image '{url}': {details}"),
            ImageLoadError::Decode { url, details } => {
                write!(f, "Failed to decode image '{url}': {details}")
            }
        }
    }
}

impl std::error::Error for ImageLoadError {}

/// Fetches and decodes the image backing an atlas.
///
/// The caller creates the [`BaseTexture`](crate::texture::BaseTexture) that
/// forward-references the image before awaiting this; the future resolving is
/// the completion signal.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Loads and decodes the image at `request.url`.
    async fn load_image(&self, request: &FetchRequest) -> Result<ImageData, ImageLoadError>;
}
