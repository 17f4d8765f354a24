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

use std::fmt;
use vellum_core::{
    animation::RigParseError,
    io::{ImageLoadError, TransportError},
};
use vellum_lanes::asset_lane::ManifestError;

/// Why a load did not reach the `Loaded` state.
///
/// Every variant except [`LoadError::AlreadyStarted`] is terminal for its request
/// and is published in a [`LoaderEvent::Error`](super::LoaderEvent::Error).
/// Nothing is retried at this level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The manifest could not be fetched, or was refused by the status policy.
    TransportFailure {
        /// The response status, if the transport produced one.
        status: Option<u16>,
        /// Description of the failure.
        details: String,
    },
    /// The manifest body is malformed.
    ParseFailure(String),
    /// The image backing an atlas could not be loaded.
    SecondaryLoadFailure {
        /// The image address.
        image: String,
        /// Description of the failure.
        details: String,
    },
    /// The rig parser rejected the manifest.
    RigParseFailure(String),
    /// `load()` was called on a request that had already left the idle state.
    AlreadyStarted,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::TransportFailure {
                status: Some(status),
                details,
            } => write!(f, "Transport failure (status {status}): {details}"),
            LoadError::TransportFailure {
                status: None,
                details,
            } => write!(f, "Transport failure: {details}"),
            LoadError::ParseFailure(details) => write!(f, "Malformed manifest: {details}"),
            LoadError::SecondaryLoadFailure { image, details } => {
                write!(f, "Failed to load atlas image '{image}': {details}")
            }
            LoadError::RigParseFailure(details) => write!(f, "Invalid rig data: {details}"),
            LoadError::AlreadyStarted => write!(f, "Load already started for this request"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<TransportError> for LoadError {
    fn from(error: TransportError) -> Self {
        LoadError::TransportFailure {
            status: None,
            details: error.to_string(),
        }
    }
}

impl From<ManifestError> for LoadError {
    fn from(error: ManifestError) -> Self {
        LoadError::ParseFailure(error.to_string())
    }
}

impl From<RigParseError> for LoadError {
    fn from(error: RigParseError) -> Self {
        LoadError::RigParseFailure(error.to_string())
    }
}

impl From<ImageLoadError> for LoadError {
    fn from(error: ImageLoadError) -> Self {
        let image = match &error {
            ImageLoadError::Fetch { url, .. } | ImageLoadError::Decode { url, .. } => url.clone(),
        };
        LoadError::SecondaryLoadFailure {
            image,
            details: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_errors_keep_the_image_address() {
        let error = LoadError::from(ImageLoadError::Decode {
            url: "assets/sheet.png".into(),
            details: "bad header".into(),
        });
        match error {
            LoadError::SecondaryLoadFailure { image, details } => {
                assert_eq!(image, "assets/sheet.png");
                assert!(details.contains("bad header"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn display_mentions_status() {
        let error = LoadError::TransportFailure {
            status: Some(404),
            details: "not found".into(),
        };
        assert_eq!(error.to_string(), "Transport failure (status 404): not found");
    }
}
