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

use super::{LoadError, LoaderRequest};
use std::sync::Arc;

/// Terminal lifecycle announcement of a [`LoaderRequest`].
///
/// Exactly one of these is published per request that reached `Loading`.
#[derive(Debug, Clone)]
pub enum LoaderEvent {
    /// The manifest and everything it depends on finished loading.
    Loaded {
        /// The request that finished.
        content: Arc<LoaderRequest>,
    },
    /// The load failed.
    Error {
        /// The request that failed.
        content: Arc<LoaderRequest>,
        /// Why it failed.
        reason: LoadError,
    },
}

impl LoaderEvent {
    /// The request this event is about.
    pub fn content(&self) -> &Arc<LoaderRequest> {
        match self {
            LoaderEvent::Loaded { content } | LoaderEvent::Error { content, .. } => content,
        }
    }

    /// Returns `true` for [`LoaderEvent::Loaded`].
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoaderEvent::Loaded { .. })
    }

    /// The failure reason, for [`LoaderEvent::Error`].
    pub fn reason(&self) -> Option<&LoadError> {
        match self {
            LoaderEvent::Loaded { .. } => None,
            LoaderEvent::Error { reason, .. } => Some(reason),
        }
    }
}
