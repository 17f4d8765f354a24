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

use super::LoadError;
use serde_json::Value;
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, OnceLock},
};
use vellum_core::{
    io::{base_location, CrossOriginPolicy},
    texture::BaseTexture,
};
use vellum_lanes::asset_lane::ManifestKind;

/// Lifecycle of a [`LoaderRequest`]. States only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoaderState {
    /// Created, `load()` not called yet.
    #[default]
    Idle,
    /// Fetching, parsing or registering.
    Loading,
    /// Finished successfully.
    Loaded,
    /// Finished with an error.
    Errored,
}

impl LoaderState {
    /// Returns `true` for `Loaded` and `Errored`.
    pub fn is_terminal(self) -> bool {
        matches!(self, LoaderState::Loaded | LoaderState::Errored)
    }
}

/// Identifies one load operation and records what it produced.
///
/// Every lifecycle event carries a shared reference to the request, so
/// observers can inspect the outcome (state, classification, parsed tree,
/// atlas texture) without keeping the loader around.
pub struct LoaderRequest {
    location: String,
    base_location: String,
    cross_origin: CrossOriginPolicy,
    state: Mutex<LoaderState>,
    kind: OnceLock<ManifestKind>,
    manifest: OnceLock<Arc<Value>>,
    texture: OnceLock<Arc<BaseTexture>>,
}

impl LoaderRequest {
    /// Creates an idle request for the manifest at `location`.
    pub fn new(location: impl Into<String>, cross_origin: CrossOriginPolicy) -> Self {
        let location = location.into();
        let base_location = base_location(&location).to_owned();
        Self {
            location,
            base_location,
            cross_origin,
            state: Mutex::new(LoaderState::Idle),
            kind: OnceLock::new(),
            manifest: OnceLock::new(),
            texture: OnceLock::new(),
        }
    }

    /// The manifest address.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// `location` without its final path segment; sibling resources resolve against it.
    pub fn base_location(&self) -> &str {
        &self.base_location
    }

    /// The cross-origin policy forwarded to every fetch.
    pub fn cross_origin(&self) -> CrossOriginPolicy {
        self.cross_origin
    }

    /// The current lifecycle state.
    pub fn state(&self) -> LoaderState {
        *self.lock_state()
    }

    /// Returns `true` once the request reached `Loaded`.
    pub fn is_loaded(&self) -> bool {
        self.state() == LoaderState::Loaded
    }

    /// How the manifest was classified, once it has been parsed.
    pub fn kind(&self) -> Option<ManifestKind> {
        self.kind.get().copied()
    }

    /// The parsed manifest tree, once it has been parsed.
    pub fn manifest(&self) -> Option<&Arc<Value>> {
        self.manifest.get()
    }

    /// The shared texture of an atlas manifest.
    ///
    /// Available as soon as the frames are registered; it only holds pixels once
    /// the request is `Loaded`.
    pub fn texture(&self) -> Option<&Arc<BaseTexture>> {
        self.texture.get()
    }

    /// Moves `Idle` to `Loading`.
    pub(crate) fn begin(&self) -> Result<(), LoadError> {
        let mut state = self.lock_state();
        if *state != LoaderState::Idle {
            return Err(LoadError::AlreadyStarted);
        }
        *state = LoaderState::Loading;
        Ok(())
    }

    /// Moves `Loading` to the terminal `outcome`.
    ///
    /// Returns `false` if the request was not loading, in which case nothing
    /// changes and no event may be published.
    pub(crate) fn settle(&self, outcome: LoaderState) -> bool {
        debug_assert!(outcome.is_terminal());
        let mut state = self.lock_state();
        if *state != LoaderState::Loading {
            return false;
        }
        *state = outcome;
        true
    }

    pub(crate) fn record_manifest(&self, tree: Arc<Value>, kind: ManifestKind) {
        let _ = self.manifest.set(tree);
        let _ = self.kind.set(kind);
    }

    pub(crate) fn record_texture(&self, texture: Arc<BaseTexture>) {
        let _ = self.texture.set(texture);
    }

    fn lock_state(&self) -> MutexGuard<'_, LoaderState> {
        // The guarded value is a plain `Copy` enum and can never be observed half-written.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for LoaderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRequest")
            .field("location", &self.location)
            .field("state", &self.state())
            .field("kind", &self.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_location_is_computed_once() {
        let request = LoaderRequest::new("assets/ui/sheet.json", CrossOriginPolicy::SameOrigin);
        assert_eq!(request.location(), "assets/ui/sheet.json");
        assert_eq!(request.base_location(), "assets/ui/");
        assert_eq!(request.state(), LoaderState::Idle);
        assert!(request.kind().is_none());
    }

    #[test]
    fn begin_only_from_idle() {
        let request = LoaderRequest::new("a.json", CrossOriginPolicy::SameOrigin);
        assert_eq!(request.begin(), Ok(()));
        assert_eq!(request.state(), LoaderState::Loading);
        assert_eq!(request.begin(), Err(LoadError::AlreadyStarted));
        assert_eq!(request.state(), LoaderState::Loading);
    }

    #[test]
    fn settle_happens_at_most_once() {
        let request = LoaderRequest::new("a.json", CrossOriginPolicy::SameOrigin);
        assert!(!request.settle(LoaderState::Loaded));

        request.begin().expect("idle request");
        assert!(request.settle(LoaderState::Errored));
        assert!(!request.settle(LoaderState::Loaded));
        assert_eq!(request.state(), LoaderState::Errored);
        assert_eq!(request.begin(), Err(LoadError::AlreadyStarted));
    }
}
