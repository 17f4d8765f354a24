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

mod skeleton_json;

pub use self::skeleton_json::SkeletonJsonParser;

use serde_json::Value;
use vellum_core::{
    animation::{RigParseError, RigParser, SkeletonData},
    asset::AssetHandle,
};
use vellum_data::assets::AssetStore;

/// Parses rig manifests and writes them into an animation cache.
pub struct RigRegistrar<'a> {
    parser: &'a dyn RigParser,
    rigs: &'a dyn AssetStore<SkeletonData>,
}

impl<'a> RigRegistrar<'a> {
    /// Creates a registrar using `parser` and writing into `rigs`.
    pub fn new(parser: &'a dyn RigParser, rigs: &'a dyn AssetStore<SkeletonData>) -> Self {
        Self { parser, rigs }
    }

    /// Parses `tree` and caches the rig under `location`.
    ///
    /// Nothing is written when the parser fails.
    pub fn register(
        &self,
        location: &str,
        tree: &Value,
    ) -> Result<AssetHandle<SkeletonData>, RigParseError> {
        let skeleton = self.parser.read_skeleton_data(tree)?;
        log::debug!(
            "Registered rig '{location}' ({} bones, {} slots).",
            skeleton.bones.len(),
            skeleton.slots.len()
        );

        let handle = AssetHandle::new(skeleton);
        self.rigs.set(location.to_owned(), handle.clone());
        Ok(handle)
    }
}
