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

//! Skeletal-animation rig types and the parser contract.
//!
//! Rig manifests are handed, as a generic JSON tree, to a [`RigParser`]. The
//! resulting [`SkeletonData`] is what ends up in the animation cache.

mod error;
mod skeleton;

pub use self::error::RigParseError;
pub use self::skeleton::{BoneData, SkeletonData, SlotData};

use serde_json::Value;

/// Converts a generic data tree into a rig object.
///
/// Implementations must be pure: the same tree always yields the same result,
/// and the tree is never modified.
pub trait RigParser: Send + Sync {
    /// Reads the skeleton description contained in `tree`.
    fn read_skeleton_data(&self, tree: &Value) -> Result<SkeletonData, RigParseError>;
}
