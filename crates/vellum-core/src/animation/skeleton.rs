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

use crate::asset::Asset;

/// Setup-pose data of one bone.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneData {
    /// Unique bone name.
    pub name: String,
    /// Index of the parent bone in [`SkeletonData::bones`], `None` for the root.
    pub parent: Option<usize>,
    /// Length of the bone, used for debug drawing and IK.
    pub length: f32,
    /// Local X translation.
    pub x: f32,
    /// Local Y translation.
    pub y: f32,
    /// Local rotation in degrees.
    pub rotation: f32,
    /// Local X scale.
    pub scale_x: f32,
    /// Local Y scale.
    pub scale_y: f32,
}

/// A draw slot attached to a bone.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotData {
    /// Unique slot name.
    pub name: String,
    /// Index of the owning bone in [`SkeletonData::bones`].
    pub bone: usize,
    /// Attachment shown in the setup pose, if any.
    pub attachment: Option<String>,
}

/// A parsed skeletal rig.
///
/// Bones are stored parents-first: every bone's parent has a lower index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletonData {
    /// Version string of the tool that exported the rig, if present.
    pub version: Option<String>,
    /// All bones, parents before children.
    pub bones: Vec<BoneData>,
    /// All slots in draw order.
    pub slots: Vec<SlotData>,
}

impl Asset for SkeletonData {}

impl SkeletonData {
    /// Finds a bone by name.
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|bone| bone.name == name)
    }

    /// Finds a slot by name.
    pub fn find_slot(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name == name)
    }

    /// Returns the root bone, if the rig has any bones.
    pub fn root(&self) -> Option<&BoneData> {
        self.bones.first()
    }
}
