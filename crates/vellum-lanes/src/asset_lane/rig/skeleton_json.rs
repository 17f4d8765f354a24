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
use serde_json::Value;
use std::collections::HashMap;
use vellum_core::animation::{BoneData, RigParseError, RigParser, SkeletonData, SlotData};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBone {
    name: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    length: f32,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    rotation: f32,
    #[serde(default = "unit_scale")]
    scale_x: f32,
    #[serde(default = "unit_scale")]
    scale_y: f32,
}

#[derive(Debug, Deserialize)]
struct RawSlot {
    name: String,
    bone: String,
    #[serde(default)]
    attachment: Option<String>,
}

fn unit_scale() -> f32 {
    1.0
}

/// Reads the bone hierarchy and slots of Spine-style skeleton JSON.
///
/// Only setup-pose data is read; animations, skins and constraints are left to
/// richer parsers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonJsonParser;

impl SkeletonJsonParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    fn read_bones(bones: &[Value]) -> Result<Vec<BoneData>, RigParseError> {
        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(bones.len());
        let mut resolved = Vec::with_capacity(bones.len());

        for (index, value) in bones.iter().enumerate() {
            let raw = RawBone::deserialize(value).map_err(|e| RigParseError::InvalidBone {
                index,
                details: e.to_string(),
            })?;

            // Parents must be declared before their children.
            let parent = match raw.parent {
                Some(parent) => Some(*by_name.get(&parent).ok_or_else(|| {
                    RigParseError::UnknownParent {
                        bone: raw.name.clone(),
                        parent,
                    }
                })?),
                None => None,
            };

            if by_name.insert(raw.name.clone(), index).is_some() {
                return Err(RigParseError::DuplicateBone(raw.name));
            }

            resolved.push(BoneData {
                name: raw.name,
                parent,
                length: raw.length,
                x: raw.x,
                y: raw.y,
                rotation: raw.rotation,
                scale_x: raw.scale_x,
                scale_y: raw.scale_y,
            });
        }

        Ok(resolved)
    }

    fn read_slots(slots: &[Value], bones: &[BoneData]) -> Result<Vec<SlotData>, RigParseError> {
        slots
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let raw = RawSlot::deserialize(value).map_err(|e| RigParseError::InvalidSlot {
                    index,
                    details: e.to_string(),
                })?;
                let bone = bones
                    .iter()
                    .position(|bone| bone.name == raw.bone)
                    .ok_or_else(|| RigParseError::UnknownSlotBone {
                        slot: raw.name.clone(),
                        bone: raw.bone.clone(),
                    })?;
                Ok(SlotData {
                    name: raw.name,
                    bone,
                    attachment: raw.attachment,
                })
            })
            .collect()
    }
}

impl RigParser for SkeletonJsonParser {
    fn read_skeleton_data(&self, tree: &Value) -> Result<SkeletonData, RigParseError> {
        let bones = tree
            .get("bones")
            .and_then(Value::as_array)
            .ok_or(RigParseError::MissingBones)?;
        let bones = Self::read_bones(bones)?;

        let slots = match tree.get("slots") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(slots)) => Self::read_slots(slots, &bones)?,
            Some(_) => {
                return Err(RigParseError::InvalidSlot {
                    index: 0,
                    details: "'slots' must be an array".into(),
                })
            }
        };

        let version = tree
            .pointer("/skeleton/spine")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(SkeletonData {
            version,
            bones,
            slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(tree: Value) -> Result<SkeletonData, RigParseError> {
        SkeletonJsonParser::new().read_skeleton_data(&tree)
    }

    #[test]
    fn reads_bones_slots_and_version() {
        let skeleton = parse(json!({
            "skeleton": { "spine": "3.8.99" },
            "bones": [
                { "name": "root" },
                { "name": "hip", "parent": "root", "y": 120.5, "length": 40 },
                { "name": "arm", "parent": "hip", "rotation": 90, "scaleX": 2 }
            ],
            "slots": [{ "name": "torso", "bone": "hip", "attachment": "torso" }]
        }))
        .expect("rig should parse");

        assert_eq!(skeleton.version.as_deref(), Some("3.8.99"));
        assert_eq!(skeleton.root().map(|b| b.name.as_str()), Some("root"));
        assert_eq!(skeleton.find_bone("arm"), Some(2));

        let hip = &skeleton.bones[1];
        assert_eq!(hip.parent, Some(0));
        assert_eq!(hip.y, 120.5);
        assert_eq!(hip.length, 40.0);
        assert_eq!(hip.scale_x, 1.0);

        let arm = &skeleton.bones[2];
        assert_eq!(arm.parent, Some(1));
        assert_eq!(arm.scale_x, 2.0);
        assert_eq!(arm.scale_y, 1.0);

        assert_eq!(skeleton.find_slot("torso"), Some(0));
        assert_eq!(skeleton.slots[0].bone, 1);
        assert_eq!(skeleton.slots[0].attachment.as_deref(), Some("torso"));
    }

    #[test]
    fn empty_bone_list_is_valid() {
        let skeleton = parse(json!({ "bones": [] })).expect("empty rig");
        assert!(skeleton.bones.is_empty());
        assert!(skeleton.root().is_none());
    }

    #[test]
    fn rejects_malformed_rigs() {
        assert_eq!(parse(json!({ "bones": {} })), Err(RigParseError::MissingBones));
        assert!(matches!(
            parse(json!({ "bones": [{ "length": 3 }] })),
            Err(RigParseError::InvalidBone { index: 0, .. })
        ));
        assert_eq!(
            parse(json!({ "bones": [{ "name": "a" }, { "name": "a" }] })),
            Err(RigParseError::DuplicateBone("a".into()))
        );
        assert_eq!(
            parse(json!({ "bones": [{ "name": "child", "parent": "late" }, { "name": "late" }] })),
            Err(RigParseError::UnknownParent {
                bone: "child".into(),
                parent: "late".into()
            })
        );
        assert_eq!(
            parse(json!({ "bones": [{ "name": "root" }], "slots": [{ "name": "s", "bone": "nope" }] })),
            Err(RigParseError::UnknownSlotBone {
                slot: "s".into(),
                bone: "nope".into()
            })
        );
    }
}
