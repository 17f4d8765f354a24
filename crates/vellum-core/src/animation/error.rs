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

/// Errors raised while converting a rig tree into [`SkeletonData`](super::SkeletonData).
#[derive(Debug, Clone, PartialEq)]
pub enum RigParseError {
    /// The tree has no usable `bones` array.
    MissingBones,
    /// A bone entry could not be decoded.
    InvalidBone {
        /// Position of the entry in the `bones` array.
        index: usize,
        /// What was wrong with it.
        details: String,
    },
    /// Two bones share the same name.
    DuplicateBone(String),
    /// A bone refers to a parent that is not declared before it.
    UnknownParent {
        /// The bone being resolved.
        bone: String,
        /// The parent name that could not be found.
        parent: String,
    },
    /// A slot entry could not be decoded.
    InvalidSlot {
        /// Position of the entry in the `slots` array.
        index: usize,
        /// What was wrong with it.
        details: String,
    },
    /// A slot refers to a bone that does not exist.
    UnknownSlotBone {
        /// The slot being resolved.
        slot: String,
        /// The bone name that could not be found.
        bone: String,
    },
}

impl fmt::Display for RigParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RigParseError::MissingBones => write!(f, "Rig data has no 'bones' array"),
            RigParseError::InvalidBone { index, details } => {
                write!(f, "Invalid bone at index {index}: {details}")
            }
            RigParseError::DuplicateBone(name) => write!(f, "Duplicate bone name '{name}'"),
            RigParseError::UnknownParent { bone, parent } => {
                write!(f, "Bone '{bone}' refers to unknown parent '{parent}'")
            }
            RigParseError::InvalidSlot { index, details } => {
                write!(f, "Invalid slot at index {index}: {details}")
            }
            RigParseError::UnknownSlotBone { slot, bone } => {
                write!(f, "Slot '{slot}' refers to unknown bone '{bone}'")
            }
        }
    }
}

impl std::error::Error for RigParseError {}
