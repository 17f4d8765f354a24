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

//! Manifest classification and registration lanes.
//!
//! - [`Manifest::classify`] decides whether a parsed tree is an atlas, a rig or
//!   generic data.
//! - [`AtlasRegistrar`] turns atlas frames into [`TextureRegion`](vellum_core::texture::TextureRegion)
//!   cache entries.
//! - [`RigRegistrar`] hands rig trees to a [`RigParser`](vellum_core::animation::RigParser)
//!   and caches the result.

mod atlas;
mod error;
mod manifest;
mod rig;

pub use self::atlas::{AtlasFrame, AtlasManifest, AtlasRegistrar};
pub use self::error::ManifestError;
pub use self::manifest::{parse_tree, Manifest, ManifestKind};
pub use self::rig::{RigRegistrar, SkeletonJsonParser};
