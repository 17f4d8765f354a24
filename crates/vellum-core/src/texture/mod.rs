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

//! Texture types produced by atlas manifests.
//!
//! An atlas is one shared image ([`BaseTexture`]) and any number of named
//! sub-regions of it ([`TextureRegion`]). Regions are created as soon as the
//! manifest is parsed and stay valid as geometry descriptors while the image is
//! still being fetched; they only become renderable once the base texture has
//! been fulfilled with decoded pixels.

mod base;
mod region;

pub use self::base::{BaseTexture, ImageData};
pub use self::region::TextureRegion;
