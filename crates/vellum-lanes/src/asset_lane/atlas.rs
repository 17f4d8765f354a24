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

use super::{manifest::is_truthy, ManifestError};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use vellum_core::{
    asset::AssetHandle,
    io::resolve_sibling,
    math::Rect,
    texture::{BaseTexture, TextureRegion},
};
use vellum_data::assets::AssetStore;

/// `{x, y, w, h}` as written by sprite-sheet packers.
#[derive(Debug, Deserialize)]
struct PackedRect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// `{w, h}` as written by sprite-sheet packers.
#[derive(Debug, Deserialize)]
struct PackedSize {
    w: f32,
    h: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrameDescriptor {
    #[serde(default)]
    frame: Option<PackedRect>,
    /// Any JSON value; only truthy ones mark the frame as trimmed.
    #[serde(default)]
    trimmed: Value,
    #[serde(default)]
    source_size: Option<PackedSize>,
    #[serde(default)]
    sprite_source_size: Option<PackedRect>,
}

/// One frame of an atlas with its derived geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasFrame {
    /// Cache key of the frame.
    pub key: String,
    /// Packed region in image pixel space.
    pub frame: Rect,
    /// `{spriteSourceSize.x, spriteSourceSize.y, sourceSize.w, sourceSize.h}` for trimmed frames.
    pub trim: Option<Rect>,
}

impl AtlasFrame {
    fn from_descriptor(key: String, descriptor: FrameDescriptor) -> Result<Option<Self>, ManifestError> {
        let Some(rect) = descriptor.frame else {
            return Ok(None);
        };

        let trim = if is_truthy(&descriptor.trimmed) {
            let real = descriptor
                .sprite_source_size
                .ok_or_else(|| ManifestError::MissingTrimData {
                    key: key.clone(),
                    field: "spriteSourceSize",
                })?;
            let actual = descriptor
                .source_size
                .ok_or_else(|| ManifestError::MissingTrimData {
                    key: key.clone(),
                    field: "sourceSize",
                })?;
            Some(Rect::new(real.x, real.y, actual.w, actual.h))
        } else {
            None
        };

        Ok(Some(Self {
            key,
            frame: Rect::new(rect.x, rect.y, rect.w, rect.h),
            trim,
        }))
    }
}

/// A decoded sprite-sheet manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasManifest {
    image: String,
    frames: Vec<AtlasFrame>,
    skipped: usize,
}

impl AtlasManifest {
    /// Decodes the `frames` and `meta.image` entries of an atlas tree.
    ///
    /// `frames` may be a mapping (keys are frame names) or an array (keys are the
    /// array indices). Entries without a `frame` rectangle are skipped.
    pub fn from_tree(tree: &Value) -> Result<Self, ManifestError> {
        let image = tree
            .get("meta")
            .and_then(|meta| meta.get("image"))
            .and_then(Value::as_str)
            .ok_or(ManifestError::MissingImage)?
            .to_owned();

        let entries: Vec<(String, &Value)> = match tree.get("frames") {
            Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Some(Value::Array(list)) => list
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            Some(other) => return Err(ManifestError::InvalidFrames(json_type_name(other))),
            None => Vec::new(),
        };

        let mut frames = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for (key, value) in entries {
            if !value.is_object() {
                skipped += 1;
                continue;
            }
            let descriptor = FrameDescriptor::deserialize(value).map_err(|source| {
                ManifestError::InvalidFrame {
                    key: key.clone(),
                    source,
                }
            })?;
            match AtlasFrame::from_descriptor(key, descriptor)? {
                Some(frame) => frames.push(frame),
                None => skipped += 1,
            }
        }

        Ok(Self {
            image,
            frames,
            skipped,
        })
    }

    /// The backing image file name, relative to the manifest.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Resolves the backing image address against the manifest's base location.
    pub fn image_location(&self, base_location: &str) -> String {
        resolve_sibling(base_location, &self.image)
    }

    /// Every frame that carries a `frame` rectangle.
    pub fn frames(&self) -> &[AtlasFrame] {
        &self.frames
    }

    /// How many entries were skipped for lacking a `frame` rectangle.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Writes atlas frames into a texture cache.
pub struct AtlasRegistrar<'a> {
    textures: &'a dyn AssetStore<TextureRegion>,
}

impl<'a> AtlasRegistrar<'a> {
    /// Creates a registrar writing into `textures`.
    pub fn new(textures: &'a dyn AssetStore<TextureRegion>) -> Self {
        Self { textures }
    }

    /// Registers one [`TextureRegion`] per frame, all pointing into `base`.
    ///
    /// `base` may still be pending: the entries are valid geometry descriptors
    /// immediately and become renderable once the image arrives.
    ///
    /// Returns the number of entries written.
    pub fn register(&self, atlas: &AtlasManifest, base: &Arc<BaseTexture>) -> usize {
        for frame in atlas.frames() {
            let mut region = TextureRegion::new(Arc::clone(base), frame.frame);
            if let Some(trim) = frame.trim {
                region = region.with_trim(trim);
            }
            self.textures
                .set(frame.key.clone(), AssetHandle::new(region));
        }

        log::debug!(
            "Registered {} atlas frames for '{}' ({} skipped).",
            atlas.frames().len(),
            base.source(),
            atlas.skipped()
        );
        atlas.frames().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vellum_data::assets::TextureCache;

    fn decode(tree: Value) -> AtlasManifest {
        AtlasManifest::from_tree(&tree).expect("atlas should decode")
    }

    #[test]
    fn frame_rectangles_are_converted() {
        let atlas = decode(json!({
            "frames": { "a": { "frame": { "x": 0, "y": 0, "w": 10, "h": 20 } } },
            "meta": { "image": "sheet.png" }
        }));

        assert_eq!(
            atlas.frames(),
            &[AtlasFrame {
                key: "a".into(),
                frame: Rect::new(0.0, 0.0, 10.0, 20.0),
                trim: None,
            }]
        );
        assert_eq!(atlas.image_location("assets/"), "assets/sheet.png");
    }

    #[test]
    fn trimmed_frames_take_offset_and_original_size() {
        let atlas = decode(json!({
            "frames": {
                "hero": {
                    "frame": { "x": 2, "y": 4, "w": 30, "h": 28 },
                    "trimmed": true,
                    "spriteSourceSize": { "x": 1, "y": 3, "w": 30, "h": 28 },
                    "sourceSize": { "w": 32, "h": 32 }
                }
            },
            "meta": { "image": "heroes.png" }
        }));

        let hero = &atlas.frames()[0];
        assert_eq!(hero.frame, Rect::new(2.0, 4.0, 30.0, 28.0));
        assert_eq!(hero.trim, Some(Rect::new(1.0, 3.0, 32.0, 32.0)));
    }

    #[test]
    fn untrimmed_frames_ignore_size_metadata() {
        let atlas = decode(json!({
            "frames": {
                "a": {
                    "frame": { "x": 0, "y": 0, "w": 8, "h": 8 },
                    "trimmed": false,
                    "spriteSourceSize": { "x": 0, "y": 0, "w": 8, "h": 8 },
                    "sourceSize": { "w": 8, "h": 8 }
                }
            },
            "meta": { "image": "a.png" }
        }));
        assert_eq!(atlas.frames()[0].trim, None);
    }

    #[test]
    fn trimmed_flag_follows_truthiness() {
        let atlas = decode(json!({
            "frames": {
                "null_flag": { "frame": { "x": 0, "y": 0, "w": 4, "h": 4 }, "trimmed": null },
                "zero_flag": { "frame": { "x": 4, "y": 0, "w": 4, "h": 4 }, "trimmed": 0 },
                "one_flag": {
                    "frame": { "x": 8, "y": 0, "w": 4, "h": 4 },
                    "trimmed": 1,
                    "spriteSourceSize": { "x": 1, "y": 1, "w": 4, "h": 4 },
                    "sourceSize": { "w": 6, "h": 6 }
                },
                "plain": { "frame": { "x": 12, "y": 0, "w": 4, "h": 4 } }
            },
            "meta": { "image": "a.png" }
        }));

        let trim_of = |key: &str| {
            atlas
                .frames()
                .iter()
                .find(|f| f.key == key)
                .map(|f| f.trim)
                .expect("frame registered")
        };
        assert_eq!(atlas.frames().len(), 4);
        assert_eq!(trim_of("null_flag"), None);
        assert_eq!(trim_of("zero_flag"), None);
        assert_eq!(trim_of("plain"), None);
        assert_eq!(trim_of("one_flag"), Some(Rect::new(1.0, 1.0, 6.0, 6.0)));
    }

    #[test]
    fn entries_without_frame_are_skipped() {
        let atlas = decode(json!({
            "frames": {
                "kept": { "frame": { "x": 0, "y": 0, "w": 1, "h": 1 } },
                "no_rect": { "rotated": false },
                "null_rect": { "frame": null, "trimmed": true },
                "scalar": 3
            },
            "meta": { "image": "a.png" }
        }));
        assert_eq!(atlas.frames().len(), 1);
        assert_eq!(atlas.frames()[0].key, "kept");
        assert_eq!(atlas.skipped(), 3);
    }

    #[test]
    fn array_frames_are_keyed_by_index() {
        let atlas = decode(json!({
            "frames": [
                { "filename": "a", "frame": { "x": 0, "y": 0, "w": 1, "h": 1 } },
                { "filename": "b", "frame": { "x": 1, "y": 0, "w": 1, "h": 1 } }
            ],
            "meta": { "image": "a.png" }
        }));
        let keys: Vec<_> = atlas.frames().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["0", "1"]);
    }

    #[test]
    fn decode_errors() {
        let missing_image = json!({ "frames": {} });
        assert!(matches!(
            AtlasManifest::from_tree(&missing_image),
            Err(ManifestError::MissingImage)
        ));

        let bad_frames = json!({ "frames": "nope", "meta": { "image": "a.png" } });
        assert!(matches!(
            AtlasManifest::from_tree(&bad_frames),
            Err(ManifestError::InvalidFrames("a string"))
        ));

        let bad_rect = json!({
            "frames": { "a": { "frame": { "x": "left", "y": 0, "w": 1, "h": 1 } } },
            "meta": { "image": "a.png" }
        });
        assert!(matches!(
            AtlasManifest::from_tree(&bad_rect),
            Err(ManifestError::InvalidFrame { ref key, .. }) if key == "a"
        ));

        let no_trim_data = json!({
            "frames": { "a": { "frame": { "x": 0, "y": 0, "w": 1, "h": 1 }, "trimmed": true } },
            "meta": { "image": "a.png" }
        });
        assert!(matches!(
            AtlasManifest::from_tree(&no_trim_data),
            Err(ManifestError::MissingTrimData { field: "spriteSourceSize", .. })
        ));
    }

    #[test]
    fn registrar_writes_one_entry_per_frame() {
        let atlas = decode(json!({
            "frames": {
                "a": { "frame": { "x": 0, "y": 0, "w": 10, "h": 20 } },
                "b": {
                    "frame": { "x": 10, "y": 0, "w": 6, "h": 6 },
                    "trimmed": true,
                    "spriteSourceSize": { "x": 1, "y": 1, "w": 6, "h": 6 },
                    "sourceSize": { "w": 8, "h": 8 }
                },
                "c": {}
            },
            "meta": { "image": "sheet.png" }
        }));
        let textures = TextureCache::new();
        let base = Arc::new(BaseTexture::pending("assets/sheet.png"));

        let written = AtlasRegistrar::new(&textures).register(&atlas, &base);

        assert_eq!(written, 2);
        assert_eq!(textures.len(), 2);
        assert!(!textures.contains("c"));

        let a = textures.get("a").expect("frame a");
        assert_eq!(a.frame(), Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(a.trim(), None);
        assert!(Arc::ptr_eq(a.base(), &base));
        assert!(!a.is_renderable());

        let b = textures.get("b").expect("frame b");
        assert_eq!(b.trim(), Some(Rect::new(1.0, 1.0, 8.0, 8.0)));
    }
}
