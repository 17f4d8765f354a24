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

use super::BaseTexture;
use crate::{asset::Asset, math::Rect};
use std::sync::Arc;

/// A named sub-region of a shared atlas image.
#[derive(Debug, Clone)]
pub struct TextureRegion {
    base: Arc<BaseTexture>,
    frame: Rect,
    trim: Option<Rect>,
}

impl Asset for TextureRegion {}

impl TextureRegion {
    /// Creates an untrimmed region covering `frame` of `base`.
    pub fn new(base: Arc<BaseTexture>, frame: Rect) -> Self {
        Self {
            base,
            frame,
            trim: None,
        }
    }

    /// Attaches trim metadata.
    ///
    /// `trim.x`/`trim.y` is the offset of the packed pixels inside the original
    /// sprite, `trim.width`/`trim.height` is the original (untrimmed) size.
    pub fn with_trim(mut self, trim: Rect) -> Self {
        self.trim = Some(trim);
        self
    }

    /// The shared image this region points into.
    pub fn base(&self) -> &Arc<BaseTexture> {
        &self.base
    }

    /// The packed region in image pixel space.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Trim metadata, present only for trimmed sprites.
    pub fn trim(&self) -> Option<Rect> {
        self.trim
    }

    /// Returns `true` if the sprite was cropped when packed.
    pub fn is_trimmed(&self) -> bool {
        self.trim.is_some()
    }

    /// The logical bounding box of the sprite, anchored at the origin.
    ///
    /// For trimmed sprites this is the original size; otherwise it is the frame size.
    pub fn logical_bounds(&self) -> Rect {
        match self.trim {
            Some(trim) => Rect::new(0.0, 0.0, trim.width, trim.height),
            None => Rect::from_size(self.frame.size()),
        }
    }

    /// Where the packed pixels are drawn inside [`Self::logical_bounds`].
    pub fn placement(&self) -> Rect {
        match self.trim {
            Some(trim) => Rect::new(trim.x, trim.y, self.frame.width, self.frame.height),
            None => Rect::from_size(self.frame.size()),
        }
    }

    /// A region can be drawn only once its base image has been decoded.
    pub fn is_renderable(&self) -> bool {
        self.base.is_ready()
    }
}
