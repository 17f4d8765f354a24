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

use crate::math::Size;
use std::{fmt, sync::OnceLock};

/// Decoded image pixels, ready to be uploaded by a renderer.
///
/// Pixels are tightly packed RGBA8, row-major, top row first.
#[derive(Clone, PartialEq)]
pub struct ImageData {
    /// Width of the image in pixels.
    pub width: u32,
    /// Height of the image in pixels.
    pub height: u32,
    /// Raw RGBA8 pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Returns the image dimensions as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// The shared image backing every region of one atlas.
///
/// A `BaseTexture` is created in the pending state before its image is fetched so
/// that regions can reference it immediately. The image is set exactly once.
pub struct BaseTexture {
    source: String,
    image: OnceLock<ImageData>,
}

impl BaseTexture {
    /// Creates a base texture whose pixels will be loaded from `source`.
    pub fn pending(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            image: OnceLock::new(),
        }
    }

    /// The address the image is (or was) fetched from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` once decoded pixels are available.
    pub fn is_ready(&self) -> bool {
        self.image.get().is_some()
    }

    /// Returns the decoded image, if it has arrived.
    pub fn image(&self) -> Option<&ImageData> {
        self.image.get()
    }

    /// Returns the image dimensions, if the image has arrived.
    pub fn size(&self) -> Option<Size> {
        self.image().map(ImageData::size)
    }

    /// Materializes the texture with decoded pixels.
    ///
    /// Returns `false` (and keeps the existing pixels) if the texture was already fulfilled.
    pub fn fulfill(&self, image: ImageData) -> bool {
        let accepted = self.image.set(image).is_ok();
        if !accepted {
            log::warn!("Base texture '{}' was already fulfilled.", self.source);
        }
        accepted
    }
}

impl fmt::Debug for BaseTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseTexture")
            .field("source", &self.source)
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> ImageData {
        ImageData {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    #[test]
    fn pending_texture_is_not_ready() {
        let base = BaseTexture::pending("assets/sheet.png");
        assert_eq!(base.source(), "assets/sheet.png");
        assert!(!base.is_ready());
        assert!(base.size().is_none());
    }

    #[test]
    fn fulfill_only_once() {
        let base = BaseTexture::pending("sheet.png");
        assert!(base.fulfill(image(4, 2)));
        assert!(!base.fulfill(image(8, 8)));
        assert_eq!(base.size(), Some(Size::new(4.0, 2.0)));
    }
}
