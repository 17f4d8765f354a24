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

use async_trait::async_trait;
use std::sync::Arc;
use vellum_core::{
    io::{FetchRequest, ImageLoadError, ImageLoader, Transport},
    texture::ImageData,
};

/// Fetches images through any [`Transport`] and decodes them with the `image` crate.
///
/// Decoding runs on tokio's blocking pool so the loader task is never stalled
/// by large sheets.
#[derive(Clone)]
pub struct DecodingImageLoader {
    transport: Arc<dyn Transport>,
}

impl DecodingImageLoader {
    /// Creates a loader fetching through `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

fn decode(bytes: &[u8]) -> Result<ImageData, image::ImageError> {
    // Keep sRGB values as they are; conversion is the renderer's concern.
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageData {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[async_trait]
impl ImageLoader for DecodingImageLoader {
    async fn load_image(&self, request: &FetchRequest) -> Result<ImageData, ImageLoadError> {
        let url = request.url.clone();
        let response =
            self.transport
                .fetch(request)
                .await
                .map_err(|e| ImageLoadError::Fetch {
                    url: url.clone(),
                    status: None,
                    details: e.to_string(),
                })?;

        if !response.is_ok() {
            return Err(ImageLoadError::Fetch {
                url,
                status: Some(response.status),
                details: "unexpected status".into(),
            });
        }

        let body = response.body;
        let decoded = tokio::task::spawn_blocking(move || decode(&body))
            .await
            .map_err(|e| ImageLoadError::Decode {
                url: url.clone(),
                details: e.to_string(),
            })?;

        decoded.map_err(|e| ImageLoadError::Decode {
            url,
            details: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::FileTransport;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use vellum_core::io::CrossOriginPolicy;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encode");
        bytes
    }

    fn loader(root: &std::path::Path) -> DecodingImageLoader {
        DecodingImageLoader::new(Arc::new(FileTransport::new(root)))
    }

    #[tokio::test]
    async fn decodes_png_to_rgba() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("sheet.png"), png(3, 2)).expect("write");

        let image = loader(dir.path())
            .load_image(&FetchRequest::get("sheet.png", CrossOriginPolicy::SameOrigin))
            .await
            .expect("image should load");

        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.pixels.len(), 3 * 2 * 4);
        assert_eq!(&image.pixels[..4], &[10, 20, 30, 255]);
    }

    #[tokio::test]
    async fn missing_image_is_a_fetch_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = loader(dir.path())
            .load_image(&FetchRequest::get("gone.png", CrossOriginPolicy::SameOrigin))
            .await;

        assert!(matches!(
            result,
            Err(ImageLoadError::Fetch { status: Some(404), .. })
        ));
    }

    #[tokio::test]
    async fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("bad.png"), b"not an image").expect("write");

        let result = loader(dir.path())
            .load_image(&FetchRequest::get("bad.png", CrossOriginPolicy::SameOrigin))
            .await;

        assert!(matches!(result, Err(ImageLoadError::Decode { .. })));
    }
}
