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

use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use std::{io::Cursor, sync::Arc};
use tempfile::tempdir;
use vellum_agents::manifest_agent::{LoadError, LoaderServices, ManifestLoader};
use vellum_core::{io::CrossOriginPolicy, math::Rect};
use vellum_infra::io::{DecodingImageLoader, FileTransport};

fn services(root: &std::path::Path) -> LoaderServices {
    let transport = Arc::new(FileTransport::new(root));
    let images = Arc::new(DecodingImageLoader::new(transport.clone()));
    LoaderServices::new(transport, images)
}

#[tokio::test]
async fn loads_atlas_and_image_from_disk() -> Result<()> {
    // --- 1. Setup: a real sprite sheet and its image on disk ---
    let dir = tempdir()?;
    std::fs::create_dir(dir.path().join("assets"))?;
    std::fs::write(
        dir.path().join("assets/sheet.json"),
        r#"{"frames":{"a":{"frame":{"x":0,"y":0,"w":2,"h":2}},"b":{"frame":{"x":2,"y":0,"w":2,"h":2}}},"meta":{"image":"sheet.png"}}"#,
    )?;
    let mut png = Vec::new();
    RgbaImage::from_pixel(4, 2, Rgba([0, 0, 255, 255]))
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    std::fs::write(dir.path().join("assets/sheet.png"), png)?;

    // --- 2. Load ---
    let services = services(dir.path());
    let loader = ManifestLoader::new("assets/sheet.json", CrossOriginPolicy::SameOrigin, services.clone());
    let events = loader.subscribe();
    loader.load().await?;

    // --- 3. Assert ---
    let b = services.textures.get("b").context("frame b")?;
    assert_eq!(b.frame(), Rect::new(2.0, 0.0, 2.0, 2.0));
    let image = b.base().image().context("image decoded")?;
    assert_eq!((image.width, image.height), (4, 2));
    assert_eq!(events.try_iter().count(), 1);
    Ok(())
}

#[tokio::test]
async fn missing_local_manifest_fails_to_parse() -> Result<()> {
    // A local origin accepts the 404, so the empty body is what fails.
    let dir = tempdir()?;
    let loader = ManifestLoader::new("missing.json", CrossOriginPolicy::SameOrigin, services(dir.path()));

    let result = loader.load().await;

    assert!(matches!(result, Err(LoadError::ParseFailure(_))));
    Ok(())
}

#[tokio::test]
async fn missing_atlas_image_fails_the_load() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(
        dir.path().join("sheet.json"),
        r#"{"frames":{"a":{"frame":{"x":0,"y":0,"w":1,"h":1}}},"meta":{"image":"gone.png"}}"#,
    )?;
    let services = services(dir.path());
    let loader = ManifestLoader::new("sheet.json", CrossOriginPolicy::SameOrigin, services.clone());

    let result = loader.load().await;

    assert!(matches!(
        result,
        Err(LoadError::SecondaryLoadFailure { ref image, .. }) if image == "gone.png"
    ));
    assert!(services.textures.contains("a"));
    Ok(())
}
