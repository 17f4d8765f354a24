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

// Vellum Sandbox
// Loads one manifest from disk and dumps what landed in the caches.
//
// Usage: sandbox <manifest> [root]

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use vellum_agents::manifest_agent::{LoaderConfig, LoaderEvent, LoaderServices, ManifestLoader};
use vellum_core::io::CrossOriginPolicy;
use vellum_infra::io::{DecodingImageLoader, FileTransport};

const CONFIG_FILE: &str = "loader.ron";

fn read_config() -> Result<LoaderConfig> {
    match std::fs::read_to_string(CONFIG_FILE) {
        Ok(text) => LoaderConfig::from_ron(&text)
            .with_context(|| format!("Failed to parse '{CONFIG_FILE}'")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No '{CONFIG_FILE}' found, using defaults.");
            Ok(LoaderConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read '{CONFIG_FILE}'")),
    }
}

/// Loads `manifest` from under `root`, prints the outcome and cache contents,
/// and fails when the load did.
async fn run(manifest: String, root: PathBuf, config: LoaderConfig) -> Result<()> {
    let transport = Arc::new(FileTransport::new(root));
    let images = Arc::new(DecodingImageLoader::new(transport.clone()));
    let services = LoaderServices::new(transport, images);

    let loader = ManifestLoader::new(manifest, CrossOriginPolicy::SameOrigin, services.clone())
        .with_config(config);
    let events = loader.subscribe();

    let outcome = loader.load().await;

    for event in events.try_iter() {
        match event {
            LoaderEvent::Loaded { content } => {
                println!("loaded '{}' ({:?})", content.location(), content.kind());
            }
            LoaderEvent::Error { content, reason } => {
                println!("failed '{}': {reason}", content.location());
            }
        }
    }

    let mut keys = services.textures.keys();
    keys.sort();
    for key in keys {
        if let Some(region) = services.textures.get(&key) {
            let frame = region.frame();
            println!(
                "texture '{key}': {}x{} at ({}, {}) from '{}'",
                frame.width,
                frame.height,
                frame.x,
                frame.y,
                region.base().source()
            );
        }
    }
    for key in services.rigs.keys() {
        if let Some(rig) = services.rigs.get(&key) {
            println!("rig '{key}': {} bones, {} slots", rig.bones.len(), rig.slots.len());
        }
    }

    outcome.with_context(|| format!("Failed to load '{}'", loader.request().location()))
}

#[tokio::main]
async fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let manifest = args
        .next()
        .context("usage: sandbox <manifest> [root]")?;
    let root = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    run(manifest, root, read_config()?).await
}
