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

use super::{LoadError, LoaderConfig, LoaderEvent, LoaderRequest, LoaderState};
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;
use vellum_core::{
    animation::RigParser,
    event::EventBus,
    io::{CrossOriginPolicy, FetchRequest, ImageLoader, Transport},
    texture::BaseTexture,
};
use vellum_data::assets::{AnimCache, TextureCache};
use vellum_lanes::asset_lane::{
    parse_tree, AtlasManifest, AtlasRegistrar, Manifest, RigRegistrar, SkeletonJsonParser,
};

/// Everything a loader talks to.
///
/// Cloning is cheap and every clone shares the same collaborators, caches and
/// event bus, so one `LoaderServices` can back any number of loaders.
#[derive(Clone)]
pub struct LoaderServices {
    /// Fetches manifests.
    pub transport: Arc<dyn Transport>,
    /// Fetches and decodes atlas images.
    pub images: Arc<dyn ImageLoader>,
    /// Converts rig trees into skeletons.
    pub rig_parser: Arc<dyn RigParser>,
    /// Receives atlas frames.
    pub textures: TextureCache,
    /// Receives parsed rigs.
    pub rigs: AnimCache,
    /// Receives lifecycle events.
    pub events: Arc<EventBus<LoaderEvent>>,
}

impl LoaderServices {
    /// Creates services with the default skeleton parser, fresh caches and a fresh event bus.
    pub fn new(transport: Arc<dyn Transport>, images: Arc<dyn ImageLoader>) -> Self {
        Self {
            transport,
            images,
            rig_parser: Arc::new(SkeletonJsonParser::new()),
            textures: TextureCache::new(),
            rigs: AnimCache::new(),
            events: Arc::new(EventBus::new()),
        }
    }

    /// Replaces the rig parser.
    pub fn with_rig_parser(mut self, rig_parser: Arc<dyn RigParser>) -> Self {
        self.rig_parser = rig_parser;
        self
    }

    /// Shares existing caches instead of fresh ones.
    pub fn with_caches(mut self, textures: TextureCache, rigs: AnimCache) -> Self {
        self.textures = textures;
        self.rigs = rigs;
        self
    }

    /// Publishes lifecycle events on an existing bus.
    pub fn with_events(mut self, events: Arc<EventBus<LoaderEvent>>) -> Self {
        self.events = events;
        self
    }
}

/// Loads one manifest and registers its content.
pub struct ManifestLoader {
    request: Arc<LoaderRequest>,
    services: LoaderServices,
    config: LoaderConfig,
}

impl ManifestLoader {
    /// Creates an idle loader for the manifest at `location`.
    pub fn new(
        location: impl Into<String>,
        cross_origin: CrossOriginPolicy,
        services: LoaderServices,
    ) -> Self {
        Self {
            request: Arc::new(LoaderRequest::new(location, cross_origin)),
            services,
            config: LoaderConfig::default(),
        }
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// The request driven by this loader.
    pub fn request(&self) -> &Arc<LoaderRequest> {
        &self.request
    }

    /// Registers an observer on the loader's event bus.
    ///
    /// The bus belongs to the [`LoaderServices`], so the receiver also gets the
    /// events of every other loader sharing them; filter on
    /// [`LoaderEvent::content`] to follow one request. Subscribe before calling
    /// [`Self::load`]; events are not replayed.
    pub fn subscribe(&self) -> flume::Receiver<LoaderEvent> {
        self.services.events.subscribe()
    }

    /// Runs [`Self::load`] as a task on the current tokio runtime.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<Result<(), LoadError>> {
        tokio::spawn(async move { self.load().await })
    }

    /// Fetches, classifies and registers the manifest, then publishes the
    /// terminal [`LoaderEvent`].
    ///
    /// The returned result mirrors the published event. Calling `load` a second
    /// time returns [`LoadError::AlreadyStarted`] without publishing anything and
    /// without affecting the first load.
    pub async fn load(&self) -> Result<(), LoadError> {
        self.request.begin()?;
        log::debug!("Loading manifest '{}'.", self.request.location());

        let outcome = self.run().await;
        self.finish(outcome)
    }

    async fn run(&self) -> Result<(), LoadError> {
        let location = self.request.location();
        let fetch = FetchRequest::get(location, self.request.cross_origin())
            .with_mime_override(self.config.manifest_mime_type.clone());

        let response = self.services.transport.fetch(&fetch).await?;
        if !self.config.accepts(self.services.transport.as_ref(), &response) {
            return Err(LoadError::TransportFailure {
                status: Some(response.status),
                details: format!("unexpected status for '{location}'"),
            });
        }

        let tree = Arc::new(parse_tree(&response.body)?);
        let manifest = Manifest::classify(&tree)?;
        self.request.record_manifest(Arc::clone(&tree), manifest.kind());
        log::debug!("Manifest '{location}' classified as {}.", manifest.kind());

        match manifest {
            Manifest::Atlas(atlas) => self.load_atlas(&atlas).await,
            Manifest::Rig => self.load_rig(&tree),
            Manifest::Generic => Ok(()),
        }
    }

    async fn load_atlas(&self, atlas: &AtlasManifest) -> Result<(), LoadError> {
        let image_location = atlas.image_location(self.request.base_location());
        let fetch = FetchRequest::get(image_location.clone(), self.request.cross_origin());
        let pending_image = self.services.images.load_image(&fetch);

        let base = Arc::new(BaseTexture::pending(image_location));
        self.request.record_texture(Arc::clone(&base));
        AtlasRegistrar::new(&self.services.textures).register(atlas, &base);

        let image = pending_image.await?;
        log::debug!(
            "Atlas image '{}' decoded ({}x{}).",
            base.source(),
            image.width,
            image.height
        );
        base.fulfill(image);
        Ok(())
    }

    fn load_rig(&self, tree: &Value) -> Result<(), LoadError> {
        RigRegistrar::new(self.services.rig_parser.as_ref(), &self.services.rigs)
            .register(self.request.location(), tree)?;
        Ok(())
    }

    fn finish(&self, outcome: Result<(), LoadError>) -> Result<(), LoadError> {
        let state = match outcome {
            Ok(()) => LoaderState::Loaded,
            Err(_) => LoaderState::Errored,
        };
        if !self.request.settle(state) {
            log::error!(
                "Manifest '{}' settled twice; dropping the second outcome.",
                self.request.location()
            );
            return outcome;
        }

        let content = Arc::clone(&self.request);
        let event = match &outcome {
            Ok(()) => {
                log::info!("Manifest '{}' loaded.", content.location());
                LoaderEvent::Loaded { content }
            }
            Err(reason) => {
                log::warn!("Manifest '{}' failed: {reason}", content.location());
                LoaderEvent::Error {
                    content,
                    reason: reason.clone(),
                }
            }
        };
        self.services.events.publish(event);
        outcome
    }
}
