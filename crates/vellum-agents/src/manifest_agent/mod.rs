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

//! The manifest loader.
//!
//! A [`ManifestLoader`] fetches one manifest, classifies it and registers its
//! content into the shared caches, then announces the outcome with exactly one
//! [`LoaderEvent`]. Its lifecycle is tracked by the [`LoaderRequest`] carried in
//! every event:
//!
//! ```text
//! Idle --load()--> Loading --+--> Loaded
//!                            +--> Errored
//! ```
//!
//! Atlas manifests suspend twice (manifest fetch, then image fetch); rig and
//! generic manifests suspend once. Cache writes always happen before the
//! terminal event is published.

mod config;
mod error;
mod event;
mod loader;
mod request;

pub use self::config::LoaderConfig;
pub use self::error::LoadError;
pub use self::event::LoaderEvent;
pub use self::loader::{LoaderServices, ManifestLoader};
pub use self::request::{LoaderRequest, LoaderState};
