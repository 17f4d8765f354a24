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

//! Provides the foundational traits and primitive types for Vellum's asset caches.
//!
//! This module defines the "common language" shared by the caches and the
//! loaders that fill them. It has no knowledge of how assets are fetched or
//! where they are stored.
//!
//! The key components are:
//! - The [`Asset`] trait: A marker for all types that can be cached.
//! - The [`AssetHandle`]: A cheap, shared reference to a cached asset.

mod handle;

pub use handle::*;

/// A marker trait for types that can be managed by the asset caches.
///
/// The supertraits enforce critical safety guarantees:
/// - `Send` + `Sync`: The asset type can be safely shared and sent between threads.
///   This is essential because loaders run as tasks on a multi-threaded runtime.
/// - `'static`: The asset type does not contain any non-static references, ensuring
///   it can be stored for the lifetime of the application.
///
/// # Examples
///
/// ```
/// use vellum_core::asset::Asset;
///
/// // A simple struct representing a sound clip.
/// struct Clip {
///     // ... fields
/// }
///
/// // By implementing Asset, `Clip` can now be stored in a cache.
/// impl Asset for Clip {}
/// ```
pub trait Asset: Send + Sync + 'static {}
