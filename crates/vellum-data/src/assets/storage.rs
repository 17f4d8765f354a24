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

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use vellum_core::{
    animation::SkeletonData,
    asset::{Asset, AssetHandle},
    texture::TextureRegion,
};

/// The minimal key-value interface a loader needs from a cache.
pub trait AssetStore<A: Asset>: Send + Sync {
    /// Retrieves the handle stored under `key`.
    fn get(&self, key: &str) -> Option<AssetHandle<A>>;

    /// Stores `handle` under `key`, replacing any previous entry.
    fn set(&self, key: String, handle: AssetHandle<A>);
}

/// A shared, string-keyed asset cache.
///
/// Cloning a `Cache` yields another reference to the same underlying map.
/// Writes are last-write-wins and nothing is ever evicted.
///
/// Loaders run as tasks on a multi-threaded runtime, so every access goes
/// through an `RwLock`.
pub struct Cache<A: Asset> {
    storage: Arc<RwLock<HashMap<String, AssetHandle<A>>>>,
}

/// Atlas frames, keyed by frame name.
pub type TextureCache = Cache<TextureRegion>;

/// Parsed rigs, keyed by the location of the manifest they came from.
pub type AnimCache = Cache<SkeletonData>;

impl<A: Asset> Cache<A> {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Inserts a handle, replacing any entry with the same key.
    ///
    /// Returns the handle that was replaced, if any.
    pub fn insert(&self, key: impl Into<String>, handle: AssetHandle<A>) -> Option<AssetHandle<A>> {
        self.write().insert(key.into(), handle)
    }

    /// Retrieves a clone of the handle stored under `key`.
    pub fn get(&self, key: &str) -> Option<AssetHandle<A>> {
        self.read().get(key).cloned()
    }

    /// Checks whether an entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// A snapshot of all keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Returns `true` if both values refer to the same underlying cache.
    pub fn same_cache(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    // A poisoned lock only means another writer panicked between two complete
    // `HashMap` operations; the map itself is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, AssetHandle<A>>> {
        self.storage
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, AssetHandle<A>>> {
        self.storage
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<A: Asset> AssetStore<A> for Cache<A> {
    fn get(&self, key: &str) -> Option<AssetHandle<A>> {
        Cache::get(self, key)
    }

    fn set(&self, key: String, handle: AssetHandle<A>) {
        if self.insert(key.clone(), handle).is_some() {
            log::debug!("Cache entry '{key}' overwritten.");
        }
    }
}

impl<A: Asset> Clone for Cache<A> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<A: Asset> Default for Cache<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Asset> fmt::Debug for Cache<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("entries", &self.len())
            .finish()
    }
}
