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

use super::{AtlasManifest, ManifestError};
use serde_json::Value;
use std::fmt;

/// The three shapes a manifest can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// A sprite-sheet atlas (`frames` present).
    Atlas,
    /// A skeletal-animation rig (`bones` present, no `frames`).
    Rig,
    /// Anything else.
    Generic,
}

impl ManifestKind {
    /// Classifies a parsed tree by probing for top-level fields.
    ///
    /// Rules are evaluated in order and the first match wins: `frames`, then
    /// `bones`, then generic. A field only counts when its value is truthy (see
    /// [`is_truthy`]), and a root that is not an object is always generic.
    pub fn of(tree: &Value) -> Self {
        let has = |field: &str| tree.get(field).is_some_and(is_truthy);
        if has("frames") {
            ManifestKind::Atlas
        } else if has("bones") {
            ManifestKind::Rig
        } else {
            ManifestKind::Generic
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestKind::Atlas => write!(f, "atlas"),
            ManifestKind::Rig => write!(f, "rig"),
            ManifestKind::Generic => write!(f, "generic"),
        }
    }
}

/// A classified manifest.
///
/// Atlases are fully decoded and validated here so that registration can never
/// fail half-way. Rig and generic manifests carry no payload: the rig parser
/// works on the original tree.
#[derive(Debug, Clone)]
pub enum Manifest {
    /// A decoded sprite-sheet atlas.
    Atlas(AtlasManifest),
    /// A skeletal rig, to be handed to a rig parser.
    Rig,
    /// Opaque data.
    Generic,
}

impl Manifest {
    /// Classifies `tree` and decodes its payload when it is an atlas.
    pub fn classify(tree: &Value) -> Result<Self, ManifestError> {
        let manifest = match ManifestKind::of(tree) {
            ManifestKind::Atlas => Manifest::Atlas(AtlasManifest::from_tree(tree)?),
            ManifestKind::Rig => Manifest::Rig,
            ManifestKind::Generic => Manifest::Generic,
        };
        log::trace!("Manifest classified as {}.", manifest.kind());
        Ok(manifest)
    }

    /// The kind of this manifest.
    pub fn kind(&self) -> ManifestKind {
        match self {
            Manifest::Atlas(_) => ManifestKind::Atlas,
            Manifest::Rig => ManifestKind::Rig,
            Manifest::Generic => ManifestKind::Generic,
        }
    }
}

/// Loose truthiness of a JSON value.
///
/// `null`, `false`, zero, `NaN` and the empty string are falsy. Everything else,
/// empty arrays and objects included, is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parses a raw manifest body into a generic JSON tree.
pub fn parse_tree(body: &[u8]) -> Result<Value, ManifestError> {
    let text = std::str::from_utf8(body)?;
    Ok(serde_json::from_str(text)?)
}
