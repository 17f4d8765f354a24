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

//! Contracts for the collaborators that move bytes in and out of the loader.
//!
//! Nothing in this module performs I/O itself: concrete transports and image
//! loaders live in `vellum-infra`, and tests plug in in-memory doubles.

mod image;
mod location;
mod transport;

pub use self::image::{ImageLoadError, ImageLoader};
pub use self::location::{base_location, is_http_origin, resolve_sibling};
pub use self::transport::{
    CrossOriginPolicy, FetchRequest, FetchResponse, Method, Transport, TransportError,
};
