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

//! # Vellum Lanes
//!
//! Synchronous, allocation-light logic on the loading hot path: deciding what a
//! manifest is and turning it into cache entries. Nothing here awaits or performs
//! I/O; the orchestration lives in `vellum-agents`.

#![warn(missing_docs)]

pub mod asset_lane;
