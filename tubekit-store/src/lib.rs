// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces and implementations of persistence layers for tubekit entities
//! and relation edges.
//!
//! The two trait interfaces split the durable state the way the domain does:
//! [`EntityStore`] holds the five keyed entity kinds, [`EdgeStore`] holds the
//! binary relation edges between them. Higher layers (`tubekit-engine`) are
//! generic over both and never assume a concrete backend.
//!
//! The contract every backend must honour, beyond the per-method docs:
//!
//! - every single-row write (insert, delete, patch, counter bump) is atomic;
//! - [`EdgeStore::toggle_edge`] and [`EdgeStore::insert_edge`] are atomic
//!   check-and-act primitives per edge key, so racing writers can never
//!   produce a duplicate edge row;
//! - edge enumeration follows insertion order, which doubles as the
//!   creation-time order views rely on.
//!
//! An in-memory implementation is provided in the form of a [`MemoryStore`]
//! which implements both traits and serves as the reference for the
//! concurrency semantics above.

pub mod memory;
pub mod query;
pub mod traits;

pub use memory::MemoryStore;
pub use query::{EdgeFilter, PlaylistPatch, UserPatch, VideoFilter, VideoPatch};
pub use traits::{EdgeStore, EntityStore, LocalEdgeStore, LocalEntityStore};
