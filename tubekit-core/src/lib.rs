// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain data types for the tubekit content-platform backend.
//!
//! The platform is a social graph: users publish videos, comment on them,
//! post short tweets and curate playlists, while binary relation edges
//! (likes, subscriptions, playlist membership) connect the pieces. This crate
//! defines the entity records, the edge model and the public projection
//! embedded in read views. Persistence interfaces live in `tubekit-store`,
//! orchestration and view composition in `tubekit-engine`.

pub mod comment;
pub mod edge;
pub mod id;
pub mod kind;
pub mod owned;
pub mod playlist;
pub mod time;
pub mod tweet;
pub mod user;
pub mod video;

pub use comment::Comment;
pub use edge::{Edge, LikeTarget};
pub use id::{EntityId, IdError};
pub use kind::EntityKind;
pub use owned::Owned;
pub use playlist::Playlist;
pub use tweet::Tweet;
pub use user::{User, UserProfile};
pub use video::Video;
