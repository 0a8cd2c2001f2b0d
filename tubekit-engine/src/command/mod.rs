// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mutating commands, gated by validation and the ownership guard.
//!
//! Each module owns the command surface of one entity kind. Commands
//! validate their inputs and the acting principal's rights before touching
//! the store, so a failed command never leaves a partial write behind.

pub mod comments;
pub mod playlists;
pub mod tweets;
pub mod users;
pub mod videos;

pub use comments::CommentCommands;
pub use playlists::PlaylistCommands;
pub use tweets::TweetCommands;
pub use users::{NewUser, UserCommands};
pub use videos::{NewVideo, VideoCommands};
