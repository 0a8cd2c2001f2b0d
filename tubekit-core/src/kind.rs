// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five entity kinds stored by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    User,
    Video,
    Comment,
    Tweet,
    Playlist,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::User => "user",
            EntityKind::Video => "video",
            EntityKind::Comment => "comment",
            EntityKind::Tweet => "tweet",
            EntityKind::Playlist => "playlist",
        };

        write!(f, "{}", s)
    }
}
