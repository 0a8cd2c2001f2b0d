// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::kind::EntityKind;
use crate::owned::Owned;
use crate::time;

/// A named, owner-curated collection of videos.
///
/// Playlist names are unique per owner. The member videos are not a field on
/// the record: membership is a keyed `Edge::PlaylistEntry` relation, ordered
/// by insertion, so a video can never appear twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: EntityId,
    pub owner: EntityId,
    pub name: String,
    pub description: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Playlist {
    pub fn new(owner: EntityId, name: &str, description: &str) -> Self {
        let now = time::now();

        Self {
            id: EntityId::random(),
            owner,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Playlist {
    const KIND: EntityKind = EntityKind::Playlist;

    fn owner(&self) -> &EntityId {
        &self.owner
    }
}
