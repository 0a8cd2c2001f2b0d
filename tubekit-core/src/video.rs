// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::kind::EntityKind;
use crate::owned::Owned;
use crate::time;

/// A published video.
///
/// `media` and `thumbnail` are opaque blob-store references. The view
/// counter is bumped on watch and aggregated by the dashboard; it is never
/// maintained as a derived counter of other rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: EntityId,
    pub owner: EntityId,
    pub title: String,
    pub description: String,
    pub media: String,
    pub thumbnail: String,
    pub duration_secs: f64,
    pub views: u64,
    pub published: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Video {
    pub fn new(
        owner: EntityId,
        title: &str,
        description: &str,
        media: &str,
        thumbnail: &str,
        duration_secs: f64,
    ) -> Self {
        let now = time::now();

        Self {
            id: EntityId::random(),
            owner,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            media: media.to_string(),
            thumbnail: thumbnail.to_string(),
            duration_secs,
            views: 0,
            published: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Video {
    const KIND: EntityKind = EntityKind::Video;

    fn owner(&self) -> &EntityId {
        &self.owner
    }
}
