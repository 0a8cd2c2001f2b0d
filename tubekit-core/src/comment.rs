// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::kind::EntityKind;
use crate::owned::Owned;
use crate::time;

/// A comment below a video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub author: EntityId,
    pub video: EntityId,
    pub content: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Comment {
    pub fn new(author: EntityId, video: EntityId, content: &str) -> Self {
        let now = time::now();

        Self {
            id: EntityId::random(),
            author,
            video,
            content: content.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Comment {
    const KIND: EntityKind = EntityKind::Comment;

    fn owner(&self) -> &EntityId {
        &self.author
    }
}
