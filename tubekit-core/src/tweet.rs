// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::kind::EntityKind;
use crate::owned::Owned;
use crate::time;

/// A short text post on a user's channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: EntityId,
    pub author: EntityId,
    pub content: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Tweet {
    pub fn new(author: EntityId, content: &str) -> Self {
        let now = time::now();

        Self {
            id: EntityId::random(),
            author,
            content: content.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Tweet {
    const KIND: EntityKind = EntityKind::Tweet;

    fn owner(&self) -> &EntityId {
        &self.author
    }
}
