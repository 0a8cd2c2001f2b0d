// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::time;

/// A registered user, which doubles as a channel others can subscribe to.
///
/// `username` and `email` are stored lowercase so uniqueness and lookups are
/// case-insensitive. The `credential` is an opaque string produced by an
/// external authentication collaborator; the core never inspects it and no
/// view ever exposes it. `avatar` and `cover_image` are opaque references
/// into an external blob store, stored and returned verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub credential: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    /// Watched video ids, most recent first, deduplicated.
    pub watch_history: Vec<EntityId>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl User {
    pub fn new(
        username: &str,
        email: &str,
        display_name: &str,
        credential: &str,
        avatar: &str,
        cover_image: Option<String>,
    ) -> Self {
        let now = time::now();

        Self {
            id: EntityId::random(),
            username: username.trim().to_lowercase(),
            email: email.trim().to_lowercase(),
            display_name: display_name.trim().to_string(),
            credential: credential.to_string(),
            avatar: avatar.to_string(),
            cover_image,
            watch_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The restricted field subset safe to embed in any response.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Public projection of a user.
///
/// Every embedded owner, author or subscriber reference in a view uses this
/// shape. Credential and token material never appear here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: EntityId,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
}
