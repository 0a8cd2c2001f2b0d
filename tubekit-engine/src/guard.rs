// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ownership checks for mutating commands.
use tubekit_core::{Comment, EntityId, Owned, Playlist, Tweet, Video};
use tubekit_store::EntityStore;

use crate::error::EngineError;

/// Authorizes mutations by comparing an entity's owner against the acting
/// principal.
///
/// The entity is always loaded fresh from the store immediately before the
/// check, never taken from a caller-held copy, so the decision is made
/// against current ownership data. The loaded entity is returned to the
/// caller, which also avoids a second lookup before the mutation itself.
#[derive(Clone, Debug)]
pub struct OwnershipGuard<S> {
    store: S,
}

impl<S> OwnershipGuard<S>
where
    S: EntityStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load a video and assert that `principal` owns it.
    pub async fn video(&self, id: &EntityId, principal: &EntityId) -> Result<Video, EngineError> {
        let video = self
            .store
            .video_by_id(id)
            .await
            .map_err(EngineError::storage)?;
        authorize(video, principal)
    }

    /// Load a comment and assert that `principal` authored it.
    pub async fn comment(
        &self,
        id: &EntityId,
        principal: &EntityId,
    ) -> Result<Comment, EngineError> {
        let comment = self
            .store
            .comment_by_id(id)
            .await
            .map_err(EngineError::storage)?;
        authorize(comment, principal)
    }

    /// Load a tweet and assert that `principal` authored it.
    pub async fn tweet(&self, id: &EntityId, principal: &EntityId) -> Result<Tweet, EngineError> {
        let tweet = self
            .store
            .tweet_by_id(id)
            .await
            .map_err(EngineError::storage)?;
        authorize(tweet, principal)
    }

    /// Load a playlist and assert that `principal` owns it.
    pub async fn playlist(
        &self,
        id: &EntityId,
        principal: &EntityId,
    ) -> Result<Playlist, EngineError> {
        let playlist = self
            .store
            .playlist_by_id(id)
            .await
            .map_err(EngineError::storage)?;
        authorize(playlist, principal)
    }
}

/// Identifiers are compared by value; a missing entity is `NotFound`, a
/// foreign one `Unauthorized`.
fn authorize<T: Owned>(entity: Option<T>, principal: &EntityId) -> Result<T, EngineError> {
    let entity = entity.ok_or(EngineError::NotFound(T::KIND))?;

    if entity.owner() != principal {
        return Err(EngineError::Unauthorized(T::KIND));
    }

    Ok(entity)
}

#[cfg(test)]
mod tests {
    use tubekit_core::{EntityId, EntityKind, Video};
    use tubekit_store::{EntityStore, MemoryStore};

    use crate::error::EngineError;

    use super::OwnershipGuard;

    #[tokio::test]
    async fn owner_passes_stranger_fails() {
        let mut store = MemoryStore::new();
        let owner = EntityId::random();
        let stranger = EntityId::random();

        let video = Video::new(owner, "Ride", "", "blob://m", "blob://t", 9.0);
        let video_id = video.id;
        store.insert_video(video).await.unwrap();

        let guard = OwnershipGuard::new(store);

        let loaded = guard.video(&video_id, &owner).await.unwrap();
        assert_eq!(loaded.id, video_id);

        let denied = guard.video(&video_id, &stranger).await;
        assert!(matches!(
            denied,
            Err(EngineError::Unauthorized(EntityKind::Video))
        ));
    }

    #[tokio::test]
    async fn missing_entity_is_not_found() {
        let guard = OwnershipGuard::new(MemoryStore::new());
        let principal = EntityId::random();

        let result = guard.playlist(&EntityId::random(), &principal).await;
        assert!(matches!(
            result,
            Err(EngineError::NotFound(EntityKind::Playlist))
        ));
    }
}
