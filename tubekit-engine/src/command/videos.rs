// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::debug;
use tubekit_core::{EntityId, EntityKind, Video};
use tubekit_store::{EntityStore, VideoPatch};

use crate::error::EngineError;
use crate::guard::OwnershipGuard;

/// Input for publishing a video. `media` and `thumbnail` are opaque blob
/// references produced by the external storage collaborator.
#[derive(Clone, Debug)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub media: String,
    pub thumbnail: String,
    pub duration_secs: f64,
}

/// Owner-gated video commands.
#[derive(Clone, Debug)]
pub struct VideoCommands<S> {
    store: S,
    guard: OwnershipGuard<S>,
}

impl<S> VideoCommands<S>
where
    S: EntityStore,
{
    pub fn new(store: S) -> Self {
        Self {
            guard: OwnershipGuard::new(store.clone()),
            store,
        }
    }

    /// Publish a video under the principal's channel.
    pub async fn publish(
        &mut self,
        principal: &EntityId,
        new: NewVideo,
    ) -> Result<Video, EngineError> {
        if new.title.trim().is_empty() {
            return Err(EngineError::empty_field("title"));
        }
        if new.media.trim().is_empty() {
            return Err(EngineError::empty_field("media"));
        }
        if new.thumbnail.trim().is_empty() {
            return Err(EngineError::empty_field("thumbnail"));
        }
        self.store
            .user_by_id(principal)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::User))?;

        let video = Video::new(
            *principal,
            &new.title,
            &new.description,
            &new.media,
            &new.thumbnail,
            new.duration_secs,
        );
        self.store
            .insert_video(video.clone())
            .await
            .map_err(EngineError::storage)?;

        debug!(video = %video.id, owner = %principal, "published video");
        Ok(video)
    }

    /// Update a video's metadata.
    pub async fn update(
        &mut self,
        principal: &EntityId,
        id: &EntityId,
        patch: VideoPatch,
    ) -> Result<Video, EngineError> {
        if patch.is_empty() {
            return Err(EngineError::InvalidArgument(
                "no video fields to update".to_string(),
            ));
        }
        if patch.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(EngineError::empty_field("title"));
        }

        self.guard.video(id, principal).await?;

        self.store
            .update_video(id, &patch)
            .await
            .map_err(EngineError::storage)?;

        self.store
            .video_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::Video))
    }

    /// Delete a video.
    pub async fn delete(&mut self, principal: &EntityId, id: &EntityId) -> Result<(), EngineError> {
        self.guard.video(id, principal).await?;

        self.store
            .delete_video(id)
            .await
            .map_err(EngineError::storage)?;

        debug!(video = %id, "deleted video");
        Ok(())
    }

    /// Flip a video's published flag to an explicit value.
    pub async fn set_published(
        &mut self,
        principal: &EntityId,
        id: &EntityId,
        published: bool,
    ) -> Result<Video, EngineError> {
        self.guard.video(id, principal).await?;

        let patch = VideoPatch {
            published: Some(published),
            ..Default::default()
        };
        self.store
            .update_video(id, &patch)
            .await
            .map_err(EngineError::storage)?;

        self.store
            .video_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::Video))
    }
}
