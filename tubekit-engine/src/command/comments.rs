// SPDX-License-Identifier: MIT OR Apache-2.0

use tubekit_core::{Comment, EntityId, EntityKind};
use tubekit_store::EntityStore;

use crate::error::EngineError;
use crate::guard::OwnershipGuard;

/// Author-gated comment commands.
#[derive(Clone, Debug)]
pub struct CommentCommands<S> {
    store: S,
    guard: OwnershipGuard<S>,
}

impl<S> CommentCommands<S>
where
    S: EntityStore,
{
    pub fn new(store: S) -> Self {
        Self {
            guard: OwnershipGuard::new(store.clone()),
            store,
        }
    }

    /// Comment on a video as the principal.
    pub async fn add(
        &mut self,
        principal: &EntityId,
        video: &EntityId,
        content: &str,
    ) -> Result<Comment, EngineError> {
        if content.trim().is_empty() {
            return Err(EngineError::empty_field("content"));
        }
        self.store
            .user_by_id(principal)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::User))?;
        self.store
            .video_by_id(video)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::Video))?;

        let comment = Comment::new(*principal, *video, content);
        self.store
            .insert_comment(comment.clone())
            .await
            .map_err(EngineError::storage)?;

        Ok(comment)
    }

    /// Replace the content of the principal's own comment.
    pub async fn edit(
        &mut self,
        principal: &EntityId,
        id: &EntityId,
        content: &str,
    ) -> Result<Comment, EngineError> {
        if content.trim().is_empty() {
            return Err(EngineError::empty_field("content"));
        }

        self.guard.comment(id, principal).await?;

        self.store
            .update_comment(id, content)
            .await
            .map_err(EngineError::storage)?;

        self.store
            .comment_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::Comment))
    }

    /// Delete the principal's own comment.
    pub async fn remove(&mut self, principal: &EntityId, id: &EntityId) -> Result<(), EngineError> {
        self.guard.comment(id, principal).await?;

        self.store
            .delete_comment(id)
            .await
            .map_err(EngineError::storage)?;

        Ok(())
    }
}
