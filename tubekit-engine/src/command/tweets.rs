// SPDX-License-Identifier: MIT OR Apache-2.0

use tubekit_core::{EntityId, EntityKind, Tweet};
use tubekit_store::EntityStore;

use crate::error::EngineError;
use crate::guard::OwnershipGuard;

/// Author-gated tweet commands.
#[derive(Clone, Debug)]
pub struct TweetCommands<S> {
    store: S,
    guard: OwnershipGuard<S>,
}

impl<S> TweetCommands<S>
where
    S: EntityStore,
{
    pub fn new(store: S) -> Self {
        Self {
            guard: OwnershipGuard::new(store.clone()),
            store,
        }
    }

    /// Post a tweet as the principal.
    pub async fn post(&mut self, principal: &EntityId, content: &str) -> Result<Tweet, EngineError> {
        if content.trim().is_empty() {
            return Err(EngineError::empty_field("content"));
        }
        self.store
            .user_by_id(principal)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::User))?;

        let tweet = Tweet::new(*principal, content);
        self.store
            .insert_tweet(tweet.clone())
            .await
            .map_err(EngineError::storage)?;

        Ok(tweet)
    }

    /// Replace the content of the principal's own tweet.
    pub async fn edit(
        &mut self,
        principal: &EntityId,
        id: &EntityId,
        content: &str,
    ) -> Result<Tweet, EngineError> {
        if content.trim().is_empty() {
            return Err(EngineError::empty_field("content"));
        }

        self.guard.tweet(id, principal).await?;

        self.store
            .update_tweet(id, content)
            .await
            .map_err(EngineError::storage)?;

        self.store
            .tweet_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::Tweet))
    }

    /// Delete the principal's own tweet.
    pub async fn remove(&mut self, principal: &EntityId, id: &EntityId) -> Result<(), EngineError> {
        self.guard.tweet(id, principal).await?;

        self.store
            .delete_tweet(id)
            .await
            .map_err(EngineError::storage)?;

        Ok(())
    }
}
