// SPDX-License-Identifier: MIT OR Apache-2.0

//! Create-or-remove toggling of relation edges.
use serde::{Deserialize, Serialize};
use tracing::debug;
use tubekit_core::{Edge, EntityId, EntityKind, LikeTarget};
use tubekit_store::{EdgeStore, EntityStore};

use crate::error::EngineError;

/// Which way a toggle flipped the edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleState {
    Created,
    Removed,
}

/// Result of a toggle: the direction of the flip and the edge it applied to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub state: ToggleState,
    pub edge: Edge,
}

/// Orchestrates the create-or-delete of a single relation edge.
///
/// Validation happens up front; the flip itself is one call into the edge
/// store's atomic `toggle_edge` primitive, so two racing toggles on the same
/// (actor, target) pair serialize there and can never leave a duplicate row.
/// No derived counters are maintained anywhere; subscriber and like counts
/// are computed on read by the view composer.
#[derive(Clone, Debug)]
pub struct ToggleCoordinator<S> {
    store: S,
}

impl<S> ToggleCoordinator<S>
where
    S: EntityStore + EdgeStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Like `target` as `actor`, or remove the existing like.
    ///
    /// `principal` is the authenticated caller and must equal `actor`.
    pub async fn toggle_like(
        &mut self,
        principal: &EntityId,
        actor: &EntityId,
        target: LikeTarget,
    ) -> Result<ToggleOutcome, EngineError> {
        if principal != actor {
            return Err(EngineError::Unauthorized(EntityKind::User));
        }

        self.require_user(actor).await?;
        self.require_target(&target).await?;

        self.flip(Edge::Like {
            liker: *actor,
            target,
        })
        .await
    }

    /// Subscribe `actor` to `channel`, or remove the existing subscription.
    ///
    /// `principal` is the authenticated caller and must equal `actor`.
    /// Subscribing to one's own channel is rejected before any edge is
    /// touched.
    pub async fn toggle_subscription(
        &mut self,
        principal: &EntityId,
        actor: &EntityId,
        channel: &EntityId,
    ) -> Result<ToggleOutcome, EngineError> {
        if principal != actor {
            return Err(EngineError::Unauthorized(EntityKind::User));
        }

        if actor == channel {
            return Err(EngineError::InvalidArgument(
                "cannot subscribe to own channel".to_string(),
            ));
        }

        self.require_user(actor).await?;
        self.require_user(channel).await?;

        self.flip(Edge::Subscription {
            subscriber: *actor,
            channel: *channel,
        })
        .await
    }

    async fn flip(&mut self, edge: Edge) -> Result<ToggleOutcome, EngineError> {
        let created = self
            .store
            .toggle_edge(edge.clone())
            .await
            .map_err(EngineError::storage)?;

        let state = if created {
            ToggleState::Created
        } else {
            ToggleState::Removed
        };
        debug!(?state, ?edge, "toggled relation edge");

        Ok(ToggleOutcome { state, edge })
    }

    async fn require_user(&self, id: &EntityId) -> Result<(), EngineError> {
        self.store
            .user_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .map(|_| ())
            .ok_or(EngineError::NotFound(EntityKind::User))
    }

    async fn require_target(&self, target: &LikeTarget) -> Result<(), EngineError> {
        let found = match target {
            LikeTarget::Video(id) => self
                .store
                .video_by_id(id)
                .await
                .map_err(EngineError::storage)?
                .is_some(),
            LikeTarget::Comment(id) => self
                .store
                .comment_by_id(id)
                .await
                .map_err(EngineError::storage)?
                .is_some(),
            LikeTarget::Tweet(id) => self
                .store
                .tweet_by_id(id)
                .await
                .map_err(EngineError::storage)?
                .is_some(),
        };

        if !found {
            return Err(EngineError::NotFound(target.kind()));
        }

        Ok(())
    }
}
