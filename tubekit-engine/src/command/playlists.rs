// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::debug;
use tubekit_core::{Edge, EntityId, EntityKind, Playlist};
use tubekit_store::{EdgeFilter, EdgeStore, EntityStore, PlaylistPatch};

use crate::error::EngineError;
use crate::guard::OwnershipGuard;

/// Owner-gated playlist and membership commands.
///
/// Membership is a keyed edge, so adding a video twice can never produce a
/// duplicate row; the second add reports `Conflict`.
#[derive(Clone, Debug)]
pub struct PlaylistCommands<S> {
    store: S,
    guard: OwnershipGuard<S>,
}

impl<S> PlaylistCommands<S>
where
    S: EntityStore + EdgeStore,
{
    pub fn new(store: S) -> Self {
        Self {
            guard: OwnershipGuard::new(store.clone()),
            store,
        }
    }

    /// Create a playlist owned by the principal.
    ///
    /// Playlist names are unique per owner; a clash is a `Conflict`.
    pub async fn create(
        &mut self,
        principal: &EntityId,
        name: &str,
        description: &str,
    ) -> Result<Playlist, EngineError> {
        if name.trim().is_empty() {
            return Err(EngineError::empty_field("name"));
        }
        self.store
            .user_by_id(principal)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::User))?;

        if self
            .store
            .playlist_by_name(principal, name.trim())
            .await
            .map_err(EngineError::storage)?
            .is_some()
        {
            return Err(EngineError::Conflict(
                "playlist with this name already exists".to_string(),
            ));
        }

        let playlist = Playlist::new(*principal, name, description);
        self.store
            .insert_playlist(playlist.clone())
            .await
            .map_err(EngineError::storage)?;

        debug!(playlist = %playlist.id, owner = %principal, "created playlist");
        Ok(playlist)
    }

    /// Rename a playlist or update its description.
    pub async fn update(
        &mut self,
        principal: &EntityId,
        id: &EntityId,
        patch: PlaylistPatch,
    ) -> Result<Playlist, EngineError> {
        if patch.is_empty() {
            return Err(EngineError::InvalidArgument(
                "name or description is required".to_string(),
            ));
        }

        self.guard.playlist(id, principal).await?;

        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(EngineError::empty_field("name"));
            }
            let holder = self
                .store
                .playlist_by_name(principal, name.trim())
                .await
                .map_err(EngineError::storage)?;
            if holder.is_some_and(|playlist| &playlist.id != id) {
                return Err(EngineError::Conflict(
                    "playlist with this name already exists".to_string(),
                ));
            }
        }

        self.store
            .update_playlist(id, &patch)
            .await
            .map_err(EngineError::storage)?;

        self.store
            .playlist_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::Playlist))
    }

    /// Delete a playlist along with its membership edges.
    pub async fn delete(&mut self, principal: &EntityId, id: &EntityId) -> Result<(), EngineError> {
        self.guard.playlist(id, principal).await?;

        let entries = self
            .store
            .list_edges(&EdgeFilter::EntriesIn { playlist: *id })
            .await
            .map_err(EngineError::storage)?;
        for entry in &entries {
            self.store
                .delete_edge(entry)
                .await
                .map_err(EngineError::storage)?;
        }

        self.store
            .delete_playlist(id)
            .await
            .map_err(EngineError::storage)?;

        debug!(playlist = %id, entries = entries.len(), "deleted playlist");
        Ok(())
    }

    /// Append a video to a playlist.
    pub async fn add_video(
        &mut self,
        principal: &EntityId,
        playlist: &EntityId,
        video: &EntityId,
    ) -> Result<(), EngineError> {
        self.guard.playlist(playlist, principal).await?;
        self.store
            .video_by_id(video)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::Video))?;

        let inserted = self
            .store
            .insert_edge(Edge::PlaylistEntry {
                playlist: *playlist,
                video: *video,
            })
            .await
            .map_err(EngineError::storage)?;
        if !inserted {
            return Err(EngineError::Conflict(
                "video already in this playlist".to_string(),
            ));
        }

        Ok(())
    }

    /// Remove a video from a playlist.
    pub async fn remove_video(
        &mut self,
        principal: &EntityId,
        playlist: &EntityId,
        video: &EntityId,
    ) -> Result<(), EngineError> {
        self.guard.playlist(playlist, principal).await?;

        let removed = self
            .store
            .delete_edge(&Edge::PlaylistEntry {
                playlist: *playlist,
                video: *video,
            })
            .await
            .map_err(EngineError::storage)?;
        if !removed {
            return Err(EngineError::NotFound(EntityKind::Video));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tubekit_core::{EntityId, EntityKind, User, Video};
    use tubekit_store::{EntityStore, MemoryStore};

    use crate::error::EngineError;

    use super::PlaylistCommands;

    async fn fixture() -> (MemoryStore, EntityId, EntityId) {
        let mut store = MemoryStore::new();
        let user = User::new(
            "casey",
            "casey@example.org",
            "Casey",
            "credential",
            "blob://avatar",
            None,
        );
        let owner = user.id;
        store.insert_user(user).await.unwrap();

        let video = Video::new(owner, "Ride", "", "blob://m", "blob://t", 9.0);
        let video_id = video.id;
        store.insert_video(video).await.unwrap();

        (store, owner, video_id)
    }

    #[tokio::test]
    async fn duplicate_name_per_owner_is_a_conflict() {
        let (store, owner, _) = fixture().await;
        let mut commands = PlaylistCommands::new(store);

        commands.create(&owner, "Favorites", "").await.unwrap();
        let result = commands.create(&owner, "Favorites", "").await;
        assert!(matches!(result, Err(EngineError::Conflict(_))));
    }

    #[tokio::test]
    async fn second_add_of_the_same_video_conflicts() {
        let (store, owner, video) = fixture().await;
        let mut commands = PlaylistCommands::new(store);

        let playlist = commands.create(&owner, "Favorites", "").await.unwrap();

        commands.add_video(&owner, &playlist.id, &video).await.unwrap();
        let result = commands.add_video(&owner, &playlist.id, &video).await;
        assert!(matches!(result, Err(EngineError::Conflict(_))));
    }

    #[tokio::test]
    async fn only_the_owner_curates() {
        let (mut store, owner, video) = fixture().await;
        let stranger = User::new(
            "robin",
            "robin@example.org",
            "Robin",
            "credential",
            "blob://avatar",
            None,
        );
        let stranger_id = stranger.id;
        store.insert_user(stranger).await.unwrap();

        let mut commands = PlaylistCommands::new(store);
        let playlist = commands.create(&owner, "Favorites", "").await.unwrap();

        let result = commands.add_video(&stranger_id, &playlist.id, &video).await;
        assert!(matches!(
            result,
            Err(EngineError::Unauthorized(EntityKind::Playlist))
        ));
    }

    #[tokio::test]
    async fn removing_an_absent_video_is_not_found() {
        let (store, owner, video) = fixture().await;
        let mut commands = PlaylistCommands::new(store);

        let playlist = commands.create(&owner, "Favorites", "").await.unwrap();
        let result = commands.remove_video(&owner, &playlist.id, &video).await;
        assert!(matches!(
            result,
            Err(EngineError::NotFound(EntityKind::Video))
        ));
    }
}
