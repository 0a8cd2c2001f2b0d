// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::debug;
use tubekit_core::{EntityId, EntityKind, User};
use tubekit_store::{EntityStore, UserPatch};

use crate::error::EngineError;

/// Input for registering a user.
///
/// The credential is an opaque string minted by the external authentication
/// collaborator; `avatar` and `cover_image` are opaque blob references.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub credential: String,
    pub avatar: String,
    pub cover_image: Option<String>,
}

/// Account registration and self-service profile commands.
#[derive(Clone, Debug)]
pub struct UserCommands<S> {
    store: S,
}

impl<S> UserCommands<S>
where
    S: EntityStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// Usernames and emails are unique case-insensitively; a clash is a
    /// `Conflict`.
    pub async fn register(&mut self, new: NewUser) -> Result<User, EngineError> {
        for (field, value) in [
            ("username", &new.username),
            ("email", &new.email),
            ("display name", &new.display_name),
            ("credential", &new.credential),
            ("avatar", &new.avatar),
        ] {
            if value.trim().is_empty() {
                return Err(EngineError::empty_field(field));
            }
        }

        if self
            .store
            .user_by_username(&new.username)
            .await
            .map_err(EngineError::storage)?
            .is_some()
        {
            return Err(EngineError::Conflict("username already taken".to_string()));
        }
        if self
            .store
            .user_by_email(&new.email)
            .await
            .map_err(EngineError::storage)?
            .is_some()
        {
            return Err(EngineError::Conflict("email already registered".to_string()));
        }

        let user = User::new(
            &new.username,
            &new.email,
            &new.display_name,
            &new.credential,
            &new.avatar,
            new.cover_image,
        );

        // The store re-checks uniqueness under its own lock.
        let inserted = self
            .store
            .insert_user(user.clone())
            .await
            .map_err(EngineError::storage)?;
        if !inserted {
            return Err(EngineError::Conflict("username already taken".to_string()));
        }

        debug!(user = %user.id, username = %user.username, "registered user");
        Ok(user)
    }

    /// Update the principal's own profile fields.
    pub async fn update_profile(
        &mut self,
        principal: &EntityId,
        patch: UserPatch,
    ) -> Result<User, EngineError> {
        if patch.is_empty() {
            return Err(EngineError::InvalidArgument(
                "no profile fields to update".to_string(),
            ));
        }

        if let Some(email) = &patch.email {
            if email.trim().is_empty() {
                return Err(EngineError::empty_field("email"));
            }
            let holder = self
                .store
                .user_by_email(email)
                .await
                .map_err(EngineError::storage)?;
            if holder.is_some_and(|user| &user.id != principal) {
                return Err(EngineError::Conflict("email already registered".to_string()));
            }
        }

        let updated = self
            .store
            .update_user(principal, &patch)
            .await
            .map_err(EngineError::storage)?;
        if !updated {
            return Err(EngineError::NotFound(EntityKind::User));
        }

        self.store
            .user_by_id(principal)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::User))
    }

    /// Delete the principal's own account.
    pub async fn delete_account(&mut self, principal: &EntityId) -> Result<(), EngineError> {
        let removed = self
            .store
            .delete_user(principal)
            .await
            .map_err(EngineError::storage)?;
        if !removed {
            return Err(EngineError::NotFound(EntityKind::User));
        }

        debug!(user = %principal, "deleted account");
        Ok(())
    }

    /// Record that the principal watched `video`: bumps the video's view
    /// counter and moves the video to the front of the watch history.
    pub async fn watch(
        &mut self,
        principal: &EntityId,
        video: &EntityId,
    ) -> Result<(), EngineError> {
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

        self.store
            .bump_views(video)
            .await
            .map_err(EngineError::storage)?;
        self.store
            .record_watch(principal, *video)
            .await
            .map_err(EngineError::storage)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tubekit_core::{EntityId, Video};
    use tubekit_store::{EntityStore, MemoryStore, UserPatch};

    use crate::error::EngineError;

    use super::{NewUser, UserCommands};

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.org"),
            display_name: username.to_string(),
            credential: "credential".to_string(),
            avatar: "blob://avatar".to_string(),
            cover_image: None,
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let mut commands = UserCommands::new(MemoryStore::new());

        commands.register(new_user("casey")).await.unwrap();

        let mut clash = new_user("CASEY");
        clash.email = "other@example.org".to_string();
        let result = commands.register(clash).await;
        assert!(matches!(result, Err(EngineError::Conflict(_))));
    }

    #[tokio::test]
    async fn register_rejects_empty_fields() {
        let mut commands = UserCommands::new(MemoryStore::new());

        let mut missing = new_user("casey");
        missing.avatar = "  ".to_string();
        let result = commands.register(missing).await;
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn update_profile_rejects_taken_email() {
        let store = MemoryStore::new();
        let mut commands = UserCommands::new(store);

        commands.register(new_user("casey")).await.unwrap();
        let other = commands.register(new_user("robin")).await.unwrap();

        let patch = UserPatch {
            email: Some("casey@example.org".to_string()),
            ..Default::default()
        };
        let result = commands.update_profile(&other.id, patch).await;
        assert!(matches!(result, Err(EngineError::Conflict(_))));
    }

    #[tokio::test]
    async fn watch_bumps_views_and_history() {
        let mut store = MemoryStore::new();
        let mut commands = UserCommands::new(store.clone());

        let viewer = commands.register(new_user("viewer")).await.unwrap();
        let video = Video::new(
            EntityId::random(),
            "Ride",
            "",
            "blob://m",
            "blob://t",
            9.0,
        );
        let video_id = video.id;
        store.insert_video(video).await.unwrap();

        commands.watch(&viewer.id, &video_id).await.unwrap();

        let video = store.video_by_id(&video_id).await.unwrap().unwrap();
        assert_eq!(video.views, 1);
        let viewer = store.user_by_id(&viewer.id).await.unwrap().unwrap();
        assert_eq!(viewer.watch_history, vec![video_id]);
    }
}
