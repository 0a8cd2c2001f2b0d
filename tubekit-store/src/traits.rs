// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for entity and edge persistence.
use std::fmt::{Debug, Display};

use tubekit_core::{Comment, Edge, EntityId, Playlist, Tweet, User, Video};

use crate::query::{EdgeFilter, PlaylistPatch, UserPatch, VideoFilter, VideoPatch};

/// Interface for storing, mutating and querying the five entity kinds.
///
/// Point lookups return `None` for an unknown identifier; writes report
/// whether they occurred as a `bool`. Listings follow insertion order.
///
/// Two variants of the trait are provided: one which is thread-safe
/// (implementing `Sync`) and one which is purely intended for
/// single-threaded execution contexts.
#[trait_variant::make(EntityStore: Send)]
pub trait LocalEntityStore: Clone {
    type Error: Display + Debug;

    /// Insert a user.
    ///
    /// Returns `true` when the insert occurred, or `false` when the
    /// identifier, username or email was already taken and no insertion
    /// occurred.
    async fn insert_user(&mut self, user: User) -> Result<bool, Self::Error>;

    /// Get a user by identifier.
    async fn user_by_id(&self, id: &EntityId) -> Result<Option<User>, Self::Error>;

    /// Get a user by username, case-insensitively.
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, Self::Error>;

    /// Get a user by email address, case-insensitively.
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, Self::Error>;

    /// Apply a partial update to a user.
    ///
    /// Returns `true` when the user existed and the patch was applied.
    async fn update_user(
        &mut self,
        id: &EntityId,
        patch: &UserPatch,
    ) -> Result<bool, Self::Error>;

    /// Delete a user.
    ///
    /// Returns `true` when the removal occurred and `false` when the user
    /// was not found in the store.
    async fn delete_user(&mut self, id: &EntityId) -> Result<bool, Self::Error>;

    /// Record `video` at the front of a user's watch history.
    ///
    /// An id already present in the history moves to the front; the history
    /// never contains duplicates. Returns `false` when the user was not
    /// found.
    async fn record_watch(
        &mut self,
        user: &EntityId,
        video: EntityId,
    ) -> Result<bool, Self::Error>;

    /// Insert a video.
    ///
    /// Returns `true` when the insert occurred, or `false` when a video with
    /// this identifier already existed and no insertion occurred.
    async fn insert_video(&mut self, video: Video) -> Result<bool, Self::Error>;

    /// Get a video by identifier.
    async fn video_by_id(&self, id: &EntityId) -> Result<Option<Video>, Self::Error>;

    /// Get all videos satisfying `filter`, in insertion order.
    async fn find_videos(&self, filter: &VideoFilter) -> Result<Vec<Video>, Self::Error>;

    /// Apply a partial update to a video.
    ///
    /// Returns `true` when the video existed and the patch was applied.
    async fn update_video(
        &mut self,
        id: &EntityId,
        patch: &VideoPatch,
    ) -> Result<bool, Self::Error>;

    /// Delete a video.
    ///
    /// Returns `true` when the removal occurred and `false` when the video
    /// was not found in the store.
    async fn delete_video(&mut self, id: &EntityId) -> Result<bool, Self::Error>;

    /// Increment a video's view counter by one, atomically.
    ///
    /// Returns `false` when the video was not found.
    async fn bump_views(&mut self, id: &EntityId) -> Result<bool, Self::Error>;

    /// Insert a comment.
    ///
    /// Returns `true` when the insert occurred, or `false` when a comment
    /// with this identifier already existed and no insertion occurred.
    async fn insert_comment(&mut self, comment: Comment) -> Result<bool, Self::Error>;

    /// Get a comment by identifier.
    async fn comment_by_id(&self, id: &EntityId) -> Result<Option<Comment>, Self::Error>;

    /// Get all comments below a video, in insertion order.
    async fn comments_for_video(&self, video: &EntityId) -> Result<Vec<Comment>, Self::Error>;

    /// Get all comments written by an author, in insertion order.
    async fn comments_by_author(&self, author: &EntityId) -> Result<Vec<Comment>, Self::Error>;

    /// Replace a comment's content.
    ///
    /// Returns `true` when the comment existed and was updated.
    async fn update_comment(
        &mut self,
        id: &EntityId,
        content: &str,
    ) -> Result<bool, Self::Error>;

    /// Delete a comment.
    ///
    /// Returns `true` when the removal occurred and `false` when the comment
    /// was not found in the store.
    async fn delete_comment(&mut self, id: &EntityId) -> Result<bool, Self::Error>;

    /// Insert a tweet.
    ///
    /// Returns `true` when the insert occurred, or `false` when a tweet with
    /// this identifier already existed and no insertion occurred.
    async fn insert_tweet(&mut self, tweet: Tweet) -> Result<bool, Self::Error>;

    /// Get a tweet by identifier.
    async fn tweet_by_id(&self, id: &EntityId) -> Result<Option<Tweet>, Self::Error>;

    /// Get all tweets posted by an author, in insertion order.
    async fn tweets_by_author(&self, author: &EntityId) -> Result<Vec<Tweet>, Self::Error>;

    /// Replace a tweet's content.
    ///
    /// Returns `true` when the tweet existed and was updated.
    async fn update_tweet(&mut self, id: &EntityId, content: &str) -> Result<bool, Self::Error>;

    /// Delete a tweet.
    ///
    /// Returns `true` when the removal occurred and `false` when the tweet
    /// was not found in the store.
    async fn delete_tweet(&mut self, id: &EntityId) -> Result<bool, Self::Error>;

    /// Insert a playlist.
    ///
    /// Returns `true` when the insert occurred, or `false` when a playlist
    /// with this identifier already existed and no insertion occurred.
    async fn insert_playlist(&mut self, playlist: Playlist) -> Result<bool, Self::Error>;

    /// Get a playlist by identifier.
    async fn playlist_by_id(&self, id: &EntityId) -> Result<Option<Playlist>, Self::Error>;

    /// Get all playlists of an owner, in insertion order.
    async fn playlists_by_owner(&self, owner: &EntityId) -> Result<Vec<Playlist>, Self::Error>;

    /// Get an owner's playlist by name, exact match.
    async fn playlist_by_name(
        &self,
        owner: &EntityId,
        name: &str,
    ) -> Result<Option<Playlist>, Self::Error>;

    /// Apply a partial update to a playlist.
    ///
    /// Returns `true` when the playlist existed and the patch was applied.
    async fn update_playlist(
        &mut self,
        id: &EntityId,
        patch: &PlaylistPatch,
    ) -> Result<bool, Self::Error>;

    /// Delete a playlist.
    ///
    /// Returns `true` when the removal occurred and `false` when the
    /// playlist was not found in the store.
    async fn delete_playlist(&mut self, id: &EntityId) -> Result<bool, Self::Error>;
}

/// Interface for storing, toggling and querying relation edges.
///
/// The edge value is its own composite key: a conforming implementation
/// never holds two rows for the same `Edge` value, no matter how writes
/// race. `toggle_edge` and `insert_edge` are required to be atomic
/// check-and-act primitives per key; a read-then-write emulation does not
/// satisfy this contract.
///
/// Two variants of the trait are provided: one which is thread-safe
/// (implementing `Sync`) and one which is purely intended for
/// single-threaded execution contexts.
#[trait_variant::make(EdgeStore: Send)]
pub trait LocalEdgeStore {
    type Error: Display + Debug;

    /// Flip the existence of an edge, atomically per key.
    ///
    /// Inserts the edge when absent and returns `true`; deletes it when
    /// present and returns `false`.
    async fn toggle_edge(&mut self, edge: Edge) -> Result<bool, Self::Error>;

    /// Insert an edge if its key is absent.
    ///
    /// Returns `true` when the insert occurred, or `false` when the edge
    /// already existed and no insertion occurred.
    async fn insert_edge(&mut self, edge: Edge) -> Result<bool, Self::Error>;

    /// Delete an edge.
    ///
    /// Returns `true` when the removal occurred and `false` when the edge
    /// was not found in the store.
    async fn delete_edge(&mut self, edge: &Edge) -> Result<bool, Self::Error>;

    /// Query the existence of an edge.
    async fn has_edge(&self, edge: &Edge) -> Result<bool, Self::Error>;

    /// Count the edges selected by `filter`.
    async fn count_edges(&self, filter: &EdgeFilter) -> Result<u64, Self::Error>;

    /// Get the edges selected by `filter`, in ascending insertion order.
    async fn list_edges(&self, filter: &EdgeFilter) -> Result<Vec<Edge>, Self::Error>;
}
