// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only view composition over entities and edges.
//!
//! Every view is assembled from fresh store reads at query time: a root row,
//! at most one embedded related record per hop (always the owner's public
//! projection for user references), plus count and membership-flag
//! aggregates computed from edge rows. Nothing here writes, blocks writers
//! or promises snapshot consistency across its own store calls: a view
//! reflects whatever committed rows were visible while it was composed.
//! Edges or id sequences pointing at since-deleted entities are skipped.
use serde::{Deserialize, Serialize};
use tracing::warn;
use tubekit_core::{Edge, EntityId, EntityKind, LikeTarget, Playlist, UserProfile, Video};
use tubekit_store::{EdgeFilter, EdgeStore, EntityStore, VideoFilter};

use crate::error::EngineError;
use crate::page::{Page, VideoSort};

/// A user's channel page, as seen by an optional viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelProfile {
    pub user: UserProfile,
    pub cover_image: Option<String>,
    pub subscriber_count: u64,
    pub subscribed_to_count: u64,
    pub is_subscribed_by_viewer: bool,
}

/// Aggregate statistics for a channel owner's dashboard.
///
/// Every count defaults to zero for an empty channel; an all-zero result is
/// an answer, not an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub video_count: u64,
    pub total_views: u64,
    pub subscriber_count: u64,
    pub video_like_count: u64,
    pub comment_like_count: u64,
    pub tweet_like_count: u64,
}

/// A video with its owner's public projection embedded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoView {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub media: String,
    pub thumbnail: String,
    pub duration_secs: f64,
    pub views: u64,
    pub published: bool,
    pub created_at: u64,
    pub owner: UserProfile,
}

/// One page of a video listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoPage {
    pub items: Vec<VideoView>,
    pub page: usize,
    pub limit: usize,
}

/// A comment with its author's public projection embedded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: EntityId,
    pub content: String,
    pub created_at: u64,
    pub author: UserProfile,
}

/// One page of a video's comments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentPage {
    pub items: Vec<CommentView>,
    pub page: usize,
    pub limit: usize,
}

/// A tweet with its author's public projection embedded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweetView {
    pub id: EntityId,
    pub content: String,
    pub created_at: u64,
    pub author: UserProfile,
}

/// A playlist joined to its member videos and its owner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaylistView {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub created_at: u64,
    pub owner: UserProfile,
    pub videos: Vec<VideoView>,
}

/// Assembles derived, read-only projections from the entity and edge stores.
#[derive(Clone, Debug)]
pub struct ViewComposer<S> {
    store: S,
}

impl<S> ViewComposer<S>
where
    S: EntityStore + EdgeStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// A channel's public profile with its subscription aggregates.
    ///
    /// The username match is case-insensitive. `is_subscribed_by_viewer` is
    /// the membership flag for `viewer` and always false for anonymous
    /// queries.
    pub async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<&EntityId>,
    ) -> Result<ChannelProfile, EngineError> {
        let user = self
            .store
            .user_by_username(username)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::User))?;

        let subscriber_count = self
            .store
            .count_edges(&EdgeFilter::SubscribersOf { channel: user.id })
            .await
            .map_err(EngineError::storage)?;
        let subscribed_to_count = self
            .store
            .count_edges(&EdgeFilter::SubscriptionsBy { subscriber: user.id })
            .await
            .map_err(EngineError::storage)?;

        let is_subscribed_by_viewer = match viewer {
            Some(viewer) => self
                .store
                .has_edge(&Edge::Subscription {
                    subscriber: *viewer,
                    channel: user.id,
                })
                .await
                .map_err(EngineError::storage)?,
            None => false,
        };

        Ok(ChannelProfile {
            cover_image: user.cover_image.clone(),
            user: user.profile(),
            subscriber_count,
            subscribed_to_count,
            is_subscribed_by_viewer,
        })
    }

    /// Aggregate statistics for everything `owner` has published.
    pub async fn dashboard_stats(&self, owner: &EntityId) -> Result<DashboardStats, EngineError> {
        self.require_user(owner).await?;

        let videos = self
            .store
            .find_videos(&VideoFilter::by_owner(*owner))
            .await
            .map_err(EngineError::storage)?;
        let video_count = videos.len() as u64;
        let total_views = videos.iter().map(|video| video.views).sum();

        let subscriber_count = self
            .store
            .count_edges(&EdgeFilter::SubscribersOf { channel: *owner })
            .await
            .map_err(EngineError::storage)?;

        let mut video_like_count = 0;
        for video in &videos {
            video_like_count += self.likes_of(LikeTarget::Video(video.id)).await?;
        }

        let comments = self
            .store
            .comments_by_author(owner)
            .await
            .map_err(EngineError::storage)?;
        let mut comment_like_count = 0;
        for comment in &comments {
            comment_like_count += self.likes_of(LikeTarget::Comment(comment.id)).await?;
        }

        let tweets = self
            .store
            .tweets_by_author(owner)
            .await
            .map_err(EngineError::storage)?;
        let mut tweet_like_count = 0;
        for tweet in &tweets {
            tweet_like_count += self.likes_of(LikeTarget::Tweet(tweet.id)).await?;
        }

        Ok(DashboardStats {
            video_count,
            total_views,
            subscriber_count,
            video_like_count,
            comment_like_count,
            tweet_like_count,
        })
    }

    /// Videos the viewer has liked, in the order the likes were placed.
    pub async fn liked_videos(&self, viewer: &EntityId) -> Result<Vec<VideoView>, EngineError> {
        let likes = self
            .store
            .list_edges(&EdgeFilter::LikesBy {
                liker: *viewer,
                kind: Some(EntityKind::Video),
            })
            .await
            .map_err(EngineError::storage)?;

        let mut views = Vec::with_capacity(likes.len());
        for like in likes {
            let Edge::Like {
                target: LikeTarget::Video(video),
                ..
            } = like
            else {
                continue;
            };
            if let Some(view) = self.video_view(&video).await? {
                views.push(view);
            }
        }

        Ok(views)
    }

    /// A playlist joined to its videos and owner.
    pub async fn playlist(&self, id: &EntityId) -> Result<PlaylistView, EngineError> {
        let playlist = self
            .store
            .playlist_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::Playlist))?;

        self.playlist_view(playlist).await
    }

    /// All playlists of `owner`, each fully joined.
    ///
    /// An owner with no playlists at all is `NotFound`.
    pub async fn user_playlists(&self, owner: &EntityId) -> Result<Vec<PlaylistView>, EngineError> {
        let playlists = self
            .store
            .playlists_by_owner(owner)
            .await
            .map_err(EngineError::storage)?;

        if playlists.is_empty() {
            return Err(EngineError::NotFound(EntityKind::Playlist));
        }

        let mut views = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            views.push(self.playlist_view(playlist).await?);
        }

        Ok(views)
    }

    /// The user's watch history in stored order, most recent first.
    pub async fn watch_history(&self, user: &EntityId) -> Result<Vec<VideoView>, EngineError> {
        let user = self
            .store
            .user_by_id(user)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::User))?;

        let mut views = Vec::with_capacity(user.watch_history.len());
        for video in &user.watch_history {
            if let Some(view) = self.video_view(video).await? {
                views.push(view);
            }
        }

        Ok(views)
    }

    /// One page of the video catalogue, filtered by a free-text query.
    ///
    /// The query matches title or description as a case-insensitive
    /// substring; an empty query matches everything. Sorting happens before
    /// pagination so pages are stable under repeated queries.
    pub async fn list_videos(
        &self,
        query: &str,
        sort: VideoSort,
        page: Page,
    ) -> Result<VideoPage, EngineError> {
        let mut videos = self
            .store
            .find_videos(&VideoFilter::search(query))
            .await
            .map_err(EngineError::storage)?;
        sort.sort(&mut videos);

        let mut items = Vec::new();
        for video in page.apply(videos) {
            let id = video.id;
            match self.profile_of(&video.owner).await? {
                Some(owner) => items.push(embed_owner(video, owner)),
                None => warn!(video = %id, "skipping video with dangling owner"),
            }
        }

        Ok(VideoPage {
            items,
            page: page.page,
            limit: page.limit,
        })
    }

    /// A channel's own uploads, newest first.
    pub async fn channel_videos(&self, owner: &EntityId) -> Result<Vec<VideoView>, EngineError> {
        self.require_user(owner).await?;

        let mut videos = self
            .store
            .find_videos(&VideoFilter::by_owner(*owner))
            .await
            .map_err(EngineError::storage)?;
        VideoSort::default().sort(&mut videos);

        let mut views = Vec::with_capacity(videos.len());
        for video in videos {
            if let Some(owner) = self.profile_of(&video.owner).await? {
                views.push(embed_owner(video, owner));
            }
        }

        Ok(views)
    }

    /// One page of a video's comments, in the order they were added.
    pub async fn video_comments(
        &self,
        video: &EntityId,
        page: Page,
    ) -> Result<CommentPage, EngineError> {
        self.store
            .video_by_id(video)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(EntityKind::Video))?;

        let comments = self
            .store
            .comments_for_video(video)
            .await
            .map_err(EngineError::storage)?;

        let mut items = Vec::new();
        for comment in page.apply(comments) {
            let Some(author) = self.profile_of(&comment.author).await? else {
                continue;
            };
            items.push(CommentView {
                id: comment.id,
                content: comment.content,
                created_at: comment.created_at,
                author,
            });
        }

        Ok(CommentPage {
            items,
            page: page.page,
            limit: page.limit,
        })
    }

    /// Public projections of a channel's subscribers, in subscription order.
    ///
    /// A channel nobody subscribes to is `NotFound`.
    pub async fn subscribers(&self, channel: &EntityId) -> Result<Vec<UserProfile>, EngineError> {
        let edges = self
            .store
            .list_edges(&EdgeFilter::SubscribersOf { channel: *channel })
            .await
            .map_err(EngineError::storage)?;

        let mut profiles = Vec::with_capacity(edges.len());
        for edge in edges {
            let Edge::Subscription { subscriber, .. } = edge else {
                continue;
            };
            if let Some(profile) = self.profile_of(&subscriber).await? {
                profiles.push(profile);
            }
        }

        if profiles.is_empty() {
            return Err(EngineError::NotFound(EntityKind::User));
        }

        Ok(profiles)
    }

    /// Public projections of the channels a user subscribes to.
    ///
    /// A user subscribed to nothing is `NotFound`.
    pub async fn subscribed_channels(
        &self,
        subscriber: &EntityId,
    ) -> Result<Vec<UserProfile>, EngineError> {
        let edges = self
            .store
            .list_edges(&EdgeFilter::SubscriptionsBy {
                subscriber: *subscriber,
            })
            .await
            .map_err(EngineError::storage)?;

        let mut profiles = Vec::with_capacity(edges.len());
        for edge in edges {
            let Edge::Subscription { channel, .. } = edge else {
                continue;
            };
            if let Some(profile) = self.profile_of(&channel).await? {
                profiles.push(profile);
            }
        }

        if profiles.is_empty() {
            return Err(EngineError::NotFound(EntityKind::User));
        }

        Ok(profiles)
    }

    /// A user's tweets with the author projection embedded.
    ///
    /// A user with no tweets is `NotFound`.
    pub async fn user_tweets(&self, author: &EntityId) -> Result<Vec<TweetView>, EngineError> {
        let tweets = self
            .store
            .tweets_by_author(author)
            .await
            .map_err(EngineError::storage)?;

        if tweets.is_empty() {
            return Err(EngineError::NotFound(EntityKind::Tweet));
        }

        let author = self
            .profile_of(author)
            .await?
            .ok_or(EngineError::NotFound(EntityKind::User))?;

        Ok(tweets
            .into_iter()
            .map(|tweet| TweetView {
                id: tweet.id,
                content: tweet.content,
                created_at: tweet.created_at,
                author: author.clone(),
            })
            .collect())
    }

    async fn playlist_view(&self, playlist: Playlist) -> Result<PlaylistView, EngineError> {
        let owner = self
            .profile_of(&playlist.owner)
            .await?
            .ok_or(EngineError::NotFound(EntityKind::User))?;

        let entries = self
            .store
            .list_edges(&EdgeFilter::EntriesIn {
                playlist: playlist.id,
            })
            .await
            .map_err(EngineError::storage)?;

        let mut videos = Vec::with_capacity(entries.len());
        for entry in entries {
            let Edge::PlaylistEntry { video, .. } = entry else {
                continue;
            };
            if let Some(view) = self.video_view(&video).await? {
                videos.push(view);
            }
        }

        Ok(PlaylistView {
            id: playlist.id,
            name: playlist.name,
            description: playlist.description,
            created_at: playlist.created_at,
            owner,
            videos,
        })
    }

    /// A video joined to its owner's projection, or `None` when the video or
    /// its owner no longer exists.
    async fn video_view(&self, id: &EntityId) -> Result<Option<VideoView>, EngineError> {
        let Some(video) = self
            .store
            .video_by_id(id)
            .await
            .map_err(EngineError::storage)?
        else {
            return Ok(None);
        };

        let Some(owner) = self.profile_of(&video.owner).await? else {
            warn!(video = %id, "skipping video with dangling owner");
            return Ok(None);
        };

        Ok(Some(embed_owner(video, owner)))
    }

    async fn profile_of(&self, id: &EntityId) -> Result<Option<UserProfile>, EngineError> {
        Ok(self
            .store
            .user_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .map(|user| user.profile()))
    }

    async fn likes_of(&self, target: LikeTarget) -> Result<u64, EngineError> {
        self.store
            .count_edges(&EdgeFilter::LikesOf { target })
            .await
            .map_err(EngineError::storage)
    }

    async fn require_user(&self, id: &EntityId) -> Result<(), EngineError> {
        self.store
            .user_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .map(|_| ())
            .ok_or(EngineError::NotFound(EntityKind::User))
    }
}

fn embed_owner(video: Video, owner: UserProfile) -> VideoView {
    VideoView {
        id: video.id,
        title: video.title,
        description: video.description,
        media: video.media,
        thumbnail: video.thumbnail,
        duration_secs: video.duration_secs,
        views: video.views,
        published: video.published,
        created_at: video.created_at,
        owner,
    }
}

#[cfg(test)]
mod tests {
    use tubekit_core::{Edge, EntityId, EntityKind, LikeTarget, User, Video};
    use tubekit_store::{EdgeStore, EntityStore, MemoryStore};

    use crate::error::EngineError;
    use crate::page::Page;

    use super::ViewComposer;

    async fn insert_user(store: &mut MemoryStore, username: &str) -> EntityId {
        let user = User::new(
            username,
            &format!("{username}@example.org"),
            username,
            "credential",
            "blob://avatar",
            None,
        );
        let id = user.id;
        store.insert_user(user).await.unwrap();
        id
    }

    async fn insert_video(store: &mut MemoryStore, owner: EntityId, title: &str) -> EntityId {
        let video = Video::new(owner, title, "", "blob://media", "blob://thumb", 30.0);
        let id = video.id;
        store.insert_video(video).await.unwrap();
        id
    }

    #[tokio::test]
    async fn channel_profile_reports_membership_flag() {
        let mut store = MemoryStore::new();
        let channel = insert_user(&mut store, "creator").await;
        let viewer = insert_user(&mut store, "viewer").await;

        store
            .insert_edge(Edge::Subscription {
                subscriber: viewer,
                channel,
            })
            .await
            .unwrap();

        let composer = ViewComposer::new(store);

        let profile = composer
            .channel_profile("CREATOR", Some(&viewer))
            .await
            .unwrap();
        assert_eq!(profile.subscriber_count, 1);
        assert!(profile.is_subscribed_by_viewer);

        let anonymous = composer.channel_profile("creator", None).await.unwrap();
        assert!(!anonymous.is_subscribed_by_viewer);
    }

    #[tokio::test]
    async fn channel_profile_unknown_username_is_not_found() {
        let composer = ViewComposer::new(MemoryStore::new());

        let result = composer.channel_profile("nobody", None).await;
        assert!(matches!(
            result,
            Err(EngineError::NotFound(EntityKind::User))
        ));
    }

    #[tokio::test]
    async fn dashboard_of_empty_channel_is_all_zero() {
        let mut store = MemoryStore::new();
        let owner = insert_user(&mut store, "creator").await;

        let composer = ViewComposer::new(store);
        let stats = composer.dashboard_stats(&owner).await.unwrap();

        assert_eq!(stats, Default::default());
    }

    #[tokio::test]
    async fn liked_videos_follow_like_order_and_skip_deleted() {
        let mut store = MemoryStore::new();
        let creator = insert_user(&mut store, "creator").await;
        let viewer = insert_user(&mut store, "viewer").await;

        let first = insert_video(&mut store, creator, "first").await;
        let second = insert_video(&mut store, creator, "second").await;

        for video in [first, second] {
            store
                .insert_edge(Edge::Like {
                    liker: viewer,
                    target: LikeTarget::Video(video),
                })
                .await
                .unwrap();
        }
        store.delete_video(&first).await.unwrap();

        let composer = ViewComposer::new(store);
        let liked = composer.liked_videos(&viewer).await.unwrap();

        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].id, second);
        assert_eq!(liked[0].owner.username, "creator");
    }

    #[tokio::test]
    async fn watch_history_preserves_stored_order() {
        let mut store = MemoryStore::new();
        let creator = insert_user(&mut store, "creator").await;
        let viewer = insert_user(&mut store, "viewer").await;

        let first = insert_video(&mut store, creator, "first").await;
        let second = insert_video(&mut store, creator, "second").await;

        store.record_watch(&viewer, first).await.unwrap();
        store.record_watch(&viewer, second).await.unwrap();

        let composer = ViewComposer::new(store);
        let history = composer.watch_history(&viewer).await.unwrap();

        let ids: Vec<EntityId> = history.iter().map(|view| view.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn video_comments_are_paginated() {
        let mut store = MemoryStore::new();
        let creator = insert_user(&mut store, "creator").await;
        let video = insert_video(&mut store, creator, "ride").await;

        for n in 0..7 {
            store
                .insert_comment(tubekit_core::Comment::new(
                    creator,
                    video,
                    &format!("comment {n}"),
                ))
                .await
                .unwrap();
        }

        let composer = ViewComposer::new(store);

        let page = composer
            .video_comments(&video, Page::new(2, 5))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].content, "comment 5");
    }

    #[tokio::test]
    async fn user_playlists_empty_is_not_found() {
        let mut store = MemoryStore::new();
        let owner = insert_user(&mut store, "creator").await;

        let composer = ViewComposer::new(store);
        let result = composer.user_playlists(&owner).await;

        assert!(matches!(
            result,
            Err(EngineError::NotFound(EntityKind::Playlist))
        ));
    }
}
