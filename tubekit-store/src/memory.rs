// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory persistence for tubekit entities and relation edges.
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tubekit_core::{Comment, Edge, EntityId, Playlist, Tweet, User, Video, time};

use crate::query::{EdgeFilter, PlaylistPatch, UserPatch, VideoFilter, VideoPatch};
use crate::traits::{EdgeStore, EntityStore};

type SeqNum = u64;
type Timestamp = u64;

/// Record plus the monotonic insertion sequence number used to keep listings
/// in creation order.
type Stored<T> = (SeqNum, T);
type EdgeMeta = (SeqNum, Timestamp);

/// An in-memory store for all tubekit entity kinds and edges.
#[derive(Debug)]
pub struct InnerMemoryStore {
    users: HashMap<EntityId, Stored<User>>,
    usernames: HashMap<String, EntityId>,
    emails: HashMap<String, EntityId>,
    videos: HashMap<EntityId, Stored<Video>>,
    comments: HashMap<EntityId, Stored<Comment>>,
    tweets: HashMap<EntityId, Stored<Tweet>>,
    playlists: HashMap<EntityId, Stored<Playlist>>,
    edges: HashMap<Edge, EdgeMeta>,
    seq: SeqNum,
}

impl InnerMemoryStore {
    fn next_seq(&mut self) -> SeqNum {
        self.seq += 1;
        self.seq
    }
}

/// An in-memory store implementing both `EntityStore` and `EdgeStore`.
///
/// `MemoryStore` supports usage in asynchronous and multi-threaded contexts
/// by wrapping an `InnerMemoryStore` with an `RwLock` and `Arc`; clones share
/// state. Every trait method takes the lock exactly once, which is what makes
/// single-row writes (and in particular the `toggle_edge` check-and-flip)
/// atomic with respect to each other.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    inner: Arc<RwLock<InnerMemoryStore>>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        let inner = InnerMemoryStore {
            users: HashMap::new(),
            usernames: HashMap::new(),
            emails: HashMap::new(),
            videos: HashMap::new(),
            comments: HashMap::new(),
            tweets: HashMap::new(),
            playlists: HashMap::new(),
            edges: HashMap::new(),
            seq: 0,
        };

        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Obtain a read-lock on the store.
    fn read_store(&self) -> RwLockReadGuard<'_, InnerMemoryStore> {
        self.inner
            .read()
            .expect("acquire shared read access on store")
    }

    /// Obtain a write-lock on the store.
    fn write_store(&self) -> RwLockWriteGuard<'_, InnerMemoryStore> {
        self.inner
            .write()
            .expect("acquire exclusive write access on store")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Clone the stored values matching `predicate`, in insertion order.
fn collect_ordered<T: Clone>(
    rows: &HashMap<EntityId, Stored<T>>,
    predicate: impl Fn(&T) -> bool,
) -> Vec<T> {
    let mut matching: Vec<&Stored<T>> = rows
        .values()
        .filter(|(_, row)| predicate(row))
        .collect();
    matching.sort_by_key(|(seq, _)| *seq);
    matching.into_iter().map(|(_, row)| row.clone()).collect()
}

impl EntityStore for MemoryStore {
    type Error = Infallible;

    async fn insert_user(&mut self, user: User) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        if store.users.contains_key(&user.id)
            || store.usernames.contains_key(&user.username)
            || store.emails.contains_key(&user.email)
        {
            return Ok(false);
        }

        let seq = store.next_seq();
        store.usernames.insert(user.username.clone(), user.id);
        store.emails.insert(user.email.clone(), user.id);
        store.users.insert(user.id, (seq, user));

        Ok(true)
    }

    async fn user_by_id(&self, id: &EntityId) -> Result<Option<User>, Self::Error> {
        Ok(self.read_store().users.get(id).map(|(_, user)| user.clone()))
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, Self::Error> {
        let store = self.read_store();
        let Some(id) = store.usernames.get(&username.trim().to_lowercase()) else {
            return Ok(None);
        };
        Ok(store.users.get(id).map(|(_, user)| user.clone()))
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, Self::Error> {
        let store = self.read_store();
        let Some(id) = store.emails.get(&email.trim().to_lowercase()) else {
            return Ok(None);
        };
        Ok(store.users.get(id).map(|(_, user)| user.clone()))
    }

    async fn update_user(
        &mut self,
        id: &EntityId,
        patch: &UserPatch,
    ) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some((_, user)) = store.users.get_mut(id) else {
            return Ok(false);
        };

        let old_email = user.email.clone();
        patch.apply(user);
        let new_email = user.email.clone();

        if old_email != new_email {
            store.emails.remove(&old_email);
            store.emails.insert(new_email, *id);
        }

        Ok(true)
    }

    async fn delete_user(&mut self, id: &EntityId) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some((_, user)) = store.users.remove(id) else {
            return Ok(false);
        };
        store.usernames.remove(&user.username);
        store.emails.remove(&user.email);

        Ok(true)
    }

    async fn record_watch(
        &mut self,
        user: &EntityId,
        video: EntityId,
    ) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some((_, user)) = store.users.get_mut(user) else {
            return Ok(false);
        };
        user.watch_history.retain(|id| id != &video);
        user.watch_history.insert(0, video);
        user.updated_at = time::now();

        Ok(true)
    }

    async fn insert_video(&mut self, video: Video) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        if store.videos.contains_key(&video.id) {
            return Ok(false);
        }

        let seq = store.next_seq();
        store.videos.insert(video.id, (seq, video));

        Ok(true)
    }

    async fn video_by_id(&self, id: &EntityId) -> Result<Option<Video>, Self::Error> {
        Ok(self
            .read_store()
            .videos
            .get(id)
            .map(|(_, video)| video.clone()))
    }

    async fn find_videos(&self, filter: &VideoFilter) -> Result<Vec<Video>, Self::Error> {
        Ok(collect_ordered(&self.read_store().videos, |video| {
            filter.matches(video)
        }))
    }

    async fn update_video(
        &mut self,
        id: &EntityId,
        patch: &VideoPatch,
    ) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some((_, video)) = store.videos.get_mut(id) else {
            return Ok(false);
        };
        patch.apply(video);

        Ok(true)
    }

    async fn delete_video(&mut self, id: &EntityId) -> Result<bool, Self::Error> {
        Ok(self.write_store().videos.remove(id).is_some())
    }

    async fn bump_views(&mut self, id: &EntityId) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some((_, video)) = store.videos.get_mut(id) else {
            return Ok(false);
        };
        video.views += 1;
        video.updated_at = time::now();

        Ok(true)
    }

    async fn insert_comment(&mut self, comment: Comment) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        if store.comments.contains_key(&comment.id) {
            return Ok(false);
        }

        let seq = store.next_seq();
        store.comments.insert(comment.id, (seq, comment));

        Ok(true)
    }

    async fn comment_by_id(&self, id: &EntityId) -> Result<Option<Comment>, Self::Error> {
        Ok(self
            .read_store()
            .comments
            .get(id)
            .map(|(_, comment)| comment.clone()))
    }

    async fn comments_for_video(&self, video: &EntityId) -> Result<Vec<Comment>, Self::Error> {
        Ok(collect_ordered(&self.read_store().comments, |comment| {
            &comment.video == video
        }))
    }

    async fn comments_by_author(&self, author: &EntityId) -> Result<Vec<Comment>, Self::Error> {
        Ok(collect_ordered(&self.read_store().comments, |comment| {
            &comment.author == author
        }))
    }

    async fn update_comment(
        &mut self,
        id: &EntityId,
        content: &str,
    ) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some((_, comment)) = store.comments.get_mut(id) else {
            return Ok(false);
        };
        comment.content = content.trim().to_string();
        comment.updated_at = time::now();

        Ok(true)
    }

    async fn delete_comment(&mut self, id: &EntityId) -> Result<bool, Self::Error> {
        Ok(self.write_store().comments.remove(id).is_some())
    }

    async fn insert_tweet(&mut self, tweet: Tweet) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        if store.tweets.contains_key(&tweet.id) {
            return Ok(false);
        }

        let seq = store.next_seq();
        store.tweets.insert(tweet.id, (seq, tweet));

        Ok(true)
    }

    async fn tweet_by_id(&self, id: &EntityId) -> Result<Option<Tweet>, Self::Error> {
        Ok(self
            .read_store()
            .tweets
            .get(id)
            .map(|(_, tweet)| tweet.clone()))
    }

    async fn tweets_by_author(&self, author: &EntityId) -> Result<Vec<Tweet>, Self::Error> {
        Ok(collect_ordered(&self.read_store().tweets, |tweet| {
            &tweet.author == author
        }))
    }

    async fn update_tweet(&mut self, id: &EntityId, content: &str) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some((_, tweet)) = store.tweets.get_mut(id) else {
            return Ok(false);
        };
        tweet.content = content.trim().to_string();
        tweet.updated_at = time::now();

        Ok(true)
    }

    async fn delete_tweet(&mut self, id: &EntityId) -> Result<bool, Self::Error> {
        Ok(self.write_store().tweets.remove(id).is_some())
    }

    async fn insert_playlist(&mut self, playlist: Playlist) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        if store.playlists.contains_key(&playlist.id) {
            return Ok(false);
        }

        let seq = store.next_seq();
        store.playlists.insert(playlist.id, (seq, playlist));

        Ok(true)
    }

    async fn playlist_by_id(&self, id: &EntityId) -> Result<Option<Playlist>, Self::Error> {
        Ok(self
            .read_store()
            .playlists
            .get(id)
            .map(|(_, playlist)| playlist.clone()))
    }

    async fn playlists_by_owner(&self, owner: &EntityId) -> Result<Vec<Playlist>, Self::Error> {
        Ok(collect_ordered(&self.read_store().playlists, |playlist| {
            &playlist.owner == owner
        }))
    }

    async fn playlist_by_name(
        &self,
        owner: &EntityId,
        name: &str,
    ) -> Result<Option<Playlist>, Self::Error> {
        Ok(self
            .read_store()
            .playlists
            .values()
            .find(|(_, playlist)| &playlist.owner == owner && playlist.name == name)
            .map(|(_, playlist)| playlist.clone()))
    }

    async fn update_playlist(
        &mut self,
        id: &EntityId,
        patch: &PlaylistPatch,
    ) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some((_, playlist)) = store.playlists.get_mut(id) else {
            return Ok(false);
        };
        patch.apply(playlist);

        Ok(true)
    }

    async fn delete_playlist(&mut self, id: &EntityId) -> Result<bool, Self::Error> {
        Ok(self.write_store().playlists.remove(id).is_some())
    }
}

impl EdgeStore for MemoryStore {
    type Error = Infallible;

    async fn toggle_edge(&mut self, edge: Edge) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        if store.edges.remove(&edge).is_some() {
            return Ok(false);
        }

        let meta = (store.next_seq(), time::now());
        store.edges.insert(edge, meta);

        Ok(true)
    }

    async fn insert_edge(&mut self, edge: Edge) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        if store.edges.contains_key(&edge) {
            return Ok(false);
        }

        let meta = (store.next_seq(), time::now());
        store.edges.insert(edge, meta);

        Ok(true)
    }

    async fn delete_edge(&mut self, edge: &Edge) -> Result<bool, Self::Error> {
        Ok(self.write_store().edges.remove(edge).is_some())
    }

    async fn has_edge(&self, edge: &Edge) -> Result<bool, Self::Error> {
        Ok(self.read_store().edges.contains_key(edge))
    }

    async fn count_edges(&self, filter: &EdgeFilter) -> Result<u64, Self::Error> {
        Ok(self
            .read_store()
            .edges
            .keys()
            .filter(|edge| filter.matches(edge))
            .count() as u64)
    }

    async fn list_edges(&self, filter: &EdgeFilter) -> Result<Vec<Edge>, Self::Error> {
        let store = self.read_store();

        let mut matching: Vec<(&Edge, &EdgeMeta)> = store
            .edges
            .iter()
            .filter(|(edge, _)| filter.matches(edge))
            .collect();
        matching.sort_by_key(|(_, (seq, _))| *seq);

        Ok(matching.into_iter().map(|(edge, _)| edge.clone()).collect())
    }
}
