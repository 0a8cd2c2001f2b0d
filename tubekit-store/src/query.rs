// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter and partial-update parameter types for the store traits.
use tubekit_core::{Edge, EntityId, EntityKind, LikeTarget, Playlist, User, Video, time};

/// Row filter for video lookups.
///
/// All criteria are conjunctive; an empty filter matches every video.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoFilter {
    /// Only videos owned by this user.
    pub owner: Option<EntityId>,

    /// Only videos whose title or description contains this text,
    /// case-insensitively. An empty string matches everything.
    pub search: Option<String>,
}

impl VideoFilter {
    /// Filter by owning user.
    pub fn by_owner(owner: EntityId) -> Self {
        Self {
            owner: Some(owner),
            ..Default::default()
        }
    }

    /// Filter by free-text search over title and description.
    pub fn search(query: &str) -> Self {
        Self {
            search: Some(query.to_string()),
            ..Default::default()
        }
    }

    /// Whether `video` satisfies every criterion of this filter.
    pub fn matches(&self, video: &Video) -> bool {
        if let Some(owner) = &self.owner {
            if &video.owner != owner {
                return false;
            }
        }

        if let Some(query) = &self.search {
            let query = query.to_lowercase();
            if !query.is_empty()
                && !video.title.to_lowercase().contains(&query)
                && !video.description.to_lowercase().contains(&query)
            {
                return false;
            }
        }

        true
    }
}

/// Edge selection by one endpoint of the relation.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeFilter {
    /// Likes placed by a user, optionally restricted to one target kind.
    LikesBy {
        liker: EntityId,
        kind: Option<EntityKind>,
    },

    /// Likes pointing at one target.
    LikesOf { target: LikeTarget },

    /// Subscriptions pointing at a channel.
    SubscribersOf { channel: EntityId },

    /// Subscriptions placed by a user.
    SubscriptionsBy { subscriber: EntityId },

    /// Entries of a playlist.
    EntriesIn { playlist: EntityId },
}

impl EdgeFilter {
    /// Whether `edge` is selected by this filter.
    pub fn matches(&self, edge: &Edge) -> bool {
        match (self, edge) {
            (EdgeFilter::LikesBy { liker, kind }, Edge::Like { liker: l, target }) => {
                l == liker && kind.is_none_or(|kind| target.kind() == kind)
            }
            (EdgeFilter::LikesOf { target }, Edge::Like { target: t, .. }) => t == target,
            (
                EdgeFilter::SubscribersOf { channel },
                Edge::Subscription { channel: c, .. },
            ) => c == channel,
            (
                EdgeFilter::SubscriptionsBy { subscriber },
                Edge::Subscription { subscriber: s, .. },
            ) => s == subscriber,
            (
                EdgeFilter::EntriesIn { playlist },
                Edge::PlaylistEntry { playlist: p, .. },
            ) => p == playlist,
            _ => false,
        }
    }
}

/// Partial update of a user record. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
}

impl UserPatch {
    /// No field set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the patch, refreshing the update timestamp.
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.trim().to_lowercase();
        }
        if let Some(display_name) = &self.display_name {
            user.display_name = display_name.trim().to_string();
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = avatar.clone();
        }
        if let Some(cover_image) = &self.cover_image {
            user.cover_image = Some(cover_image.clone());
        }
        user.updated_at = time::now();
    }
}

/// Partial update of a video record. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub published: Option<bool>,
}

impl VideoPatch {
    /// No field set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the patch, refreshing the update timestamp.
    pub fn apply(&self, video: &mut Video) {
        if let Some(title) = &self.title {
            video.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            video.description = description.trim().to_string();
        }
        if let Some(thumbnail) = &self.thumbnail {
            video.thumbnail = thumbnail.clone();
        }
        if let Some(published) = self.published {
            video.published = published;
        }
        video.updated_at = time::now();
    }
}

/// Partial update of a playlist record. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaylistPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PlaylistPatch {
    /// No field set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the patch, refreshing the update timestamp.
    pub fn apply(&self, playlist: &mut Playlist) {
        if let Some(name) = &self.name {
            playlist.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            playlist.description = description.trim().to_string();
        }
        playlist.updated_at = time::now();
    }
}

#[cfg(test)]
mod tests {
    use tubekit_core::{Edge, EntityId, EntityKind, LikeTarget, Video};

    use super::{EdgeFilter, VideoFilter};

    #[test]
    fn video_filter_search_is_case_insensitive() {
        let video = Video::new(
            EntityId::random(),
            "Weekend Ride",
            "rolling through the hills",
            "blob://media",
            "blob://thumb",
            60.0,
        );

        assert!(VideoFilter::search("weekend").matches(&video));
        assert!(VideoFilter::search("HILLS").matches(&video));
        assert!(VideoFilter::search("").matches(&video));
        assert!(!VideoFilter::search("snow").matches(&video));
    }

    #[test]
    fn edge_filter_selects_by_endpoint() {
        let liker = EntityId::random();
        let video = EntityId::random();
        let like = Edge::Like {
            liker,
            target: LikeTarget::Video(video),
        };

        assert!(
            EdgeFilter::LikesBy {
                liker,
                kind: Some(EntityKind::Video)
            }
            .matches(&like)
        );
        assert!(
            !EdgeFilter::LikesBy {
                liker,
                kind: Some(EntityKind::Tweet)
            }
            .matches(&like)
        );
        assert!(
            EdgeFilter::LikesOf {
                target: LikeTarget::Video(video)
            }
            .matches(&like)
        );
        assert!(!EdgeFilter::SubscribersOf { channel: video }.matches(&like));
    }
}
