// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::kind::EntityKind;

/// Target of a like: a video, a comment or a tweet.
///
/// The target kind is carried by the variant, never by a free-standing
/// string, so a like can only ever point at one of the three likeable
/// entity kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LikeTarget {
    Video(EntityId),
    Comment(EntityId),
    Tweet(EntityId),
}

impl LikeTarget {
    /// Entity kind of the liked target.
    pub fn kind(&self) -> EntityKind {
        match self {
            LikeTarget::Video(_) => EntityKind::Video,
            LikeTarget::Comment(_) => EntityKind::Comment,
            LikeTarget::Tweet(_) => EntityKind::Tweet,
        }
    }

    /// Identifier of the liked target.
    pub fn id(&self) -> &EntityId {
        match self {
            LikeTarget::Video(id) => id,
            LikeTarget::Comment(id) => id,
            LikeTarget::Tweet(id) => id,
        }
    }
}

/// A binary relation edge between two entities.
///
/// An edge either exists or it does not; there is no intermediate state and
/// no independent identifier. The variant data *is* the composite key the
/// uniqueness invariant holds over: the edge store keeps at most one row per
/// `Edge` value. Edges are created and removed, never updated in place.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// `liker` likes `target`, at most once per (liker, target).
    Like { liker: EntityId, target: LikeTarget },

    /// `subscriber` follows the channel of user `channel`. Self-subscription
    /// is rejected before an edge is ever constructed.
    Subscription {
        subscriber: EntityId,
        channel: EntityId,
    },

    /// `video` is a member of `playlist`. Insertion order of these edges is
    /// the playlist's video order.
    PlaylistEntry { playlist: EntityId, video: EntityId },
}

impl Edge {
    /// The acting endpoint of the edge: the liker, the subscriber, or the
    /// playlist being curated.
    pub fn actor(&self) -> &EntityId {
        match self {
            Edge::Like { liker, .. } => liker,
            Edge::Subscription { subscriber, .. } => subscriber,
            Edge::PlaylistEntry { playlist, .. } => playlist,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::id::EntityId;
    use crate::kind::EntityKind;

    use super::{Edge, LikeTarget};

    #[test]
    fn like_target_accessors() {
        let id = EntityId::random();
        let target = LikeTarget::Comment(id);

        assert_eq!(target.kind(), EntityKind::Comment);
        assert_eq!(target.id(), &id);
    }

    #[test]
    fn edge_is_its_own_key() {
        let liker = EntityId::random();
        let video = EntityId::random();

        let a = Edge::Like {
            liker,
            target: LikeTarget::Video(video),
        };
        let b = Edge::Like {
            liker,
            target: LikeTarget::Video(video),
        };

        // Same endpoints, same key.
        assert_eq!(a, b);

        // The same pair of ids under a different relation is a different key.
        let c = Edge::Subscription {
            subscriber: liker,
            channel: video,
        };
        assert_ne!(a, c);
    }
}
