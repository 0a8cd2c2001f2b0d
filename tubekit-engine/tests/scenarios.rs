// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end flows exercising commands, toggles and views together against
//! a shared in-memory store.
use tubekit_core::{Edge, EntityId, LikeTarget, Video};
use tubekit_engine::command::{NewUser, NewVideo, PlaylistCommands, UserCommands, VideoCommands};
use tubekit_engine::{
    EngineError, Page, SortField, ToggleCoordinator, ToggleState, VideoSort, ViewComposer,
};
use tubekit_store::{EdgeFilter, EdgeStore, EntityStore, MemoryStore};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

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

fn new_video(title: &str) -> NewVideo {
    NewVideo {
        title: title.to_string(),
        description: String::new(),
        media: "blob://media".to_string(),
        thumbnail: "blob://thumb".to_string(),
        duration_secs: 120.0,
    }
}

async fn register(store: &MemoryStore, username: &str) -> EntityId {
    UserCommands::new(store.clone())
        .register(new_user(username))
        .await
        .expect("registration succeeds")
        .id
}

#[tokio::test]
async fn scenario_like_toggle_round_trip() {
    init_logging();
    let store = MemoryStore::new();

    let creator = register(&store, "creator").await;
    let fan = register(&store, "fan").await;

    let video = VideoCommands::new(store.clone())
        .publish(&creator, new_video("Weekend Ride"))
        .await
        .unwrap();
    let target = LikeTarget::Video(video.id);

    let mut coordinator = ToggleCoordinator::new(store.clone());

    let outcome = coordinator.toggle_like(&fan, &fan, target).await.unwrap();
    assert_eq!(outcome.state, ToggleState::Created);
    let likes = store
        .count_edges(&EdgeFilter::LikesOf { target })
        .await
        .unwrap();
    assert_eq!(likes, 1);

    let outcome = coordinator.toggle_like(&fan, &fan, target).await.unwrap();
    assert_eq!(outcome.state, ToggleState::Removed);
    let likes = store
        .count_edges(&EdgeFilter::LikesOf { target })
        .await
        .unwrap();
    assert_eq!(likes, 0);
}

#[tokio::test]
async fn scenario_subscription_drives_channel_profile() {
    let store = MemoryStore::new();

    let creator = register(&store, "creator").await;
    let fan = register(&store, "fan").await;

    let mut coordinator = ToggleCoordinator::new(store.clone());
    let composer = ViewComposer::new(store.clone());

    coordinator
        .toggle_subscription(&fan, &fan, &creator)
        .await
        .unwrap();

    let profile = composer
        .channel_profile("creator", Some(&fan))
        .await
        .unwrap();
    assert_eq!(profile.subscriber_count, 1);
    assert!(profile.is_subscribed_by_viewer);

    coordinator
        .toggle_subscription(&fan, &fan, &creator)
        .await
        .unwrap();

    let profile = composer
        .channel_profile("creator", Some(&fan))
        .await
        .unwrap();
    assert_eq!(profile.subscriber_count, 0);
    assert!(!profile.is_subscribed_by_viewer);
}

#[tokio::test]
async fn scenario_playlist_membership_never_duplicates() {
    let store = MemoryStore::new();

    let creator = register(&store, "creator").await;
    let video = VideoCommands::new(store.clone())
        .publish(&creator, new_video("Weekend Ride"))
        .await
        .unwrap();

    let mut playlists = PlaylistCommands::new(store.clone());
    let playlist = playlists.create(&creator, "Favorites", "").await.unwrap();

    playlists
        .add_video(&creator, &playlist.id, &video.id)
        .await
        .unwrap();
    let second = playlists.add_video(&creator, &playlist.id, &video.id).await;
    assert!(matches!(second, Err(EngineError::Conflict(_))));

    let entries = store
        .count_edges(&EdgeFilter::EntriesIn {
            playlist: playlist.id,
        })
        .await
        .unwrap();
    assert_eq!(entries, 1);

    let view = ViewComposer::new(store.clone())
        .playlist(&playlist.id)
        .await
        .unwrap();
    assert_eq!(view.videos.len(), 1);
    assert_eq!(view.videos[0].id, video.id);
    assert_eq!(view.owner.username, "creator");
}

#[tokio::test]
async fn scenario_listing_sort_direction_flips_order_not_content() {
    let mut store = MemoryStore::new();
    let creator = register(&store, "creator").await;

    for (title, created_at) in [("oldest", 100), ("middle", 200), ("newest", 300)] {
        let mut video = Video::new(
            creator,
            title,
            "",
            "blob://media",
            "blob://thumb",
            60.0,
        );
        video.created_at = created_at;
        store.insert_video(video).await.unwrap();
    }

    let composer = ViewComposer::new(store);

    let descending = composer
        .list_videos("", VideoSort::default(), Page::new(1, 10))
        .await
        .unwrap();
    let titles: Vec<&str> = descending
        .items
        .iter()
        .map(|video| video.title.as_str())
        .collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);

    let ascending = composer
        .list_videos(
            "",
            VideoSort::ascending(SortField::CreatedAt),
            Page::new(1, 10),
        )
        .await
        .unwrap();
    let titles: Vec<&str> = ascending
        .items
        .iter()
        .map(|video| video.title.as_str())
        .collect();
    assert_eq!(titles, vec!["oldest", "middle", "newest"]);

    // Same result set either way.
    let mut forward: Vec<EntityId> = descending.items.iter().map(|video| video.id).collect();
    let mut backward: Vec<EntityId> = ascending.items.iter().map(|video| video.id).collect();
    forward.sort();
    backward.sort();
    assert_eq!(forward, backward);
}

#[tokio::test]
async fn dashboard_aggregates_likes_across_target_kinds() {
    let store = MemoryStore::new();

    let creator = register(&store, "creator").await;
    let fan = register(&store, "fan").await;

    let video = VideoCommands::new(store.clone())
        .publish(&creator, new_video("Weekend Ride"))
        .await
        .unwrap();

    let mut coordinator = ToggleCoordinator::new(store.clone());
    coordinator
        .toggle_like(&fan, &fan, LikeTarget::Video(video.id))
        .await
        .unwrap();
    coordinator
        .toggle_subscription(&fan, &fan, &creator)
        .await
        .unwrap();

    let stats = ViewComposer::new(store.clone())
        .dashboard_stats(&creator)
        .await
        .unwrap();
    assert_eq!(stats.video_count, 1);
    assert_eq!(stats.subscriber_count, 1);
    assert_eq!(stats.video_like_count, 1);
    assert_eq!(stats.comment_like_count, 0);
    assert_eq!(stats.tweet_like_count, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_toggles_on_one_pair_keep_the_uniqueness_invariant() {
    init_logging();
    let store = MemoryStore::new();

    let liker = EntityId::random();
    let target = LikeTarget::Video(EntityId::random());
    let edge = Edge::Like { liker, target };

    const TOGGLES: usize = 9;

    let mut handles = Vec::with_capacity(TOGGLES);
    for _ in 0..TOGGLES {
        let mut store = store.clone();
        let edge = edge.clone();
        handles.push(tokio::spawn(async move {
            store.toggle_edge(edge).await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // An odd number of flips from "absent" must land on "present", and never
    // more than one row for the pair.
    let count = store
        .count_edges(&EdgeFilter::LikesOf { target })
        .await
        .unwrap();
    assert_eq!(count, 1);

    let mut store = store.clone();
    store.toggle_edge(edge.clone()).await.unwrap();
    assert!(!store.has_edge(&edge).await.unwrap());
}

#[tokio::test]
async fn failed_mutation_leaves_no_partial_state() {
    let store = MemoryStore::new();
    let creator = register(&store, "creator").await;

    // Liking a missing video must not create an edge.
    let target = LikeTarget::Video(EntityId::random());
    let result = ToggleCoordinator::new(store.clone())
        .toggle_like(&creator, &creator, target)
        .await;
    assert!(matches!(result, Err(EngineError::NotFound(_))));

    let likes = store
        .count_edges(&EdgeFilter::LikesBy {
            liker: creator,
            kind: None,
        })
        .await
        .unwrap();
    assert_eq!(likes, 0);
}
