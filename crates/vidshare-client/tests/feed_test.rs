mod helpers;

use std::collections::HashSet;

use helpers::{record, MockStore};
use uuid::Uuid;
use vidshare_client::{FeedService, FeedState, RngSource, ScriptedSource};

#[tokio::test]
async fn test_empty_store_gives_empty_feed() {
    let service = FeedService::new(MockStore::new().shared());
    let state = service.load(&mut RngSource::seeded(1)).await;
    assert_eq!(state, FeedState::Empty);
}

#[tokio::test]
async fn test_feed_contains_every_video_once() {
    let videos: Vec<_> = (1..=12)
        .map(|n| record(n, (n as i64 * 5) % 9, (n as u64 * 37) % 50))
        .collect();
    let expected: HashSet<Uuid> = videos.iter().map(|v| v.id).collect();
    let service = FeedService::new(MockStore::new().with_videos(videos).shared());

    for seed in 0..10 {
        match service.load(&mut RngSource::seeded(seed)).await {
            FeedState::Ready(feed) => {
                assert_eq!(feed.len(), 12);
                let ids: HashSet<Uuid> = feed.ids().into_iter().collect();
                assert_eq!(ids, expected);
            }
            other => panic!("unexpected feed state: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_feed_order_follows_draws() {
    // 1 is newest, 2 is most viewed.
    let service = FeedService::new(
        MockStore::new()
            .with_videos(vec![record(2, 10, 500), record(1, 0, 3)])
            .shared(),
    );

    let recency_first = service.load(&mut ScriptedSource::new([true, true])).await;
    let popularity_first = service.load(&mut ScriptedSource::new([false, false])).await;

    let ids = |state: FeedState| match state {
        FeedState::Ready(feed) => feed.ids(),
        other => panic!("unexpected feed state: {:?}", other),
    };
    assert_eq!(
        ids(recency_first),
        vec![Uuid::from_u128(1), Uuid::from_u128(2)]
    );
    assert_eq!(
        ids(popularity_first),
        vec![Uuid::from_u128(2), Uuid::from_u128(1)]
    );
}

#[tokio::test]
async fn test_load_failure_is_reported_with_friendly_message() {
    let service = FeedService::new(MockStore::new().failing_list_videos().shared());

    let state = service.load(&mut RngSource::seeded(3)).await;

    assert_eq!(
        state,
        FeedState::Failed {
            message: "Failed to load videos. Please try again later.".to_string()
        }
    );
}
