//! Home feed composition
//!
//! The feed mixes two orderings of the same record set: newest first and most
//! viewed first. For each rank `i` one coin flip decides which ordering offers
//! its `i`-th record first; the other ordering's `i`-th record follows. A
//! record already placed is skipped, so every id appears exactly once. Since
//! every record holds some rank in the recency order, nothing is dropped.

use std::collections::HashSet;

use uuid::Uuid;
use vidshare_core::VideoRecord;

use super::random::RandomSource;

/// Ordered, duplicate-free view over a fetched record set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedView {
    videos: Vec<VideoRecord>,
}

impl FeedView {
    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.videos.iter().map(|v| v.id).collect()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn into_videos(self) -> Vec<VideoRecord> {
        self.videos
    }
}

impl IntoIterator for FeedView {
    type Item = VideoRecord;
    type IntoIter = std::vec::IntoIter<VideoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.videos.into_iter()
    }
}

/// Newest first. Stable, so equal timestamps keep their input order.
fn by_recency(records: &[VideoRecord]) -> Vec<&VideoRecord> {
    let mut ordered: Vec<&VideoRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ordered
}

/// Most viewed first. Stable, so equal counts keep their input order.
fn by_popularity(records: &[VideoRecord]) -> Vec<&VideoRecord> {
    let mut ordered: Vec<&VideoRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.views.cmp(&a.views));
    ordered
}

/// Interleave the recency and popularity orders of `records`.
///
/// Takes exactly one draw per rank. The same records and the same draws always
/// yield the same feed.
pub fn compose_feed<R>(records: &[VideoRecord], random: &mut R) -> FeedView
where
    R: RandomSource + ?Sized,
{
    if records.is_empty() {
        return FeedView::default();
    }

    let recency = by_recency(records);
    let popularity = by_popularity(records);
    let ranks = recency.len().max(popularity.len());

    let mut placed: HashSet<Uuid> = HashSet::with_capacity(records.len());
    let mut videos = Vec::with_capacity(records.len());

    for i in 0..ranks {
        let (first, second) = if random.next_bool() {
            (&recency, &popularity)
        } else {
            (&popularity, &recency)
        };

        for order in [first, second] {
            if let Some(video) = order.get(i) {
                if placed.insert(video.id) {
                    videos.push((*video).clone());
                }
            }
        }
    }

    FeedView { videos }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::random::{RngSource, ScriptedSource};
    use chrono::{Duration, TimeZone, Utc};

    fn video(n: u128, age_days: i64, views: u64) -> VideoRecord {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        VideoRecord {
            id: Uuid::from_u128(n),
            title: format!("video {}", n),
            description: None,
            video_url: format!("http://cdn/videos/{}.mp4", n),
            thumbnail_url: None,
            views,
            created_at: base - Duration::days(age_days),
        }
    }

    fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
        ids.sort();
        ids
    }

    #[test]
    fn empty_input_draws_nothing() {
        let mut source = ScriptedSource::default();
        let feed = compose_feed(&[], &mut source);
        assert!(feed.is_empty());
        assert_eq!(source.consumed(), 0);
    }

    #[test]
    fn single_record_for_either_draw() {
        let records = vec![video(1, 0, 5)];
        for draw in [true, false] {
            let feed = compose_feed(&records, &mut ScriptedSource::new([draw]));
            assert_eq!(feed.ids(), vec![Uuid::from_u128(1)]);
        }
    }

    #[test]
    fn output_is_permutation_for_random_draws() {
        let records: Vec<VideoRecord> = (0..25)
            .map(|n| video(n, (n as i64 * 7) % 11, (n as u64 * 13) % 17))
            .collect();
        let expected = sorted(records.iter().map(|v| v.id).collect());

        for seed in 0..50 {
            let feed = compose_feed(&records, &mut RngSource::seeded(seed));
            assert_eq!(feed.len(), records.len());
            assert_eq!(sorted(feed.ids()), expected);
        }
    }

    #[test]
    fn one_draw_per_rank() {
        let records: Vec<VideoRecord> = (0..6).map(|n| video(n, n as i64, n as u64)).collect();
        let mut source = ScriptedSource::default();
        compose_feed(&records, &mut source);
        assert_eq!(source.consumed(), 6);
    }

    #[test]
    fn all_tied_records_keep_length() {
        let records: Vec<VideoRecord> = (0..8).map(|n| video(n, 3, 10)).collect();
        for seed in 0..10 {
            let feed = compose_feed(&records, &mut RngSource::seeded(seed));
            assert_eq!(feed.len(), 8);
        }
        // All ties: both orders equal the input order.
        let feed = compose_feed(&records, &mut ScriptedSource::default());
        assert_eq!(feed.ids(), records.iter().map(|v| v.id).collect::<Vec<_>>());
    }

    #[test]
    fn newer_unpopular_and_older_popular() {
        // Record 1 is newer, record 2 is more viewed.
        let records = vec![video(1, 0, 1), video(2, 5, 100)];
        let one = Uuid::from_u128(1);
        let two = Uuid::from_u128(2);

        let recency_first = compose_feed(&records, &mut ScriptedSource::new([true, true]));
        assert_eq!(recency_first.ids(), vec![one, two]);

        let popularity_first = compose_feed(&records, &mut ScriptedSource::new([false, true]));
        assert_eq!(popularity_first.ids(), vec![two, one]);

        for seed in 0..20 {
            let ids = compose_feed(&records, &mut RngSource::seeded(seed)).ids();
            assert!(ids == vec![one, two] || ids == vec![two, one]);
        }
    }

    #[test]
    fn scripted_draws_pick_the_expected_interleaving() {
        // recency:    0 1 2 3
        // popularity: 3 2 1 0
        let records: Vec<VideoRecord> = (0..4)
            .map(|n| video(n, n as i64, 100 + n as u64))
            .collect();
        let feed = compose_feed(&records, &mut ScriptedSource::new([false, true, true, true]));
        let ids: Vec<u128> = feed.ids().into_iter().map(|id| id.as_u128()).collect();
        assert_eq!(ids, vec![3, 0, 1, 2]);
    }

    #[test]
    fn same_draws_same_feed() {
        let records: Vec<VideoRecord> = (0..10)
            .map(|n| video(n, n as i64 % 4, n as u64 % 3))
            .collect();
        let a = compose_feed(&records, &mut RngSource::seeded(7));
        let b = compose_feed(&records, &mut RngSource::seeded(7));
        assert_eq!(a, b);
    }
}
