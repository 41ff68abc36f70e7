//! Latest statistics and short rolling series.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;

use crate::event::stats::{
    ActiveChatterRankingStats, ActiveViewerStats, CountStats, SentimentStats, WordCountStats,
};
use crate::event::{Stats, StatsSnapshot};

use super::queue::CircularQueue;

/// A value plus when it last changed.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasource<T> {
    pub data: T,
    pub last_updated: DateTime<Utc>,
}

impl<T> Datasource<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            last_updated: Utc::now(),
        }
    }

    fn set(&mut self, data: T) {
        self.data = data;
        self.touch();
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    fn map<U>(&self, f: impl FnOnce(&T) -> U) -> Datasource<U> {
        Datasource {
            data: f(&self.data),
            last_updated: self.last_updated,
        }
    }
}

/// One point of a rolling series. `time_label` is `minute:second`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericValue {
    pub time_label: String,
    pub count: u64,
}

impl From<&CountStats> for NumericValue {
    fn from(sample: &CountStats) -> Self {
        Self {
            time_label: time_label(&sample.timestamp),
            count: sample.count,
        }
    }
}

fn time_label(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| timestamp.to_string(),
        |t| {
            let t = t.with_timezone(&Utc);
            format!("{}:{}", t.minute(), t.second())
        },
    )
}

#[derive(Debug)]
struct StatsState {
    active_viewers: Datasource<ActiveViewerStats>,
    lol: Datasource<CircularQueue<NumericValue>>,
    cpm: Datasource<CircularQueue<NumericValue>>,
    ranking: Datasource<ActiveChatterRankingStats>,
    word_count: Datasource<WordCountStats>,
    sentiment: Datasource<SentimentStats>,
}

impl StatsState {
    fn new(series_capacity: usize) -> Self {
        Self {
            active_viewers: Datasource::new(ActiveViewerStats::default()),
            lol: Datasource::new(CircularQueue::new(series_capacity)),
            cpm: Datasource::new(CircularQueue::new(series_capacity)),
            ranking: Datasource::new(ActiveChatterRankingStats::default()),
            word_count: Datasource::new(WordCountStats::default()),
            sentiment: Datasource::new(SentimentStats::default()),
        }
    }
}

/// Statistics consumer store.
#[derive(Debug)]
pub struct StatsEventStore {
    series_capacity: usize,
    state: Mutex<StatsState>,
    revision: AtomicU64,
}

impl StatsEventStore {
    /// Store whose LOL / chats-per-minute series keep `series_capacity` points.
    #[must_use]
    pub fn new(series_capacity: usize) -> Self {
        Self {
            series_capacity,
            state: Mutex::new(StatsState::new(series_capacity)),
            revision: AtomicU64::new(0),
        }
    }

    /// Apply a snapshot. Returns false if it could not be decoded.
    pub fn handle_stats_event(&self, snapshot: &StatsSnapshot) -> bool {
        let stats = match snapshot.decode() {
            Ok(stats) => stats,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring stats snapshot");
                return false;
            }
        };

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            match stats {
                Stats::ActiveViewer(v) => state.active_viewers.set(v),
                Stats::Lol(sample) => {
                    state.lol.data.push(NumericValue::from(&sample));
                    state.lol.touch();
                }
                Stats::ChatPerMinute(sample) => {
                    state.cpm.data.push(NumericValue::from(&sample));
                    state.cpm.touch();
                }
                Stats::WordCount(v) => state.word_count.set(v),
                Stats::ActiveChatterRanking(v) => state.ranking.set(v),
                Stats::Sentiment(v) => state.sentiment.set(v),
            }
        }
        self.revision.fetch_add(1, Ordering::AcqRel);
        true
    }

    /// Reset everything to empty.
    pub fn clear_stats(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = StatsState::new(self.series_capacity);
        self.revision.fetch_add(1, Ordering::AcqRel);
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn active_viewers(&self) -> Datasource<ActiveViewerStats> {
        self.with_state(|s| s.active_viewers.clone())
    }

    /// Laughter series, oldest first.
    #[must_use]
    pub fn lol(&self) -> Datasource<Vec<NumericValue>> {
        self.with_state(|s| s.lol.map(CircularQueue::get_all))
    }

    /// Chats-per-minute series, oldest first.
    #[must_use]
    pub fn chats_per_minute(&self) -> Datasource<Vec<NumericValue>> {
        self.with_state(|s| s.cpm.map(CircularQueue::get_all))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn active_chatter_ranking(&self) -> Datasource<ActiveChatterRankingStats> {
        self.with_state(|s| s.ranking.clone())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn word_count(&self) -> Datasource<WordCountStats> {
        self.with_state(|s| s.word_count.clone())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn sentiment(&self) -> Datasource<SentimentStats> {
        self.with_state(|s| s.sentiment.clone())
    }

    /// Incremented on every applied snapshot or clear.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    fn with_state<R>(&self, f: impl FnOnce(&StatsState) -> R) -> R {
        f(&self.state.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn snapshot(value: serde_json::Value) -> StatsSnapshot {
        StatsSnapshot::from(value)
    }

    #[test]
    fn series_use_minute_second_labels() {
        let store = StatsEventStore::new(2);
        for (ts, count) in [
            ("2024-05-01T10:01:05Z", 1),
            ("2024-05-01T10:02:30Z", 2),
            ("2024-05-01T10:03:00Z", 3),
        ] {
            assert!(store.handle_stats_event(&snapshot(
                json!({"type": "LOL", "payload": {"timestamp": ts, "count": count}})
            )));
        }

        let lol = store.lol().data;
        assert_eq!(
            lol,
            vec![
                NumericValue {
                    time_label: "2:30".to_string(),
                    count: 2
                },
                NumericValue {
                    time_label: "3:0".to_string(),
                    count: 3
                },
            ]
        );
        assert!(store.chats_per_minute().data.is_empty());
    }

    #[test]
    fn unparseable_timestamp_is_kept_raw() {
        let store = StatsEventStore::new(5);
        store.handle_stats_event(&snapshot(
            json!({"type": "ChatPerMinute", "payload": {"timestamp": "later", "count": 9}}),
        ));
        assert_eq!(store.chats_per_minute().data[0].time_label, "later");
    }

    #[test]
    fn latest_values_replace() {
        let store = StatsEventStore::new(5);
        store.handle_stats_event(&snapshot(json!({
            "type": "ActiveViewer",
            "payload": {"timestamp": "t", "total": 10, "fan": 2, "subscriber": 1, "normal": 7}
        })));
        store.handle_stats_event(&snapshot(json!({
            "type": "ActiveViewer",
            "payload": {"timestamp": "t2", "total": 12, "fan": 2, "subscriber": 1, "normal": 9}
        })));
        assert_eq!(store.active_viewers().data.total, 12);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn unknown_snapshot_is_ignored() {
        let store = StatsEventStore::new(5);
        assert!(!store.handle_stats_event(&snapshot(json!({"type": "Mystery"}))));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn clear_resets() {
        let store = StatsEventStore::new(5);
        store.handle_stats_event(&snapshot(json!({
            "type": "WordCount",
            "payload": {"timestamp": "t", "words": [{"word": "gg", "count": 3}]}
        })));
        store.clear_stats();
        assert!(store.word_count().data.words.is_empty());
    }
}
