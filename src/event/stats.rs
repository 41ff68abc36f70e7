//! Periodic statistics snapshots.
//!
//! The distributor forwards snapshots verbatim as [`StatsSnapshot`]. Consumers that
//! care about the content decode the typed [`Stats`] view themselves.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

/// An opaque statistics value, exactly as the transport delivered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsSnapshot(Value);

impl StatsSnapshot {
    /// Wrap a raw value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// The raw value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// The `type` tag, if the snapshot carries one.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Decode into the typed statistics view.
    pub fn decode(&self) -> Result<Stats, DecodeError> {
        Stats::deserialize(&self.0).map_err(|e| DecodeError::InvalidPayload {
            event_type: self.kind().unwrap_or("<stats>").to_string(),
            reason: e.to_string(),
        })
    }
}

impl From<Value> for StatsSnapshot {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Typed statistics.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Stats {
    ActiveViewer(ActiveViewerStats),
    #[serde(rename = "LOL")]
    Lol(CountStats),
    ChatPerMinute(CountStats),
    WordCount(WordCountStats),
    ActiveChatterRanking(ActiveChatterRankingStats),
    Sentiment(SentimentStats),
}

/// Viewer breakdown.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveViewerStats {
    pub timestamp: String,
    pub total: u64,
    pub fan: u64,
    pub subscriber: u64,
    pub normal: u64,
}

/// A single counter sample (laughter count, chats per minute).
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountStats {
    pub timestamp: String,
    pub count: u64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCountItem {
    pub word: String,
    pub count: u64,
}

/// Most frequent words.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCountStats {
    pub timestamp: String,
    pub words: Vec<WordCountItem>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActiveChatterRankingItem {
    pub user_id: String,
    pub nickname: String,
    pub chat_count: u64,
}

/// Most active chatters.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveChatterRankingStats {
    pub timestamp: String,
    pub rankings: Vec<ActiveChatterRankingItem>,
}

/// Chat sentiment distribution.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SentimentStats {
    pub timestamp: String,
    pub positive_count: u64,
    pub negative_count: u64,
    pub neutral_count: u64,
    pub total_count: u64,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
    pub average_score: f64,
}
