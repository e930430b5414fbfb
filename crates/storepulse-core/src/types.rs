//! Domain entities shared by every crate: stores, reviews, scopes and the
//! derived aggregate shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A physical retail location. Loaded once from the static directory at
/// startup; immutable during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    /// Short directory code (e.g. "CE01").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "placeId")]
    pub place_id: String,
    /// Two-letter state code.
    pub state: String,
    /// Geographic region (e.g. "Sudeste").
    pub region: String,
    /// Organizational cluster, independent of geography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Store {
    /// Display name including the directory code when present ("CE01 - Name").
    pub fn display_name(&self) -> String {
        match &self.code {
            Some(code) => format!("{} - {}", code, self.name),
            None => self.name.clone(),
        }
    }
}

/// A single customer rating event. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(rename = "storeId")]
    pub store_id: String,
    #[serde(rename = "placeId")]
    pub place_id: String,
    pub date: DateTime<Utc>,
    /// Integer rating, 1..=5 inclusive.
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "authorUrl")]
    pub author_url: Option<String>,
    /// Timestamp reported by the provider, distinct from ingestion date.
    #[serde(skip_serializing_if = "Option::is_none", rename = "sourceTime")]
    pub source_time: Option<DateTime<Utc>>,
}

impl Review {
    /// Comment text, if present and non-blank.
    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// A filter descriptor selecting a subset of stores. Pure value; doubles as a
/// cache key. Store id takes absolute precedence over every other field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "storeId")]
    pub store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Scope {
    /// Whether any field is supplied.
    pub fn has_filter(&self) -> bool {
        self.store_id.is_some()
            || self.team.is_some()
            || self.state.is_some()
            || self.region.is_some()
    }

    /// Canonical serialization used as a cache key. Field order is fixed so
    /// equal scopes always produce equal keys.
    pub fn cache_key(&self) -> String {
        format!(
            "store={};team={};state={};region={}",
            self.store_id.as_deref().unwrap_or(""),
            self.team.as_deref().unwrap_or(""),
            self.state.as_deref().unwrap_or(""),
            self.region.as_deref().unwrap_or(""),
        )
    }

    /// Human-readable label for prompts and log lines.
    pub fn describe(&self) -> String {
        if let Some(id) = &self.store_id {
            return format!("store {id}");
        }
        let mut parts = Vec::new();
        if let Some(team) = &self.team {
            parts.push(format!("team {team}"));
        }
        if let Some(state) = &self.state {
            parts.push(format!("state {state}"));
        }
        if let Some(region) = &self.region {
            parts.push(format!("region {region}"));
        }
        if parts.is_empty() {
            "the whole network".into()
        } else {
            parts.join(", ")
        }
    }
}

/// Counts per star rating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistogram {
    #[serde(rename = "1")]
    pub one: usize,
    #[serde(rename = "2")]
    pub two: usize,
    #[serde(rename = "3")]
    pub three: usize,
    #[serde(rename = "4")]
    pub four: usize,
    #[serde(rename = "5")]
    pub five: usize,
}

impl RatingHistogram {
    pub fn increment(&mut self, rating: u8) {
        match rating {
            1 => self.one += 1,
            2 => self.two += 1,
            3 => self.three += 1,
            4 => self.four += 1,
            5 => self.five += 1,
            _ => {}
        }
    }

    pub fn total(&self) -> usize {
        self.one + self.two + self.three + self.four + self.five
    }
}

/// Time-bucket granularity for trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodGranularity {
    Day,
    Week,
    Month,
}

impl Default for PeriodGranularity {
    fn default() -> Self {
        PeriodGranularity::Day
    }
}

/// One point of the time-bucketed trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// Stable sortable key ("2025-07-01", "2025-27", "2025-07").
    pub period: String,
    pub average: f64,
    pub count: usize,
}

/// Derived rollup for a review set. Recomputed on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub average: f64,
    pub total: usize,
    pub histogram: RatingHistogram,
    pub trend: Vec<PeriodBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_cache_key_is_canonical() {
        let a = Scope {
            region: Some("Sul".into()),
            state: Some("RS".into()),
            ..Default::default()
        };
        let b = Scope {
            state: Some("RS".into()),
            region: Some("Sul".into()),
            ..Default::default()
        };
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), "store=;team=;state=RS;region=Sul");
    }

    #[test]
    fn test_histogram_total_matches_increments() {
        let mut hist = RatingHistogram::default();
        for rating in [5, 5, 4, 3, 1] {
            hist.increment(rating);
        }
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.five, 2);
        assert_eq!(hist.two, 0);
    }

    #[test]
    fn test_store_display_name() {
        let store = Store {
            id: "loja-1".into(),
            name: "Shopping Centro".into(),
            code: Some("CE01".into()),
            place_id: "place-1".into(),
            state: "SP".into(),
            region: "Sudeste".into(),
            team: None,
            address: None,
            city: None,
        };
        assert_eq!(store.display_name(), "CE01 - Shopping Centro");
    }
}
