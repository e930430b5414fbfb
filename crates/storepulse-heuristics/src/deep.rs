//! Per-store deep-dive analysis: aspect statuses, revealing quotes and an
//! assembled conclusion.

use serde::{Deserialize, Serialize};
use storepulse_core::{round2, Review, Store};

use crate::rules::{
    OPERATIONS_ASPECT, POLICY_ASPECT, POLICY_NEGATIVE_ASPECT, SERVICE_NEGATIVE_ASPECT,
    SERVICE_POSITIVE_ASPECT, STRUCTURE_ASPECT,
};
use crate::scanner::contains_any;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectStatus {
    Ok,
    Warning,
    Critical,
}

/// One analyzed aspect of a store. The percentage and count fields are only
/// meaningful for some aspects and stay None otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aspect {
    pub status: AspectStatus,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", rename = "positivePct")]
    pub positive_pct: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "negativePct")]
    pub negative_pct: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "commentCount")]
    pub comment_count: Option<usize>,
}

/// Aspects are omitted entirely when their keyword set never matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreAspects {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<Aspect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Aspect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<Aspect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<Aspect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepAnalysis {
    pub store: Store,
    pub average: f64,
    pub total: usize,
    pub aspects: StoreAspects,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub quotes: Vec<String>,
    pub conclusion: String,
}

/// Analyze one store's reviews across the four aspect buckets.
///
/// Only comments longer than 10 characters enter the scan. A bucket appears
/// in the output only when its keywords matched at least once (service is the
/// exception: it is reported whenever any comment exists at all).
pub fn deep_analyze(reviews: &[Review], store: &Store) -> DeepAnalysis {
    let store_reviews: Vec<&Review> = reviews.iter().filter(|r| r.store_id == store.id).collect();

    if store_reviews.is_empty() {
        return DeepAnalysis {
            store: store.clone(),
            average: 0.0,
            total: 0,
            aspects: StoreAspects::default(),
            pattern: None,
            quotes: Vec::new(),
            conclusion: "Not enough data for analysis.".to_string(),
        };
    }

    let average = store_reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>()
        / store_reviews.len() as f64;

    let comments: Vec<String> = store_reviews
        .iter()
        .filter_map(|r| r.comment.as_deref())
        .filter(|c| c.chars().count() > 10)
        .map(str::to_lowercase)
        .collect();

    let structure_hits = comments
        .iter()
        .filter(|c| contains_any(c, STRUCTURE_ASPECT))
        .count();
    let service_negative = comments
        .iter()
        .filter(|c| contains_any(c, SERVICE_NEGATIVE_ASPECT))
        .count();
    let service_positive = comments
        .iter()
        .filter(|c| contains_any(c, SERVICE_POSITIVE_ASPECT))
        .count();
    let policy_mentioned: Vec<&String> = comments
        .iter()
        .filter(|c| contains_any(c, POLICY_ASPECT))
        .collect();
    let policy_negative = policy_mentioned
        .iter()
        .filter(|c| contains_any(c, POLICY_NEGATIVE_ASPECT))
        .count();
    let operations_hits = comments
        .iter()
        .filter(|c| contains_any(c, OPERATIONS_ASPECT))
        .count();

    let structure_status = if comments.is_empty() {
        AspectStatus::Critical
    } else {
        let ratio = structure_hits as f64 / comments.len() as f64;
        if ratio > 0.5 {
            AspectStatus::Ok
        } else if ratio > 0.2 {
            AspectStatus::Warning
        } else {
            AspectStatus::Critical
        }
    };

    let service_status = if service_negative > service_positive * 2 {
        AspectStatus::Critical
    } else if service_negative > service_positive {
        AspectStatus::Warning
    } else {
        AspectStatus::Ok
    };

    let policy_status = if policy_mentioned.is_empty() {
        AspectStatus::Ok
    } else if policy_negative as f64 / policy_mentioned.len() as f64 > 0.5 {
        AspectStatus::Critical
    } else if policy_negative > 0 {
        AspectStatus::Warning
    } else {
        AspectStatus::Ok
    };

    let operations_status = if comments.is_empty() {
        AspectStatus::Ok
    } else {
        let ratio = operations_hits as f64 / comments.len() as f64;
        if ratio > 0.3 {
            AspectStatus::Critical
        } else if operations_hits > 0 {
            AspectStatus::Warning
        } else {
            AspectStatus::Ok
        }
    };

    let mut quotes: Vec<&&Review> = store_reviews
        .iter()
        .filter(|r| r.rating <= 2 && r.comment.is_some())
        .collect();
    quotes.sort_by_key(|r| r.rating);
    let quotes: Vec<String> = quotes
        .into_iter()
        .take(3)
        .filter_map(|r| r.comment.clone())
        .filter(|q| q.chars().count() > 20)
        .collect();

    let mut problems = Vec::new();
    if service_status == AspectStatus::Critical {
        problems.push("MANAGEMENT and SERVICE");
    }
    if operations_status == AspectStatus::Critical {
        problems.push("PROCESSES and SYSTEMS");
    }
    if policy_status == AspectStatus::Critical {
        problems.push("outdated POLICIES");
    }

    let conclusion = if !problems.is_empty() {
        format!(
            "Problem of {}. Store cannot execute basic operations adequately.",
            problems.join(" and ")
        )
    } else if average < 3.5 {
        "Operational and management issues identified. Intervention required.".to_string()
    } else {
        "Performance within expectations, with room for improvement.".to_string()
    };

    let pattern = if operations_status == AspectStatus::Critical
        && service_status == AspectStatus::Critical
    {
        Some("Bureaucracy that drives customers away".to_string())
    } else {
        None
    };

    let aspects = StoreAspects {
        structure: (structure_hits > 0).then(|| Aspect {
            status: structure_status,
            description: match structure_status {
                AspectStatus::Ok => "Excellent".to_string(),
                AspectStatus::Warning => "Regular".to_string(),
                AspectStatus::Critical => "Needs improvement".to_string(),
            },
            positive_pct: Some(pct(structure_hits, comments.len())),
            negative_pct: None,
            comment_count: None,
        }),
        service: (!comments.is_empty()).then(|| Aspect {
            status: service_status,
            description: match service_status {
                AspectStatus::Critical => format!(
                    "Deplorable ({} of {} negative reviews)",
                    service_negative,
                    comments.len()
                ),
                AspectStatus::Warning => "Needs improvement".to_string(),
                AspectStatus::Ok => "Satisfactory".to_string(),
            },
            positive_pct: None,
            negative_pct: Some(pct(service_negative, comments.len())),
            comment_count: Some(comments.len()),
        }),
        policy: (!policy_mentioned.is_empty()).then(|| Aspect {
            status: policy_status,
            description: match policy_status {
                AspectStatus::Critical => "Outdated and restrictive".to_string(),
                AspectStatus::Warning => "Could be improved".to_string(),
                AspectStatus::Ok => "Adequate".to_string(),
            },
            positive_pct: None,
            negative_pct: None,
            comment_count: None,
        }),
        operations: (operations_hits > 0).then(|| Aspect {
            status: operations_status,
            description: match operations_status {
                AspectStatus::Critical => "Chaotic (deliveries, stock management)".to_string(),
                AspectStatus::Warning => "Needs attention".to_string(),
                AspectStatus::Ok => "Adequate".to_string(),
            },
            positive_pct: None,
            negative_pct: None,
            comment_count: None,
        }),
    };

    DeepAnalysis {
        store: store.clone(),
        average: round2(average),
        total: store_reviews.len(),
        aspects,
        pattern,
        quotes,
        conclusion,
    }
}

fn pct(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}
