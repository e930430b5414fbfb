//! Second-phase enrichment: attach comment-derived annotations to the raw
//! numeric analyses.

use serde::{Deserialize, Serialize};
use storepulse_analytics::{RawAnomaly, RawRegionalAnalysis, Severity, StoreScore};
use storepulse_core::{Review, Store};

use crate::deep::{deep_analyze, StoreAspects};
use crate::rules::{HIGHLIGHT_RULES, PROBLEM_RULES};
use crate::scanner::matches_rule;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightedStore {
    pub store: Store,
    pub average: f64,
    pub count: usize,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemStore {
    pub store: Store,
    pub average: f64,
    pub count: usize,
    pub problems: Vec<String>,
}

/// A regional analysis with annotated store tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalAnalysis {
    #[serde(flatten)]
    pub raw: RawRegionalAnalysis,
    #[serde(rename = "topStoresAnnotated")]
    pub top_stores: Vec<HighlightedStore>,
    #[serde(rename = "opportunityStoresAnnotated")]
    pub opportunity_stores: Vec<ProblemStore>,
    #[serde(rename = "worstStoreAnnotated", skip_serializing_if = "Option::is_none")]
    pub worst_store: Option<ProblemStore>,
}

/// An anomaly carrying the flagged store's deep analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub store: Store,
    pub average: f64,
    pub baseline: f64,
    pub gap: f64,
    pub count: usize,
    pub severity: Severity,
    pub reasons: Vec<String>,
    pub aspects: StoreAspects,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub conclusion: String,
}

/// Annotate the tiers of a raw regional analysis from comment text. Top-tier
/// stores get highlights from their rating >= 4 comments; the worst and
/// opportunity stores get problems from their rating <= 3 comments.
pub fn enrich_regional(raw: RawRegionalAnalysis, reviews: &[Review]) -> RegionalAnalysis {
    let noun = raw.kind.noun();

    let top_stores = raw
        .top_stores
        .iter()
        .map(|score| {
            let mut highlights = annotate(score, reviews, true);
            if highlights.is_empty() {
                highlights.push(
                    if score.average >= 4.5 {
                        "Excellent overall rating"
                    } else if score.average >= 4.3 {
                        "Very positive reviews"
                    } else {
                        "Good performance"
                    }
                    .to_string(),
                );
            }
            HighlightedStore {
                store: score.store.clone(),
                average: score.average,
                count: score.count,
                highlights,
            }
        })
        .collect();

    let opportunity_stores = raw
        .opportunity_stores
        .iter()
        .map(|score| {
            let mut problems = annotate(score, reviews, false);
            if problems.is_empty() {
                problems.push(format!("Below {noun} average"));
            }
            ProblemStore {
                store: score.store.clone(),
                average: score.average,
                count: score.count,
                problems,
            }
        })
        .collect();

    let worst_store = raw.worst_store.as_ref().map(|score| {
        let mut problems = annotate(score, reviews, false);
        if problems.is_empty() {
            problems.push("Needs urgent improvement".to_string());
        }
        ProblemStore {
            store: score.store.clone(),
            average: score.average,
            count: score.count,
            problems,
        }
    });

    RegionalAnalysis {
        raw,
        top_stores,
        opportunity_stores,
        worst_store,
    }
}

fn annotate(score: &StoreScore, reviews: &[Review], positive: bool) -> Vec<String> {
    let comments: Vec<String> = reviews
        .iter()
        .filter(|r| r.store_id == score.store.id)
        .filter(|r| if positive { r.rating >= 4 } else { r.rating <= 3 })
        .filter_map(|r| r.comment.as_deref())
        .map(str::to_lowercase)
        .collect();

    let rules = if positive { HIGHLIGHT_RULES } else { PROBLEM_RULES };
    rules
        .iter()
        .filter(|rule| comments.iter().any(|c| matches_rule(c, rule)))
        .map(|rule| rule.label.to_string())
        .collect()
}

/// Attach each anomalous store's deep analysis.
pub fn enrich_anomalies(anomalies: Vec<RawAnomaly>, reviews: &[Review]) -> Vec<Anomaly> {
    anomalies
        .into_iter()
        .map(|anomaly| {
            let analysis = deep_analyze(reviews, &anomaly.store);
            Anomaly {
                store: anomaly.store,
                average: anomaly.average,
                baseline: anomaly.baseline,
                gap: anomaly.gap,
                count: anomaly.count,
                severity: anomaly.severity,
                reasons: anomaly.reasons,
                aspects: analysis.aspects,
                pattern: analysis.pattern,
                conclusion: analysis.conclusion,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storepulse_analytics::{analyze_scope, detect_anomalies, ScopeKind};

    fn store(id: &str, region: &str) -> Store {
        Store {
            id: id.into(),
            name: format!("Loja {id}"),
            code: None,
            place_id: format!("place-{id}"),
            state: "SP".into(),
            region: region.into(),
            team: None,
            address: None,
            city: None,
        }
    }

    fn review(store_id: &str, rating: u8, comment: Option<&str>) -> Review {
        Review {
            id: format!(
                "{store_id}-{rating}-{}",
                comment.map(str::len).unwrap_or_default()
            ),
            store_id: store_id.into(),
            place_id: format!("place-{store_id}"),
            date: Utc::now(),
            rating,
            comment: comment.map(Into::into),
            author: None,
            author_url: None,
            source_time: None,
        }
    }

    #[test]
    fn test_top_store_highlights_from_comments() {
        let stores = vec![store("a", "Sul"), store("b", "Sul")];
        let reviews = vec![
            review("a", 5, Some("atendimento excelente, tudo limpo e organizado")),
            review("a", 4, None),
            review("b", 1, Some("atendimento péssimo e ruim")),
            review("b", 2, None),
        ];

        let raw = analyze_scope(&reviews, &stores, ScopeKind::Region, "Sul").unwrap();
        let enriched = enrich_regional(raw, &reviews);

        let top = &enriched.top_stores[0];
        assert_eq!(top.store.id, "a");
        assert!(top.highlights.contains(&"Standout service".to_string()));
        assert!(top.highlights.contains(&"Organized environment".to_string()));

        let worst = enriched.worst_store.expect("worst store annotated");
        assert_eq!(worst.store.id, "b");
        assert!(worst.problems.contains(&"Problematic service".to_string()));
    }

    #[test]
    fn test_fallback_highlight_when_nothing_matches() {
        let stores = vec![store("a", "Sul")];
        let reviews = vec![review("a", 5, None), review("a", 4, None)];

        let raw = analyze_scope(&reviews, &stores, ScopeKind::Region, "Sul").unwrap();
        let enriched = enrich_regional(raw, &reviews);

        assert_eq!(
            enriched.top_stores[0].highlights,
            vec!["Excellent overall rating".to_string()]
        );
    }

    #[test]
    fn test_anomalies_carry_deep_analysis() {
        let stores = vec![store("good", "Sul"), store("bad", "Sul")];
        let mut reviews: Vec<Review> = (0..20).map(|i| {
            let mut r = review("good", 5, None);
            r.id = format!("good-{i}");
            r
        })
        .collect();
        reviews.push(review("bad", 1, Some("atendimento terrível, me ignorou na loja")));
        reviews.push(review("bad", 1, Some("erro no pedido, nunca entregou o produto")));

        let raw = detect_anomalies(&reviews, &stores, 3.5);
        let enriched = enrich_anomalies(raw, &reviews);

        assert_eq!(enriched.len(), 1);
        let anomaly = &enriched[0];
        assert_eq!(anomaly.store.id, "bad");
        assert!(anomaly.aspects.service.is_some());
        assert!(anomaly.conclusion.contains("Problem of"));
    }
}
