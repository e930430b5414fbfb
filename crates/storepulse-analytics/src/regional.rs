//! Comparative analysis of a scope (region, state or team): peer statistics,
//! health status, store tiers, narrative pattern and outliers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use storepulse_core::{round2, Error, Result, Review, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Region,
    State,
    Team,
}

impl ScopeKind {
    pub fn noun(self) -> &'static str {
        match self {
            ScopeKind::Region => "region",
            ScopeKind::State => "state",
            ScopeKind::Team => "team",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeStatus {
    Leading,
    Balanced,
    Inconsistent,
    Problematic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScopePattern {
    Positive,
    Negative,
    Mixed,
}

/// A store with its scoped average.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreScore {
    pub store: Store,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outlier {
    pub store: Store,
    pub average: f64,
    pub reason: String,
}

/// Comparative analysis before text enrichment attaches highlight and
/// problem annotations to the store tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRegionalAnalysis {
    pub kind: ScopeKind,
    /// The region/state/team value analyzed.
    pub name: String,
    /// Mean of per-store averages, not weighted by review volume.
    #[serde(rename = "scopeAverage")]
    pub scope_average: f64,
    #[serde(rename = "storeCount")]
    pub store_count: usize,
    pub status: ScopeStatus,
    /// Stores at or above scope average minus 0.1, best first.
    #[serde(rename = "topStores")]
    pub top_stores: Vec<StoreScore>,
    /// Stores below scope average minus 0.1, excluding the single worst.
    #[serde(rename = "opportunityStores")]
    pub opportunity_stores: Vec<StoreScore>,
    /// The lowest-scoring store, reported only when its average is below 4.0.
    #[serde(rename = "worstStore", skip_serializing_if = "Option::is_none")]
    pub worst_store: Option<StoreScore>,
    pub pattern: ScopePattern,
    #[serde(rename = "patternDescription")]
    pub pattern_description: String,
    pub outliers: Vec<Outlier>,
}

/// Analyze one scope value. Errors with NotFound when no store matches.
pub fn analyze_scope(
    reviews: &[Review],
    stores: &[Store],
    kind: ScopeKind,
    name: &str,
) -> Result<RawRegionalAnalysis> {
    let scoped: Vec<&Store> = stores
        .iter()
        .filter(|s| match kind {
            ScopeKind::Region => s.region == name,
            ScopeKind::State => s.state == name,
            ScopeKind::Team => s.team.as_deref() == Some(name),
        })
        .collect();

    if scoped.is_empty() {
        return Err(Error::NotFound(format!(
            "no store matched {} {name}",
            kind.noun()
        )));
    }

    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for review in reviews {
        if scoped.iter().any(|s| s.id == review.store_id) {
            let entry = sums.entry(review.store_id.as_str()).or_insert((0.0, 0));
            entry.0 += f64::from(review.rating);
            entry.1 += 1;
        }
    }

    let mut scored: Vec<StoreScore> = scoped
        .iter()
        .filter_map(|store| {
            let (sum, count) = sums.get(store.id.as_str())?;
            Some(StoreScore {
                store: (*store).clone(),
                average: round2(sum / *count as f64),
                count: *count,
            })
        })
        .collect();
    scored.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let scope_average = if scored.is_empty() {
        0.0
    } else {
        round2(scored.iter().map(|s| s.average).sum::<f64>() / scored.len() as f64)
    };

    let status = if scope_average >= 4.2 {
        ScopeStatus::Leading
    } else if scope_average < 3.8 {
        ScopeStatus::Problematic
    } else if scored.iter().any(|s| s.average < 3.5) {
        ScopeStatus::Inconsistent
    } else {
        ScopeStatus::Balanced
    };

    let worst_id = scored.last().map(|s| s.store.id.clone());

    let top_stores: Vec<StoreScore> = scored
        .iter()
        .filter(|s| s.average >= scope_average - 0.1)
        .cloned()
        .collect();

    // The single worst store never lands in the opportunity tier, even when
    // it falls short of the worst-store cutoff below.
    let opportunity_stores: Vec<StoreScore> = scored
        .iter()
        .filter(|s| {
            s.average < scope_average - 0.1 && Some(&s.store.id) != worst_id.as_ref()
        })
        .cloned()
        .collect();

    let worst_store = scored
        .last()
        .filter(|s| s.average < 4.0)
        .cloned();

    let above = scored.iter().filter(|s| s.average >= scope_average).count();
    let pct_above = if scored.is_empty() {
        0.0
    } else {
        (above as f64 / scored.len() as f64) * 100.0
    };

    // A scope whose stores have no reviews at all has no spread to talk
    // about; it degenerates to the Mixed description.
    let (pattern, pattern_description) = if !scored.is_empty() && pct_above >= 70.0 {
        (
            ScopePattern::Positive,
            format!(
                "{name} has the best overall ratings, with {above} of {} stores at or above {scope_average:.2} stars.",
                scored.len()
            ),
        )
    } else if !scored.is_empty() && pct_above <= 30.0 {
        let min = scored.last().map(|s| s.average).unwrap_or(0.0);
        let max = scored.first().map(|s| s.average).unwrap_or(0.0);
        (
            ScopePattern::Negative,
            format!("{name} has the worst ratings and the widest spread ({min:.1} to {max:.1})."),
        )
    } else {
        (
            ScopePattern::Mixed,
            format!("{name} shows balanced ratings with moderate variation across stores."),
        )
    };

    let outliers: Vec<Outlier> = scored
        .iter()
        .filter(|s| (s.average - scope_average).abs() > 0.5)
        .map(|s| Outlier {
            store: s.store.clone(),
            average: s.average,
            reason: if s.average < scope_average {
                format!("Average {:.1} pulls the scope average down", s.average)
            } else {
                format!("Average {:.1} above the scope average", s.average)
            },
        })
        .collect();

    Ok(RawRegionalAnalysis {
        kind,
        name: name.to_string(),
        scope_average,
        store_count: scored.len(),
        status,
        top_stores,
        opportunity_stores,
        worst_store,
        pattern,
        pattern_description,
        outliers,
    })
}

/// Analyze every distinct value of the given scope kind present in the
/// directory, best scope first.
pub fn analyze_all_scopes(
    reviews: &[Review],
    stores: &[Store],
    kind: ScopeKind,
) -> Result<Vec<RawRegionalAnalysis>> {
    let mut names: Vec<String> = Vec::new();
    for store in stores {
        let value = match kind {
            ScopeKind::Region => Some(store.region.clone()),
            ScopeKind::State => Some(store.state.clone()),
            ScopeKind::Team => store.team.clone(),
        };
        if let Some(value) = value {
            if !names.contains(&value) {
                names.push(value);
            }
        }
    }

    let mut analyses = names
        .iter()
        .map(|name| analyze_scope(reviews, stores, kind, name))
        .collect::<Result<Vec<_>>>()?;
    analyses.sort_by(|a, b| {
        b.scope_average
            .partial_cmp(&a.scope_average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(analyses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    fn reviews_for(store_id: &str, ratings: &[u8]) -> Vec<Review> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, &rating)| Review {
                id: format!("{store_id}-{i}"),
                store_id: store_id.into(),
                place_id: format!("place-{store_id}"),
                date: Utc::now(),
                rating,
                comment: None,
                author: None,
                author_url: None,
                source_time: None,
            })
            .collect()
    }

    fn fixture() -> (Vec<Store>, Vec<Review>) {
        // Store averages 4.5, 4.3, 4.0, 3.0; scope average 3.95.
        let stores = vec![
            store("a", "Sul"),
            store("b", "Sul"),
            store("c", "Sul"),
            store("d", "Sul"),
        ];
        let mut reviews = reviews_for("a", &[4, 5]);
        reviews.extend(reviews_for("b", &[4, 4, 5, 4, 4, 4, 5, 4, 5, 4]));
        reviews.extend(reviews_for("c", &[4, 4]));
        reviews.extend(reviews_for("d", &[3, 3]));
        (stores, reviews)
    }

    #[test]
    fn test_scope_average_is_mean_of_store_averages() {
        let (stores, reviews) = fixture();
        let analysis = analyze_scope(&reviews, &stores, ScopeKind::Region, "Sul").unwrap();
        // (4.5 + 4.3 + 4.0 + 3.0) / 4
        assert_eq!(analysis.scope_average, 3.95);
        assert_eq!(analysis.store_count, 4);
        assert_eq!(analysis.status, ScopeStatus::Inconsistent);
    }

    #[test]
    fn test_tiers_split_around_scope_average() {
        let (stores, reviews) = fixture();
        let analysis = analyze_scope(&reviews, &stores, ScopeKind::Region, "Sul").unwrap();

        let top_ids: Vec<&str> = analysis
            .top_stores
            .iter()
            .map(|s| s.store.id.as_str())
            .collect();
        assert_eq!(top_ids, vec!["a", "b", "c"]);

        // The lone below-average store is also the worst, so the opportunity
        // tier stays empty.
        assert!(analysis.opportunity_stores.is_empty());

        let worst = analysis.worst_store.expect("worst store below 4.0");
        assert_eq!(worst.store.id, "d");
        assert_eq!(worst.average, 3.0);
    }

    #[test]
    fn test_worst_store_suppressed_when_healthy() {
        let stores = vec![store("a", "Sul"), store("b", "Sul")];
        let mut reviews = reviews_for("a", &[5, 5]);
        reviews.extend(reviews_for("b", &[4, 4]));
        let analysis = analyze_scope(&reviews, &stores, ScopeKind::Region, "Sul").unwrap();
        assert!(analysis.worst_store.is_none());
        assert_eq!(analysis.status, ScopeStatus::Leading);
    }

    #[test]
    fn test_reviewless_scope_degenerates_to_mixed() {
        let stores = vec![store("a", "Sul"), store("b", "Sul")];
        let analysis = analyze_scope(&[], &stores, ScopeKind::Region, "Sul").unwrap();

        assert_eq!(analysis.store_count, 0);
        assert_eq!(analysis.scope_average, 0.0);
        assert_eq!(analysis.pattern, ScopePattern::Mixed);
        assert!(analysis.pattern_description.contains("balanced"));
        assert!(analysis.worst_store.is_none());
        assert!(analysis.outliers.is_empty());
    }

    #[test]
    fn test_unknown_scope_is_not_found() {
        let (stores, reviews) = fixture();
        let err = analyze_scope(&reviews, &stores, ScopeKind::Region, "Norte").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_outliers_exceed_half_star_gap() {
        let (stores, reviews) = fixture();
        let analysis = analyze_scope(&reviews, &stores, ScopeKind::Region, "Sul").unwrap();
        // |3.0 - 3.95| and |4.5 - 3.95| both exceed 0.5.
        assert_eq!(analysis.outliers.len(), 2);
        let low = analysis.outliers.iter().find(|o| o.store.id == "d").unwrap();
        assert!(low.reason.contains("pulls the scope average down"));
    }

    #[test]
    fn test_analyze_all_sorts_by_scope_average() {
        let stores = vec![store("a", "Sul"), store("b", "Norte")];
        let mut reviews = reviews_for("a", &[3]);
        reviews.extend(reviews_for("b", &[5]));
        let all = analyze_all_scopes(&reviews, &stores, ScopeKind::Region).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Norte");
        assert_eq!(all[1].name, "Sul");
    }
}
