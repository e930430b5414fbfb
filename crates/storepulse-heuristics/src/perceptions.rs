//! Recurring-perception mining: positive and negative themes extracted from
//! same-sentiment comments via the theme rule tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use storepulse_core::{Review, Store};

use crate::rules::{
    ThemeRule, NEGATIVE_THEMES, OPERATIONAL_ERRORS_THEME, POSITIVE_THEMES, SEVERE_CASE_KEYWORDS,
};
use crate::scanner::{contains_any, keyword_snippet, truncate_chars};

/// A verbatim severe case surfaced for the Operational Errors theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SevereCase {
    pub store: String,
    pub excerpt: String,
}

/// One recurring theme with its share of same-sentiment comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perception {
    pub theme: String,
    /// Integer percentage of same-sentiment comments mentioning the theme.
    pub percentage: u32,
    /// Up to 3 store names most frequently implicated.
    pub stores: Vec<String>,
    /// Up to 3 short example snippets.
    pub examples: Vec<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default, rename = "severeCases")]
    pub severe_cases: Vec<SevereCase>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerceptionReport {
    pub positive: Vec<Perception>,
    pub negative: Vec<Perception>,
}

struct ScannedComment<'a> {
    text: String,
    store_id: &'a str,
    rating: u8,
}

/// Mine recurring positive (rating >= 4) and negative (rating <= 3) themes
/// across the review set. Themes with zero matches are omitted; the rest are
/// sorted by percentage descending.
pub fn mine_perceptions(reviews: &[Review], stores: &[Store]) -> PerceptionReport {
    let comments: Vec<ScannedComment> = reviews
        .iter()
        .filter_map(|review| {
            let text = review.comment.as_deref()?;
            if text.trim().len() <= 10 {
                return None;
            }
            Some(ScannedComment {
                text: text.to_lowercase(),
                store_id: &review.store_id,
                rating: review.rating,
            })
        })
        .collect();

    if comments.is_empty() {
        return PerceptionReport::default();
    }

    let positive_pool: Vec<&ScannedComment> =
        comments.iter().filter(|c| c.rating >= 4).collect();
    let negative_pool: Vec<&ScannedComment> =
        comments.iter().filter(|c| c.rating <= 3).collect();

    let mut positive = mine_pool(&positive_pool, POSITIVE_THEMES, stores, false);
    let mut negative = mine_pool(&negative_pool, NEGATIVE_THEMES, stores, true);

    positive.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    negative.sort_by(|a, b| b.percentage.cmp(&a.percentage));

    PerceptionReport { positive, negative }
}

fn mine_pool(
    pool: &[&ScannedComment],
    themes: &[ThemeRule],
    stores: &[Store],
    negative: bool,
) -> Vec<Perception> {
    if pool.is_empty() {
        return Vec::new();
    }

    let mut perceptions = Vec::new();

    for theme in themes {
        let matches: Vec<&&ScannedComment> = pool
            .iter()
            .filter(|c| contains_any(&c.text, theme.keywords))
            .collect();

        if matches.is_empty() {
            continue;
        }

        let percentage = ((matches.len() as f64 / pool.len() as f64) * 100.0).round() as u32;
        let top_stores = most_implicated_stores(&matches, stores);

        let examples: Vec<String> = matches
            .iter()
            .take(3)
            .map(|c| keyword_snippet(&c.text, theme.keywords))
            .collect();

        let severe_cases = if negative && theme.name == OPERATIONAL_ERRORS_THEME {
            matches
                .iter()
                .filter(|c| contains_any(&c.text, SEVERE_CASE_KEYWORDS))
                .take(2)
                .map(|c| SevereCase {
                    store: store_name(stores, c.store_id),
                    excerpt: truncate_chars(&c.text, 150),
                })
                .collect()
        } else {
            Vec::new()
        };

        let description = if negative {
            describe(percentage, &top_stores, "critical reviews", "Most affected stores")
        } else {
            describe(percentage, &top_stores, "positive reviews", "Standout stores")
        };

        perceptions.push(Perception {
            theme: theme.name.to_string(),
            percentage,
            stores: top_stores,
            examples,
            description,
            severe_cases,
        });
    }

    perceptions
}

/// Up to 3 store names with the most matched comments. Ties break by name so
/// the output is deterministic.
fn most_implicated_stores(matches: &[&&ScannedComment], stores: &[Store]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for comment in matches {
        *counts.entry(comment.store_id).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(3)
        .map(|(store_id, _)| store_name(stores, store_id))
        .collect()
}

fn store_name(stores: &[Store], store_id: &str) -> String {
    stores
        .iter()
        .find(|s| s.id == store_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| store_id.to_string())
}

fn describe(percentage: u32, stores: &[String], pool_label: &str, stores_label: &str) -> String {
    let stores_text = if stores.is_empty() {
        String::new()
    } else {
        format!(" {}: {}.", stores_label, stores.join(", "))
    };
    format!("Mentioned in {percentage}% of {pool_label}.{stores_text}")
}
