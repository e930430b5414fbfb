//! Macro/micro qualitative analysis orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storepulse_core::{Error, Result, Review, Scope, Store};
use tracing::warn;

use crate::client::{strip_json_fences, SummarizeClient};
use crate::prompts::{macro_prompt, micro_prompt, ANALYST_SYSTEM};

/// Comments forwarded to the collaborator per request.
const MAX_COMMENTS: usize = 500;
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisLevel {
    Macro,
    Micro,
}

/// Structured summary. Macro analyses leave the micro-only fields empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualitativeAnalysis {
    pub level: AnalysisLevel,
    pub scope: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub trends: Vec<String>,
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default, rename = "frequentComplaints")]
    pub frequent_complaints: Vec<String>,
    #[serde(default, rename = "positiveHighlights")]
    pub positive_highlights: Vec<String>,
    #[serde(default, rename = "actionPlan")]
    pub action_plan: Vec<String>,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

impl QualitativeAnalysis {
    fn empty(level: AnalysisLevel, scope: String) -> Self {
        Self {
            level,
            scope,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            trends: Vec::new(),
            opportunities: Vec::new(),
            summary: String::new(),
            frequent_complaints: Vec::new(),
            positive_highlights: Vec::new(),
            action_plan: Vec::new(),
            generated_at: Utc::now(),
        }
    }
}

fn comment_texts(reviews: &[Review]) -> Vec<String> {
    reviews
        .iter()
        .filter_map(|r| r.comment_text())
        .map(str::to_string)
        .take(MAX_COMMENTS)
        .collect()
}

fn string_array(value: &serde_json::Value, key: &str) -> Vec<String> {
    value[key]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Generate a qualitative analysis for the scoped review set. A store scope
/// produces the micro shape and errors with NotFound for an unknown store;
/// everything else produces the macro shape. Collaborator and parse failures
/// degrade to a well-formed empty analysis.
pub async fn generate_qualitative(
    client: &dyn SummarizeClient,
    reviews: &[Review],
    stores: &[Store],
    scope: &Scope,
) -> Result<QualitativeAnalysis> {
    if let Some(store_id) = &scope.store_id {
        let store = stores
            .iter()
            .find(|s| &s.id == store_id)
            .ok_or_else(|| Error::NotFound(format!("store {store_id} is not in the directory")))?;
        return Ok(generate_micro(client, reviews, store).await);
    }
    Ok(generate_macro(client, reviews, &scope.describe()).await)
}

async fn generate_macro(
    client: &dyn SummarizeClient,
    reviews: &[Review],
    scope_label: &str,
) -> QualitativeAnalysis {
    let comments = comment_texts(reviews);
    if comments.is_empty() {
        return QualitativeAnalysis::empty(AnalysisLevel::Macro, scope_label.to_string());
    }

    let raw = match client
        .complete(ANALYST_SYSTEM, &macro_prompt(&comments, scope_label), TEMPERATURE)
        .await
    {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, "macro analysis failed, returning empty result");
            return QualitativeAnalysis::empty(AnalysisLevel::Macro, scope_label.to_string());
        }
    };

    let value: serde_json::Value = match serde_json::from_str(strip_json_fences(&raw)) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "macro analysis response did not parse");
            return QualitativeAnalysis::empty(AnalysisLevel::Macro, scope_label.to_string());
        }
    };

    QualitativeAnalysis {
        level: AnalysisLevel::Macro,
        scope: scope_label.to_string(),
        strengths: string_array(&value, "strengths"),
        weaknesses: string_array(&value, "weaknesses"),
        trends: string_array(&value, "trends"),
        opportunities: string_array(&value, "opportunities"),
        summary: String::new(),
        frequent_complaints: Vec::new(),
        positive_highlights: Vec::new(),
        action_plan: Vec::new(),
        generated_at: Utc::now(),
    }
}

async fn generate_micro(
    client: &dyn SummarizeClient,
    reviews: &[Review],
    store: &Store,
) -> QualitativeAnalysis {
    let scope_label = format!("store {}", store.id);
    let comments = comment_texts(reviews);
    if comments.is_empty() {
        return QualitativeAnalysis::empty(AnalysisLevel::Micro, scope_label);
    }

    let raw = match client
        .complete(ANALYST_SYSTEM, &micro_prompt(&comments, store), TEMPERATURE)
        .await
    {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, "micro analysis failed, returning empty result");
            return QualitativeAnalysis::empty(AnalysisLevel::Micro, scope_label);
        }
    };

    let value: serde_json::Value = match serde_json::from_str(strip_json_fences(&raw)) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "micro analysis response did not parse");
            return QualitativeAnalysis::empty(AnalysisLevel::Micro, scope_label);
        }
    };

    // The action plan doubles as the opportunities list, keeping the macro
    // and micro shapes interchangeable for consumers that only read the
    // shared fields.
    let action_plan = string_array(&value, "actionPlan");

    QualitativeAnalysis {
        level: AnalysisLevel::Micro,
        scope: scope_label,
        strengths: string_array(&value, "strengths"),
        weaknesses: string_array(&value, "weaknesses"),
        trends: Vec::new(),
        opportunities: action_plan.clone(),
        summary: value["summary"].as_str().unwrap_or_default().to_string(),
        frequent_complaints: string_array(&value, "frequentComplaints"),
        positive_highlights: string_array(&value, "positiveHighlights"),
        action_plan,
        generated_at: Utc::now(),
    }
}
