//! Sentiment rollup plus LLM-grouped praises and complaints.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storepulse_core::Review;
use storepulse_heuristics::{categorize_comment, classify_sentiment, Sentiment};
use tracing::warn;

use crate::client::{strip_json_fences, SummarizeClient};
use crate::prompts::{complaint_prompt, praise_prompt, COMPLAINT_SYSTEM, PRAISE_SYSTEM};

/// Comments forwarded per extraction call.
const MAX_EXTRACTION_COMMENTS: usize = 200;
const EXTRACTION_TEMPERATURE: f64 = 0.3;
const MAX_MENTIONS: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub total: usize,
}

/// One grouped praise or complaint reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub text: String,
    pub mentions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    #[serde(rename = "sentimentDistribution")]
    pub sentiment_distribution: SentimentDistribution,
    /// Comment counts per category label, alphabetical for stable output.
    #[serde(rename = "categoryDistribution")]
    pub category_distribution: BTreeMap<String, usize>,
    #[serde(rename = "topPraises")]
    pub top_praises: Vec<Mention>,
    #[serde(rename = "topComplaints")]
    pub top_complaints: Vec<Mention>,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

fn distribution(reviews: &[Review]) -> SentimentDistribution {
    let mut dist = SentimentDistribution {
        total: reviews.len(),
        ..Default::default()
    };
    for review in reviews {
        match classify_sentiment(review.rating) {
            Sentiment::Positive => dist.positive += 1,
            Sentiment::Neutral => dist.neutral += 1,
            Sentiment::Negative => dist.negative += 1,
        }
    }
    dist
}

async fn extract_mentions(
    client: &dyn SummarizeClient,
    system: &str,
    prompt: String,
    key: &str,
) -> Vec<Mention> {
    let raw = match client.complete(system, &prompt, EXTRACTION_TEMPERATURE).await {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, key, "mention extraction failed");
            return Vec::new();
        }
    };

    let value: serde_json::Value = match serde_json::from_str(strip_json_fences(&raw)) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, key, "mention extraction response did not parse");
            return Vec::new();
        }
    };

    value[key]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    Some(Mention {
                        text: item["text"].as_str()?.to_string(),
                        mentions: item["mentions"].as_u64().unwrap_or(0),
                    })
                })
                .take(MAX_MENTIONS)
                .collect()
        })
        .unwrap_or_default()
}

/// Full sentiment analysis: numeric distribution and keyword categorization
/// locally, praise/complaint grouping via the collaborator. The two
/// extraction calls are independent and run concurrently.
pub async fn generate_sentiment(
    client: &dyn SummarizeClient,
    reviews: &[Review],
) -> SentimentAnalysis {
    let sentiment_distribution = distribution(reviews);

    let mut category_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for review in reviews {
        if let Some(comment) = review.comment_text() {
            let label = categorize_comment(comment).label().to_string();
            *category_distribution.entry(label).or_insert(0) += 1;
        }
    }

    let positive: Vec<String> = reviews
        .iter()
        .filter(|r| r.rating >= 4)
        .filter_map(|r| r.comment_text())
        .map(str::to_string)
        .take(MAX_EXTRACTION_COMMENTS)
        .collect();
    let negative: Vec<String> = reviews
        .iter()
        .filter(|r| r.rating <= 2)
        .filter_map(|r| r.comment_text())
        .map(str::to_string)
        .take(MAX_EXTRACTION_COMMENTS)
        .collect();

    let (top_praises, top_complaints) = tokio::join!(
        async {
            if positive.is_empty() {
                Vec::new()
            } else {
                extract_mentions(client, PRAISE_SYSTEM, praise_prompt(&positive), "praises").await
            }
        },
        async {
            if negative.is_empty() {
                Vec::new()
            } else {
                extract_mentions(
                    client,
                    COMPLAINT_SYSTEM,
                    complaint_prompt(&negative),
                    "complaints",
                )
                .await
            }
        },
    );

    SentimentAnalysis {
        sentiment_distribution,
        category_distribution,
        top_praises,
        top_complaints,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storepulse_core::Result;

    struct KeyedClient;

    #[async_trait]
    impl SummarizeClient for KeyedClient {
        async fn complete(&self, system: &str, _: &str, _: f64) -> Result<String> {
            if system == PRAISE_SYSTEM {
                Ok(r#"{"praises":[{"text":"Great service","mentions":3}]}"#.to_string())
            } else {
                Ok(r#"{"complaints":[{"text":"Long lines","mentions":2}]}"#.to_string())
            }
        }
    }

    fn review(rating: u8, comment: Option<&str>) -> Review {
        Review {
            id: format!("{rating}-{}", comment.map(str::len).unwrap_or_default()),
            store_id: "a".into(),
            place_id: "place-a".into(),
            date: Utc::now(),
            rating,
            comment: comment.map(Into::into),
            author: None,
            author_url: None,
            source_time: None,
        }
    }

    #[tokio::test]
    async fn test_distribution_and_categories() {
        let reviews = vec![
            review(5, Some("Atendimento excelente")),
            review(4, None),
            review(3, Some("Preço um pouco caro")),
            review(1, Some("Fila enorme, muita demora")),
        ];

        let analysis = generate_sentiment(&KeyedClient, &reviews).await;

        assert_eq!(analysis.sentiment_distribution.positive, 2);
        assert_eq!(analysis.sentiment_distribution.neutral, 1);
        assert_eq!(analysis.sentiment_distribution.negative, 1);
        assert_eq!(analysis.sentiment_distribution.total, 4);

        assert_eq!(analysis.category_distribution["Atendimento"], 1);
        assert_eq!(analysis.category_distribution["Preços"], 1);
        assert_eq!(analysis.category_distribution["Tempo de Espera"], 1);
    }

    #[tokio::test]
    async fn test_praises_and_complaints_run_off_same_client() {
        let reviews = vec![
            review(5, Some("Atendimento excelente")),
            review(1, Some("Fila enorme, muita demora")),
        ];

        let analysis = generate_sentiment(&KeyedClient, &reviews).await;

        assert_eq!(analysis.top_praises.len(), 1);
        assert_eq!(analysis.top_praises[0].text, "Great service");
        assert_eq!(analysis.top_complaints[0].mentions, 2);
    }

    struct GarbledClient;

    #[async_trait]
    impl SummarizeClient for GarbledClient {
        async fn complete(&self, _: &str, _: &str, _: f64) -> Result<String> {
            Ok("praises: lots of them, trust me".to_string())
        }
    }

    #[tokio::test]
    async fn test_malformed_extraction_yields_no_mentions() {
        let reviews = vec![
            review(5, Some("Atendimento excelente")),
            review(1, Some("Fila enorme, muita demora")),
        ];

        let analysis = generate_sentiment(&GarbledClient, &reviews).await;

        // The local rollups still come through; only the mentions are lost.
        assert!(analysis.top_praises.is_empty());
        assert!(analysis.top_complaints.is_empty());
        assert_eq!(analysis.sentiment_distribution.total, 2);
    }

    #[tokio::test]
    async fn test_no_comments_means_no_extractions() {
        let reviews = vec![review(5, None), review(1, None)];
        let analysis = generate_sentiment(&KeyedClient, &reviews).await;
        assert!(analysis.top_praises.is_empty());
        assert!(analysis.top_complaints.is_empty());
        assert!(analysis.category_distribution.is_empty());
    }
}
