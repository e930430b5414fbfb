//! Per-review sentiment and comment categorization.

use serde::{Deserialize, Serialize};

use crate::rules::{
    ENVIRONMENT_CATEGORY, ENVIRONMENT_STORE_QUALIFIERS, PRICES_CATEGORY, PRODUCTS_CATEGORY,
    SERVICE_CATEGORY, WAIT_TIME_CATEGORY,
};
use crate::scanner::contains_any;

/// Sentiment is purely a function of the star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// >= 4 positive, == 3 neutral, <= 2 negative. Total over the 1..=5 domain.
pub fn classify_sentiment(rating: u8) -> Sentiment {
    if rating >= 4 {
        Sentiment::Positive
    } else if rating == 3 {
        Sentiment::Neutral
    } else {
        Sentiment::Negative
    }
}

/// Comment topic bucket. Labels keep the dashboard's fixed pt-BR wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentCategory {
    #[serde(rename = "Atendimento")]
    Service,
    #[serde(rename = "Ambiente")]
    Environment,
    #[serde(rename = "Tempo de Espera")]
    WaitTime,
    #[serde(rename = "Produtos")]
    Products,
    #[serde(rename = "Preços")]
    Prices,
    #[serde(rename = "Outros")]
    Other,
}

impl CommentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CommentCategory::Service => "Atendimento",
            CommentCategory::Environment => "Ambiente",
            CommentCategory::WaitTime => "Tempo de Espera",
            CommentCategory::Products => "Produtos",
            CommentCategory::Prices => "Preços",
            CommentCategory::Other => "Outros",
        }
    }
}

impl std::fmt::Display for CommentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Buckets in evaluation order. The keyword sets overlap, so order matters:
/// the first matching bucket wins.
const CATEGORY_ORDER: &[(CommentCategory, &[&str])] = &[
    (CommentCategory::Service, SERVICE_CATEGORY),
    (CommentCategory::Environment, ENVIRONMENT_CATEGORY),
    (CommentCategory::WaitTime, WAIT_TIME_CATEGORY),
    (CommentCategory::Products, PRODUCTS_CATEGORY),
    (CommentCategory::Prices, PRICES_CATEGORY),
];

/// First-match-wins scan of the lower-cased comment against the ordered
/// buckets. Empty or unmatched comments land in Other.
pub fn categorize_comment(comment: &str) -> CommentCategory {
    if comment.trim().is_empty() {
        return CommentCategory::Other;
    }

    let lower = comment.to_lowercase();
    for (category, keywords) in CATEGORY_ORDER {
        let hit = contains_any(&lower, keywords)
            || (*category == CommentCategory::Environment
                && lower.contains("loja")
                && contains_any(&lower, ENVIRONMENT_STORE_QUALIFIERS));
        if hit {
            return *category;
        }
    }
    CommentCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_partitions_rating_domain() {
        assert_eq!(classify_sentiment(5), Sentiment::Positive);
        assert_eq!(classify_sentiment(4), Sentiment::Positive);
        assert_eq!(classify_sentiment(3), Sentiment::Neutral);
        assert_eq!(classify_sentiment(2), Sentiment::Negative);
        assert_eq!(classify_sentiment(1), Sentiment::Negative);
    }

    #[test]
    fn test_service_wins_over_price_on_overlap() {
        // Matches both the service and prices buckets; service is first.
        let category = categorize_comment("Atendimento excelente e preço competitivo");
        assert_eq!(category, CommentCategory::Service);
        assert_eq!(category.label(), "Atendimento");
    }

    #[test]
    fn test_category_buckets() {
        assert_eq!(
            categorize_comment("A fila estava enorme, muita demora"),
            CommentCategory::WaitTime
        );
        assert_eq!(
            categorize_comment("Boa variedade de tamanhos em estoque"),
            CommentCategory::Products
        );
        assert_eq!(
            categorize_comment("Muito caro, sem desconto"),
            CommentCategory::Prices
        );
    }

    #[test]
    fn test_environment_qualifiers_require_store_mention() {
        assert_eq!(
            categorize_comment("Loja limpa e arrumada"),
            CommentCategory::Environment
        );
        // Without "loja" the bare adjective is too generic to categorize.
        assert_eq!(
            categorize_comment("Prateleira arrumada"),
            CommentCategory::Other
        );
    }

    #[test]
    fn test_empty_and_unmatched_fall_through_to_other() {
        assert_eq!(categorize_comment("   "), CommentCategory::Other);
        assert_eq!(categorize_comment("nada a declarar"), CommentCategory::Other);
    }
}
