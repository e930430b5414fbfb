//! Places API clients: the real Google-backed one and a deterministic mock
//! used when no API key is configured.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use storepulse_core::{Error, Result};
use tracing::debug;

use crate::types::{PlaceDetails, PlaceReview};

const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const DETAILS_FIELDS: &str = "place_id,name,formatted_address,rating,user_ratings_total,reviews";

#[async_trait]
pub trait PlacesClient: Send + Sync {
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails>;
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    result: Option<PlaceDetails>,
}

/// Client backed by the Places Details endpoint, requesting pt-BR text.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails> {
        debug!(place_id, "fetching place details");

        let response = self
            .client
            .get(DETAILS_URL)
            .query(&[
                ("place_id", place_id),
                ("fields", DETAILS_FIELDS),
                ("language", "pt-BR"),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(format!("place details request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "place details returned status {}",
                response.status()
            )));
        }

        let body: DetailsResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("malformed place details body: {e}")))?;

        if body.status != "OK" {
            return Err(Error::Upstream(format!(
                "place details status {} for {place_id}: {}",
                body.status,
                body.error_message.unwrap_or_default()
            )));
        }

        let mut details = body
            .result
            .ok_or_else(|| Error::Upstream(format!("place details missing result for {place_id}")))?;
        if details.place_id.is_empty() {
            details.place_id = place_id.to_string();
        }
        Ok(details)
    }
}

/// Canned details so the dashboard works end to end without a key. Output is
/// a pure function of the place id.
pub struct MockPlacesClient;

#[async_trait]
impl PlacesClient for MockPlacesClient {
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let seed: u64 = place_id.bytes().map(u64::from).sum();
        let rating = 3.8 + (seed % 10) as f64 / 10.0;
        let base_time = 1_735_689_600i64 + (seed % 86_400) as i64;

        let samples = [
            (5, "Excelente atendimento e boa variedade de produtos."),
            (4, "Loja bem organizada, mas faltou alguns tamanhos no estoque."),
            (5, "Atendimento atencioso e produtos de qualidade."),
            (2, "Fila enorme e atendimento lento, muita demora no caixa."),
            (3, "Preço um pouco caro comparado com a loja online."),
        ];

        let reviews = samples
            .iter()
            .enumerate()
            .map(|(i, (rating, text))| PlaceReview {
                author_name: format!("Cliente {}", i + 1),
                author_url: None,
                rating: *rating,
                text: (*text).to_string(),
                time: base_time - (i as i64) * 86_400,
            })
            .collect();

        Ok(PlaceDetails {
            place_id: place_id.to_string(),
            name: Some("Mock Store".to_string()),
            formatted_address: Some("Mock address".to_string()),
            rating: Some(rating),
            user_ratings_total: Some(50 + seed % 200),
            reviews,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_is_deterministic() {
        let client = MockPlacesClient;
        let a = client.place_details("place-1").await.unwrap();
        let b = client.place_details("place-1").await.unwrap();
        assert_eq!(a.rating, b.rating);
        assert_eq!(a.reviews.len(), 5);
        assert_eq!(a.reviews[0].time, b.reviews[0].time);
    }
}
