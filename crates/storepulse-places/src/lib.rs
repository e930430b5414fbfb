//! Review ingestion from the Google Places API.
//!
//! The [`client`] module talks to the provider (or a mock when no key is
//! configured); the [`fetcher`] layers batching, timeouts and a details
//! cache on top and normalizes provider reviews into domain [`Review`]s.
//!
//! [`Review`]: storepulse_core::Review

pub mod client;
pub mod fetcher;
pub mod types;

pub use client::{GooglePlacesClient, MockPlacesClient, PlacesClient};
pub use fetcher::ReviewFetcher;
pub use types::{PlaceDetails, PlaceReview};
