//! Scope resolution: turn a filter descriptor into a concrete store set and
//! the reviews belonging to it.

use std::collections::HashSet;

use storepulse_core::{Review, Scope, Store};

/// Resolve a scope to the stores it selects.
///
/// A store id takes absolute precedence: when present the other fields are
/// ignored, and an unknown id yields an empty set rather than an error. The
/// remaining fields compose as AND predicates.
pub fn resolve_stores(stores: &[Store], scope: &Scope) -> Vec<Store> {
    if let Some(store_id) = &scope.store_id {
        return stores.iter().filter(|s| &s.id == store_id).cloned().collect();
    }

    stores
        .iter()
        .filter(|s| {
            scope
                .region
                .as_ref()
                .map_or(true, |region| &s.region == region)
        })
        .filter(|s| scope.state.as_ref().map_or(true, |state| &s.state == state))
        .filter(|s| {
            scope
                .team
                .as_ref()
                .map_or(true, |team| s.team.as_ref() == Some(team))
        })
        .cloned()
        .collect()
}

/// Keep only reviews owned by one of the given stores. Reviews referencing
/// unknown store ids are dropped silently.
pub fn filter_reviews(reviews: &[Review], stores: &[Store]) -> Vec<Review> {
    let ids: HashSet<&str> = stores.iter().map(|s| s.id.as_str()).collect();
    reviews
        .iter()
        .filter(|r| ids.contains(r.store_id.as_str()))
        .cloned()
        .collect()
}
