use std::collections::HashSet;

use crate::models::{Product, Recommendation};

/// Ranks `candidates` by the number of tags they share with `source`
///
/// Ties on score go to the most recently created product, then to the lower id.
/// A source without tags has nothing to compare on and yields no results.
///
/// This is a full scan over the catalog per call. A catalog much larger than a
/// few thousand products would want an inverted tag -> product index instead.
pub fn recommend(source: &Product, candidates: &[Product], limit: usize) -> Vec<Recommendation> {
    if source.tags.is_empty() {
        return Vec::new();
    }

    let source_tags: HashSet<&str> = source.tags.iter().map(String::as_str).collect();

    let mut ranked: Vec<Recommendation> = candidates
        .iter()
        .filter(|c| c.id != source.id)
        .filter_map(|candidate| {
            let shared_tags = shared_tags(&source_tags, candidate);
            if shared_tags.is_empty() {
                return None;
            }
            Some(Recommendation {
                score: shared_tags.len(),
                shared_tags,
                product: candidate.clone(),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.product.created_at.cmp(&a.product.created_at))
            .then_with(|| a.product.id.cmp(&b.product.id))
    });
    ranked.truncate(limit);
    ranked
}

/// Candidate tags present in the source, in candidate order, each counted once
fn shared_tags(source_tags: &HashSet<&str>, candidate: &Product) -> Vec<String> {
    let mut shared: Vec<String> = Vec::new();
    for tag in &candidate.tags {
        if source_tags.contains(tag.as_str()) && !shared.contains(tag) {
            shared.push(tag.clone());
        }
    }
    shared
}
