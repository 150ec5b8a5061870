use std::cmp::Ordering;

use crate::models::{Product, SearchPage, SortBy};

const EXACT_TITLE: u32 = 100;
const TITLE_PREFIX: u32 = 50;
const TITLE_CONTAINS: u32 = 25;
const EXACT_TAG: u32 = 20;
const TAG_CONTAINS: u32 = 10;
const DESCRIPTION_CONTAINS: u32 = 5;

/// Ad-hoc relevance points for a product against a lower-cased query
///
/// Zero means the product does not match at all.
pub fn relevance(product: &Product, needle: &str) -> u32 {
    let title = product.title.to_lowercase();
    let mut points = 0;

    if title == needle {
        points += EXACT_TITLE;
    } else if title.starts_with(needle) {
        points += TITLE_PREFIX;
    } else if title.contains(needle) {
        points += TITLE_CONTAINS;
    }

    for tag in &product.tags {
        let tag = tag.to_lowercase();
        if tag == needle {
            points += EXACT_TAG;
        } else if tag.contains(needle) {
            points += TAG_CONTAINS;
        }
    }

    if product.description.to_lowercase().contains(needle) {
        points += DESCRIPTION_CONTAINS;
    }

    points
}

/// Scores, sorts and paginates `products` for `query`
///
/// `query` must already be trimmed and non-empty.
pub fn search(
    products: Vec<Product>,
    query: &str,
    sort_by: SortBy,
    limit: usize,
    offset: usize,
) -> SearchPage {
    let needle = query.to_lowercase();

    let mut scored: Vec<(u32, Product)> = products
        .into_iter()
        .filter_map(|p| {
            let points = relevance(&p, &needle);
            (points > 0).then_some((points, p))
        })
        .collect();

    scored.sort_by(|(pa, a), (pb, b)| compare(sort_by, (*pa, a), (*pb, b)));

    let total_count = scored.len();
    let has_more = total_count > offset.saturating_add(limit);
    let products = scored
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|(_, p)| p)
        .collect();

    SearchPage {
        products,
        has_more,
        total_count,
    }
}

fn compare(sort_by: SortBy, (pa, a): (u32, &Product), (pb, b): (u32, &Product)) -> Ordering {
    let primary = match sort_by {
        SortBy::Relevance => pb.cmp(&pa).then_with(|| b.created_at.cmp(&a.created_at)),
        SortBy::Newest => b.created_at.cmp(&a.created_at),
        SortBy::Oldest => a.created_at.cmp(&b.created_at),
        SortBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}
