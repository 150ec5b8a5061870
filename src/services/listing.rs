//! Seeded, paginated product listing
//!
//! Every product gets an ordering key mixed from the pagination seed and a hash
//! of its id. Sorting by `(key, id)` yields a pseudo-random permutation that is
//! identical for every call sharing a seed, so walking `offset` forward in
//! steps of `limit` visits each product exactly once.

use chrono::Utc;
use xxhash_rust::xxh64::xxh64;

use crate::models::{Product, ProductPage};

/// splitmix64 output function
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Position of a product within the ordering for `seed`
pub fn ordering_key(seed: i64, id: &str) -> u64 {
    mix((seed as u64) ^ xxh64(id.as_bytes(), 0))
}

/// Seed for callers that did not send one
pub fn fresh_seed() -> i64 {
    Utc::now().timestamp_millis()
}

/// Sorts products into the permutation defined by `seed`
///
/// Colliding keys fall back to the id so the relative order of two products
/// never depends on the order the store returned them in.
pub fn shuffle(products: &mut [Product], seed: i64) {
    products.sort_by_cached_key(|p| (ordering_key(seed, &p.id), p.id.clone()));
}

/// Orders the matching set for `seed` and cuts out `[offset, offset + limit)`
pub fn paginate(mut products: Vec<Product>, limit: usize, offset: usize, seed: i64) -> ProductPage {
    shuffle(&mut products, seed);

    let total = products.len();
    let end = offset.saturating_add(limit);
    let has_more = total > end;

    let page: Vec<Product> = products.into_iter().skip(offset).take(limit).collect();

    ProductPage {
        products: page,
        has_more,
        total,
        next_offset: has_more.then_some(end),
        seed,
    }
}
