use serde::{Deserialize, Serialize};

pub mod product;

pub use product::{NewProduct, Product, ProductFilter};

/// One page of the seeded product listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub has_more: bool,
    pub total: usize,
    pub next_offset: Option<usize>,
    /// Seed that produced this ordering; resend it to fetch the next page
    pub seed: i64,
}

/// A product ranked by how many tags it shares with the source product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(flatten)]
    pub product: Product,
    pub score: usize,
    pub shared_tags: Vec<String>,
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub products: Vec<Product>,
    pub has_more: bool,
    pub total_count: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Relevance,
    Newest,
    Oldest,
    Title,
}
