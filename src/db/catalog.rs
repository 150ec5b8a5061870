use crate::{
    error::AppResult,
    models::{Product, ProductFilter},
};

/// Read/write access to the product catalog
///
/// The listing, search and recommendation logic only ever reads through this
/// trait; `insert` serves the separate creation path. Implementations return the
/// full matching set in no particular order, ordering is the caller's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch every product matching the filter
    async fn find_all(&self, filter: &ProductFilter) -> AppResult<Vec<Product>>;

    /// Fetch a single product, `None` when the id is unknown
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>>;

    /// Persist a newly created product
    async fn insert(&self, product: &Product) -> AppResult<()>;

    /// Atomically bump a product's click counter, returning the new count or
    /// `None` when the id is unknown
    async fn increment_clicks(&self, id: &str) -> AppResult<Option<i64>>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}
