use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    cached,
    db::{Cache, CacheKey, CatalogStore},
    error::{AppError, AppResult},
    models::{NewProduct, Product, ProductFilter, ProductPage, Recommendation, SearchPage, SortBy},
    services::{listing, recommendations, search},
};

/// Most products `by_tags` returns
pub const BY_TAGS_LIMIT: usize = 20;

/// Entry point for every catalog procedure
///
/// Each call reads from the store once and computes its answer in memory;
/// nothing is shared between calls except the store and the optional cache.
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, cache: Option<Cache>, cache_ttl: u64) -> Self {
        Self {
            store,
            cache,
            cache_ttl,
        }
    }

    /// Seeded, paginated listing; a missing seed is replaced by a fresh one
    pub async fn list_products(
        &self,
        limit: usize,
        offset: usize,
        category: Option<String>,
        seed: Option<i64>,
    ) -> AppResult<ProductPage> {
        let seed = seed.unwrap_or_else(listing::fresh_seed);
        let products = self
            .store
            .find_all(&ProductFilter::category(category.clone()))
            .await?;

        let page = listing::paginate(products, limit, offset, seed);

        tracing::debug!(
            store = self.store.name(),
            category = ?category,
            seed,
            offset,
            returned = page.products.len(),
            total = page.total,
            "Listed products"
        );

        Ok(page)
    }

    /// A fresh shuffle of up to `count` products
    pub async fn shuffled(&self, count: usize, category: Option<String>) -> AppResult<Vec<Product>> {
        let page = self.list_products(count, 0, category, None).await?;
        Ok(page.products)
    }

    /// One product picked by a fresh shuffle, `None` for an empty catalog
    pub async fn random(&self) -> AppResult<Option<Product>> {
        let page = self.list_products(1, 0, None, None).await?;
        Ok(page.products.into_iter().next())
    }

    /// Products sharing tags with `product_id`, best match first
    ///
    /// Unknown ids and untagged products produce an empty list.
    pub async fn recommend(&self, product_id: &str, limit: usize) -> AppResult<Vec<Recommendation>> {
        let key = CacheKey::Recommendations {
            product_id: product_id.to_string(),
            limit,
        };

        cached!(self.cache.as_ref(), key, self.cache_ttl, async {
            self.compute_recommendations(product_id, limit).await
        })
    }

    async fn compute_recommendations(
        &self,
        product_id: &str,
        limit: usize,
    ) -> AppResult<Vec<Recommendation>> {
        let start = Instant::now();

        let Some(source) = self.store.find_by_id(product_id).await? else {
            tracing::debug!(product_id, "Recommendation source not found");
            return Ok(Vec::new());
        };

        if source.tags.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.store.find_all(&ProductFilter::all()).await?;
        let recs = recommendations::recommend(&source, &candidates, limit);

        tracing::debug!(
            product_id,
            candidates = candidates.len(),
            returned = recs.len(),
            elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            "Computed recommendations"
        );

        Ok(recs)
    }

    /// Text search over titles, descriptions and tags
    pub async fn search(
        &self,
        query: &str,
        sort_by: SortBy,
        limit: usize,
        offset: usize,
        category: Option<String>,
    ) -> AppResult<SearchPage> {
        let products = self
            .store
            .find_all(&ProductFilter::category(category))
            .await?;

        Ok(search::search(products, query, sort_by, limit, offset))
    }

    /// Whole catalog, newest first
    pub async fn all(&self) -> AppResult<Vec<Product>> {
        let mut products = self.store.find_all(&ProductFilter::all()).await?;
        sort_newest_first(&mut products);
        Ok(products)
    }

    /// Most recent product flagged as featured
    pub async fn daily_featured(&self) -> AppResult<Option<Product>> {
        let products = self.store.find_all(&ProductFilter::all()).await?;
        Ok(products
            .into_iter()
            .filter(|p| p.is_featured)
            .max_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| b.id.cmp(&a.id))
            }))
    }

    /// Products carrying any of `tags`, newest first; latest products when `tags` is empty
    pub async fn by_tags(&self, tags: &[String]) -> AppResult<Vec<Product>> {
        let mut products = self.store.find_all(&ProductFilter::all()).await?;
        if !tags.is_empty() {
            products.retain(|p| tags.iter().any(|t| p.has_tag(t)));
        }
        sort_newest_first(&mut products);
        products.truncate(BY_TAGS_LIMIT);
        Ok(products)
    }

    /// Every distinct tag in the catalog, sorted
    pub async fn all_tags(&self) -> AppResult<Vec<String>> {
        cached!(self.cache.as_ref(), CacheKey::AllTags, self.cache_ttl, async {
            let products = self.store.find_all(&ProductFilter::all()).await?;
            let tags: BTreeSet<String> = products.into_iter().flat_map(|p| p.tags).collect();
            Ok::<Vec<String>, AppError>(tags.into_iter().collect())
        })
    }

    /// Validates and stores a new product
    ///
    /// Only the cached tag list is invalidated. Cached `recs:*` entries are left
    /// alone, so a new product can be missing from recommendations for up to one
    /// cache TTL.
    pub async fn create(&self, input: NewProduct) -> AppResult<Product> {
        let product = input.into_product()?;
        self.store.insert(&product).await?;

        if let Some(cache) = &self.cache {
            cache.invalidate_in_background(&CacheKey::AllTags);
        }

        tracing::info!(
            product_id = %product.id,
            tags = product.tags.len(),
            "Created product"
        );

        Ok(product)
    }

    /// Counts one outbound click, returning the product's new total
    pub async fn track_click(&self, product_id: &str) -> AppResult<i64> {
        let Some(click_count) = self.store.increment_clicks(product_id).await? else {
            return Err(AppError::NotFound(format!("product {}", product_id)));
        };

        tracing::debug!(product_id, click_count, "Tracked click");

        Ok(click_count)
    }
}

fn sort_newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
