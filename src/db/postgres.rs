use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{Product, ProductFilter},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Catalog store backed by the `products` table
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_all(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, description, image_url, affiliate_link, tags,
                   is_featured, platform_type, created_at, click_count
            FROM products
            WHERE $1::text IS NULL OR $1 = ANY(tags)
            "#,
        )
        .bind(filter.tag_in.as_deref())
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            count = products.len(),
            tag_in = ?filter.tag_in,
            "Loaded products from Postgres"
        );

        Ok(products)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, description, image_url, affiliate_link, tags,
                   is_featured, platform_type, created_at, click_count
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn insert(&self, product: &Product) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, title, description, image_url, affiliate_link, tags,
                 is_featured, platform_type, created_at, click_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(&product.image_url)
        .bind(&product.affiliate_link)
        .bind(&product.tags)
        .bind(product.is_featured)
        .bind(&product.platform_type)
        .bind(product.created_at)
        .bind(product.click_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn increment_clicks(&self, id: &str) -> AppResult<Option<i64>> {
        let click_count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE products
            SET click_count = click_count + 1
            WHERE id = $1
            RETURNING click_count
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(click_count)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
