pub mod catalog;
pub mod memory;
pub mod postgres;
pub mod redis;

pub use catalog::CatalogStore;
pub use memory::InMemoryCatalogStore;
pub use postgres::{create_pool, run_migrations, PgCatalogStore};
pub use redis::create_redis_client;
pub use redis::Cache;
pub use redis::CacheKey;
pub use redis::CacheWriterHandle;
