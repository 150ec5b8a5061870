/// Read-through caching over an optional Redis cache.
///
/// With `Some(cache)`, returns the cached value when present; otherwise awaits
/// `$block`, queues the result for a background write and returns it. A failed
/// cache read is logged and treated as a miss. With `None`, just awaits `$block`.
///
/// Evaluates to `AppResult<T>`, so callers finish with `?`.
///
/// # Example
/// ```rust,ignore
/// let tags: Vec<String> = cached!(self.cache.as_ref(), CacheKey::AllTags, ttl, async {
///     self.load_tags().await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache {
            Some(cache) => {
                let key = $key;
                let lookup = match cache.get_from_cache(&key).await {
                    Ok(lookup) => lookup,
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Cache read failed");
                        None
                    }
                };
                match lookup {
                    Some(hit) => {
                        tracing::debug!(key = %key, "Cache hit");
                        Ok(hit)
                    }
                    None => {
                        tracing::debug!(key = %key, "Cache miss");
                        match $block.await {
                            Ok(value) => {
                                cache.set_in_background(&key, &value, $ttl);
                                Ok(value)
                            }
                            Err(e) => Err(e),
                        }
                    }
                }
            }
            None => $block.await,
        }
    }};
}
