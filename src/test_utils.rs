use chrono::{Duration, TimeZone, Utc};

use crate::models::Product;

/// Minimal product whose `created_at` is `day` days after 2024-01-01
pub fn product(id: &str, tags: &[&str], day: i64) -> Product {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Product {
        id: id.to_string(),
        title: format!("Product {}", id),
        description: format!("Description of {}", id),
        image_url: format!("https://images.example.com/{}.jpg", id),
        affiliate_link: format!("https://amazon.com/{}", id),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_featured: false,
        platform_type: None,
        created_at: base + Duration::days(day),
        click_count: 0,
    }
}
