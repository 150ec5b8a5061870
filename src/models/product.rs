use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A catalog entry as stored in the products table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub affiliate_link: String,
    /// Insertion-ordered; membership is what matters
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub platform_type: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub click_count: i64,
}

impl Product {
    /// Exact, case-sensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Filter accepted by the catalog store's `find_all`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Restrict to products whose tags contain this value
    pub tag_in: Option<String>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(category: Option<String>) -> Self {
        Self { tag_in: category }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match &self.tag_in {
            Some(tag) => product.has_tag(tag),
            None => true,
        }
    }
}

/// Payload for creating a product
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub affiliate_link: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub platform_type: Option<String>,
}

impl NewProduct {
    /// Validates the payload and turns it into a product with a fresh id and timestamp
    pub fn into_product(self) -> AppResult<Product> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::InvalidInput("title must not be empty".to_string()));
        }

        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(AppError::InvalidInput(
                "description must not be empty".to_string(),
            ));
        }

        validate_url("imageUrl", &self.image_url)?;
        validate_url("affiliateLink", &self.affiliate_link)?;

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        let platform_type = self
            .platform_type
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            image_url: self.image_url,
            affiliate_link: self.affiliate_link,
            tags,
            is_featured: self.is_featured,
            platform_type,
            created_at: Utc::now(),
            click_count: 0,
        })
    }
}

fn validate_url(field: &str, value: &str) -> AppResult<()> {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(AppError::InvalidInput(format!(
            "{} must be an absolute http(s) URL",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            title: "Banana Phone".to_string(),
            description: "A phone that looks like a banana".to_string(),
            image_url: "https://images.example.com/banana.jpg".to_string(),
            affiliate_link: "https://amazon.com/banana-phone".to_string(),
            tags: vec!["weird".to_string(), "tech".to_string()],
            is_featured: false,
            platform_type: None,
        }
    }

    #[test]
    fn test_into_product_assigns_id_and_keeps_fields() {
        let product = new_product().into_product().unwrap();
        assert!(Uuid::parse_str(&product.id).is_ok());
        assert_eq!(product.title, "Banana Phone");
        assert_eq!(product.tags, vec!["weird", "tech"]);
        assert!(!product.is_featured);
    }

    #[test]
    fn test_into_product_rejects_blank_title() {
        let mut input = new_product();
        input.title = "   ".to_string();
        assert!(matches!(input.into_product(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_into_product_rejects_relative_url() {
        let mut input = new_product();
        input.image_url = "/images/banana.jpg".to_string();
        assert!(matches!(input.into_product(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_into_product_rejects_non_http_scheme() {
        let mut input = new_product();
        input.affiliate_link = "ftp://example.com/banana".to_string();
        assert!(matches!(input.into_product(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_into_product_trims_and_dedupes_tags() {
        let mut input = new_product();
        input.tags = vec![
            " gift ".to_string(),
            "".to_string(),
            "gift".to_string(),
            "wtf".to_string(),
        ];
        let product = input.into_product().unwrap();
        assert_eq!(product.tags, vec!["gift", "wtf"]);
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = new_product().into_product().unwrap();
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("affiliateLink").is_some());
        assert!(json.get("isFeatured").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["clickCount"], 0);
    }

    #[test]
    fn test_filter_matches_exact_tag_only() {
        let product = new_product().into_product().unwrap();
        assert!(ProductFilter::category(Some("tech".to_string())).matches(&product));
        assert!(!ProductFilter::category(Some("Tech".to_string())).matches(&product));
        assert!(!ProductFilter::category(Some("tec".to_string())).matches(&product));
        assert!(ProductFilter::all().matches(&product));
    }
}
