//! Storefront test utilities.
//!
//! Helpers for integration testing: product fixtures, isolation tags,
//! and assertion utilities for catalog responses.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

/// A unique, readable tag for isolating one test's rows on a shared database.
///
/// Use it as (part of) a brand or name so filters select only this test's data.
pub fn unique_tag(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7().simple())
}

/// Create a test product with default values.
pub fn test_product(name: &str, brand: &str, category: &str) -> TestProduct {
    TestProduct {
        name: name.to_string(),
        description: None,
        brand: brand.to_string(),
        category: category.to_string(),
        color: "Black".to_string(),
        material: "Plastic".to_string(),
        price: Decimal::new(1000, 2),
        rating: None,
        image: None,
        storage: None,
        size: None,
        capacity: None,
    }
}

/// A test product builder for creating catalog fixtures.
#[derive(Debug, Clone)]
pub struct TestProduct {
    pub name: String,
    pub description: Option<String>,
    pub brand: String,
    pub category: String,
    pub color: String,
    pub material: String,
    pub price: Decimal,
    pub rating: Option<f64>,
    pub image: Option<String>,
    pub storage: Option<String>,
    pub size: Option<String>,
    pub capacity: Option<String>,
}

impl TestProduct {
    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the stored color verbatim (no trimming or case folding).
    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    /// Set the stored material verbatim.
    pub fn with_material(mut self, material: &str) -> Self {
        self.material = material.to_string();
        self
    }

    /// Set the price from a decimal literal such as `"19.99"`.
    ///
    /// # Panics
    ///
    /// Panics if `price` is not a valid decimal.
    #[allow(clippy::expect_used)]
    pub fn with_price(mut self, price: &str) -> Self {
        self.price = Decimal::from_str(price).expect("invalid test price");
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the storage attribute.
    pub fn with_storage(mut self, storage: &str) -> Self {
        self.storage = Some(storage.to_string());
        self
    }

    /// Insert the product and return its id.
    pub async fn insert(&self, pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            INSERT INTO products
                (name, description, brand, category, color, material, price, rating, image, storage, size, capacity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(&self.brand)
        .bind(&self.category)
        .bind(&self.color)
        .bind(&self.material)
        .bind(self.price)
        .bind(self.rating)
        .bind(&self.image)
        .bind(&self.storage)
        .bind(&self.size)
        .bind(&self.capacity)
        .fetch_one(pool)
        .await
    }
}

/// Insert several fixtures, returning their ids in order.
pub async fn insert_all(pool: &PgPool, products: &[TestProduct]) -> Result<Vec<i64>, sqlx::Error> {
    let mut ids = Vec::with_capacity(products.len());
    for product in products {
        ids.push(product.insert(pool).await?);
    }
    Ok(ids)
}

/// Delete every product carrying one of the given brands.
pub async fn delete_brands(pool: &PgPool, brands: &[&str]) -> Result<u64, sqlx::Error> {
    let brands: Vec<String> = brands.iter().map(|b| b.to_string()).collect();
    let result = sqlx::query("DELETE FROM products WHERE brand = ANY($1)")
        .bind(&brands)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Assertion helpers for catalog responses.
pub mod assert {
    use super::JsonValue;

    /// Assert JSON has a key.
    pub fn has_key(value: &JsonValue, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Ids of the `products` array in a catalog response body.
    pub fn product_ids(body: &JsonValue) -> Vec<i64> {
        body["products"]
            .as_array()
            .map(|items| items.iter().filter_map(|p| p["id"].as_i64()).collect())
            .unwrap_or_default()
    }

    /// Count for `value` in a facet list such as `body["brands"]`.
    pub fn facet_count(facet: &JsonValue, value: &str) -> Option<i64> {
        facet
            .as_array()?
            .iter()
            .find(|entry| entry["value"] == value)
            .and_then(|entry| entry["count"].as_i64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_tags_differ() {
        let a = unique_tag("brand");
        let b = unique_tag("brand");
        assert_ne!(a, b);
        assert!(a.starts_with("brand-"));
    }

    #[test]
    fn builder_sets_fields() {
        let product = test_product("Boot", "Acme", "Shoes")
            .with_color(" red ")
            .with_price("19.99")
            .with_storage("128GB");

        assert_eq!(product.color, " red ");
        assert_eq!(product.price, Decimal::new(1999, 2));
        assert_eq!(product.storage.as_deref(), Some("128GB"));
    }

    #[test]
    fn facet_count_lookup() {
        let facet = serde_json::json!([
            {"value": "Acme", "count": 3},
            {"value": "Globex", "count": 1}
        ]);
        assert_eq!(assert::facet_count(&facet, "Acme"), Some(3));
        assert_eq!(assert::facet_count(&facet, "Initech"), None);
    }

    #[test]
    fn product_ids_from_body() {
        let body = serde_json::json!({"products": [{"id": 4}, {"id": 9}]});
        assert_eq!(assert::product_ids(&body), vec![4, 9]);
        assert!(assert::product_ids(&serde_json::json!({})).is_empty());
    }
}
