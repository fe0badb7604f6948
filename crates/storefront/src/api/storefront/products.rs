//! Product catalog reads.

use everaura_core::{Gender, Product, ProductId, ProductType};
use reqwest::Method;
use tracing::{debug, instrument};

use super::StorefrontApi;
use super::cache::{CacheKey, CacheValue};
use crate::api::ApiError;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Filters for `GET /products`.
///
/// Unset filters are left off the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub gender: Option<Gender>,
    pub product_type: Option<ProductType>,
}

impl ProductQuery {
    /// Every product, unfiltered.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Products in one category. `"all"` (or blank) means no filter.
    #[must_use]
    pub fn category(name: &str) -> Self {
        let name = name.trim();
        Self {
            category: (!name.is_empty() && !name.eq_ignore_ascii_case(ALL_CATEGORIES))
                .then(|| name.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    #[must_use]
    pub fn with_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    /// Query parameters in the order the API documents them.
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(gender) = self.gender {
            pairs.push(("gender", gender.code().to_string()));
        }
        if let Some(product_type) = self.product_type {
            pairs.push(("type", product_type.code().to_string()));
        }
        pairs
    }
}

impl StorefrontApi {
    /// List products matching `query`.
    ///
    /// Results are cached per query for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let mut url = self.rest().endpoint(&["products"])?;
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let cache_key = CacheKey::Products(url.query().unwrap_or_default().to_string());
        if let Some(CacheValue::Products(products)) = self.cache().get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let request = self.rest().request(Method::GET, url);
        let products: Vec<Product> = self.rest().send_json(request).await?;

        self.cache()
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Find a product by id in the unfiltered listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, ApiError> {
        let products = self.fetch_products(&ProductQuery::all()).await?;
        Ok(products.into_iter().find(|p| &p.id == id))
    }
}
