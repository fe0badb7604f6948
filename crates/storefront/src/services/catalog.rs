//! Product listings and the shopper's gender preference.

use everaura_core::{Gender, Product, ProductId, ProductType};
use tracing::instrument;

use crate::api::{ProductQuery, StorefrontApi};
use crate::error::Result;
use crate::storage::ClientStorage;

/// Products shown in the homepage trending strip.
pub const TRENDING_LIMIT: usize = 8;

/// Shop and homepage listings.
pub struct CatalogService<'a> {
    api: &'a StorefrontApi,
    storage: &'a ClientStorage,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub const fn new(api: &'a StorefrontApi, storage: &'a ClientStorage) -> Self {
        Self { api, storage }
    }

    /// Shop page listing: one category (or `"all"`), for the selected gender.
    ///
    /// # Errors
    ///
    /// Returns an error if storage or the API request fails.
    #[instrument(skip(self))]
    pub async fn shop(&self, category: &str, product_type: ProductType) -> Result<Vec<Product>> {
        let query = ProductQuery::category(category)
            .with_gender(self.storage.selected_gender()?)
            .with_type(product_type);
        Ok(self.api.fetch_products(&query).await?)
    }

    /// Homepage trending strip: trending products of any category and type
    /// for the selected gender, capped at [`TRENDING_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns an error if storage or the API request fails.
    #[instrument(skip(self))]
    pub async fn trending(&self) -> Result<Vec<Product>> {
        let query = ProductQuery::all().with_gender(self.storage.selected_gender()?);
        let products = self.api.fetch_products(&query).await?;
        Ok(products
            .into_iter()
            .filter(|p| p.trending)
            .take(TRENDING_LIMIT)
            .collect())
    }

    /// Look a product up by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn product(&self, id: &ProductId) -> Result<Option<Product>> {
        Ok(self.api.find_product(id).await?)
    }

    /// The persisted gender preference.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn selected_gender(&self) -> Result<Gender> {
        Ok(self.storage.selected_gender()?)
    }

    /// Switch the listings to another gender and remember the choice.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    pub fn select_gender(&self, gender: Gender) -> Result<()> {
        Ok(self.storage.set_selected_gender(gender)?)
    }
}
