//! Wishlist page behavior.

use everaura_core::{Product, ProductId, Toggle, Wishlist};
use tracing::{instrument, warn};

use crate::api::StorefrontApi;
use crate::error::Result;
use crate::storage::ClientStorage;

/// Result of [`WishlistService::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistOutcome {
    Added,
    Removed,
    /// No product with that id exists; the wishlist is unchanged.
    ProductNotFound,
}

/// Saved products in durable storage.
pub struct WishlistService<'a> {
    api: &'a StorefrontApi,
    storage: &'a ClientStorage,
}

impl<'a> WishlistService<'a> {
    #[must_use]
    pub const fn new(api: &'a StorefrontApi, storage: &'a ClientStorage) -> Self {
        Self { api, storage }
    }

    /// Remove a saved product, or look it up and save it.
    ///
    /// # Errors
    ///
    /// Returns an error if storage or the product lookup fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn toggle(&self, product_id: &ProductId) -> Result<WishlistOutcome> {
        let mut wishlist = self.storage.wishlist()?;

        if wishlist.remove(product_id) {
            self.storage.save_wishlist(&wishlist)?;
            return Ok(WishlistOutcome::Removed);
        }

        let Some(product) = self.api.find_product(product_id).await? else {
            warn!("Product not found for wishlist");
            return Ok(WishlistOutcome::ProductNotFound);
        };

        match wishlist.toggle(product) {
            Toggle::Added => {
                self.storage.save_wishlist(&wishlist)?;
                Ok(WishlistOutcome::Added)
            }
            Toggle::Removed => Ok(WishlistOutcome::Removed),
        }
    }

    /// Saved products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn list(&self) -> Result<Vec<Product>> {
        Ok(self.storage.wishlist()?.entries().to_vec())
    }

    /// Whether a product is saved.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn contains(&self, product_id: &ProductId) -> Result<bool> {
        Ok(self.storage.wishlist()?.contains(product_id))
    }

    /// Remove every saved product.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn clear(&self) -> Result<()> {
        Ok(self.storage.save_wishlist(&Wishlist::new())?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use everaura_core::{Category, Gender, Material, Price, ProductType};
    use std::time::Duration;
    use url::Url;

    fn offline_api() -> StorefrontApi {
        StorefrontApi::with_cache_ttl(
            Url::parse("http://127.0.0.1:9/api").unwrap(),
            Duration::from_secs(300),
        )
        .unwrap()
    }

    fn saved(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: "Chandbali Earrings".to_string(),
            price: Price::from_paise(89_900),
            images: vec![],
            description: None,
            category: Category::Earrings,
            gender: Gender::Her,
            product_type: ProductType::Jewelry,
            material: Material::Chandbali,
            trending: true,
            rsn: None,
        }
    }

    #[tokio::test]
    async fn test_toggle_removes_without_lookup() {
        let api = offline_api();
        let storage = ClientStorage::in_memory();
        let mut wishlist = Wishlist::new();
        wishlist.add(saved("p1"));
        storage.save_wishlist(&wishlist).unwrap();

        let service = WishlistService::new(&api, &storage);
        let outcome = service.toggle(&ProductId::new("p1")).await.unwrap();
        assert_eq!(outcome, WishlistOutcome::Removed);
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_contains_clear() {
        let api = offline_api();
        let storage = ClientStorage::in_memory();
        let mut wishlist = Wishlist::new();
        wishlist.add(saved("p1"));
        wishlist.add(saved("p2"));
        storage.save_wishlist(&wishlist).unwrap();

        let service = WishlistService::new(&api, &storage);
        assert_eq!(service.list().unwrap().len(), 2);
        assert!(service.contains(&ProductId::new("p2")).unwrap());

        service.clear().unwrap();
        assert!(!service.contains(&ProductId::new("p2")).unwrap());
    }
}
