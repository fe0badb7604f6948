//! Wishlist of saved products.
//!
//! Unlike cart lines, wishlist entries are full product snapshots, so the
//! wishlist can be rendered (and added to the cart) without refetching.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// Outcome of [`Wishlist::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Saved products, unique by id, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    /// An empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Saved products.
    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a product is saved.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|p| &p.id == product_id)
    }

    /// Save a product. Returns `false` if it was already saved.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.entries.push(product);
        true
    }

    /// Remove a product. Returns `false` if it was not saved.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|p| &p.id != product_id);
        self.entries.len() != before
    }

    /// Remove the product if saved, otherwise save it.
    pub fn toggle(&mut self, product: Product) -> Toggle {
        if self.remove(&product.id) {
            Toggle::Removed
        } else {
            self.entries.push(product);
            Toggle::Added
        }
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Category, Gender, Material, Price, ProductType};

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_string(),
            price: Price::from_paise(100),
            images: vec![],
            description: None,
            category: Category::Necklaces,
            gender: Gender::Her,
            product_type: ProductType::Jewelry,
            material: Material::Kundan,
            trending: true,
            rsn: None,
        }
    }

    #[test]
    fn test_toggle() {
        let mut wishlist = Wishlist::new();
        assert_eq!(wishlist.toggle(product("a")), Toggle::Added);
        assert!(wishlist.contains(&ProductId::new("a")));
        assert_eq!(wishlist.toggle(product("a")), Toggle::Removed);
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_add_is_unique() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add(product("a")));
        assert!(!wishlist.add(product("a")));
        assert_eq!(wishlist.entries().len(), 1);
    }

    #[test]
    fn test_stores_full_snapshot() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product("a"));
        let json = serde_json::to_string(&wishlist).unwrap();
        let restored: Wishlist = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.entries()[0].material, Material::Kundan);
    }
}
