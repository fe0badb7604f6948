//! Cart and pricing engine.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s keyed by product id. Lines
//! are frozen snapshots: name, price and image are captured when the product
//! is first added and never refreshed. Every line has a quantity of at least
//! one; operations that would take a line to zero remove it instead.
//!
//! Totals are computed with exact decimal arithmetic and only rounded when
//! displayed.

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::types::{Coupon, Price, Product, ProductId};

/// One product in the cart.
///
/// Field names match the `cart` cookie written by earlier versions of the
/// storefront, so existing carts keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "_id")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub quantity: NonZeroU32,
    #[serde(rename = "image", default)]
    pub image_url: String,
}

impl CartLine {
    /// Snapshot a product into a new line with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: NonZeroU32::MIN,
            image_url: product.primary_image_or_placeholder().to_owned(),
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity.get()
    }
}

/// Result of a decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decrement {
    /// The quantity went down by one.
    Decreased,
    /// The line was at quantity 1 and has been removed.
    Removed,
    /// No line with that product id.
    Missing,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from stored lines, merging duplicate product ids.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            match cart.line_mut(&line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity.get());
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Whether a product is in the cart.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.line(product_id).is_some()
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.product_id == product_id)
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line if there is one; otherwise appends a
    /// snapshot of the product with quantity 1.
    pub fn add_item(&mut self, product: &Product) {
        if !self.increment_quantity(&product.id) {
            self.lines.push(CartLine::from_product(product));
        }
    }

    /// Remove a product's line regardless of quantity.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| &l.product_id == product_id)?;
        Some(self.lines.remove(index))
    }

    /// Add one to an existing line. Returns `false` if the product is not in
    /// the cart.
    pub fn increment_quantity(&mut self, product_id: &ProductId) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Take one from an existing line, removing it when it is at 1.
    pub fn decrement_quantity(&mut self, product_id: &ProductId) -> Decrement {
        let Some(line) = self.line_mut(product_id) else {
            return Decrement::Missing;
        };

        match NonZeroU32::new(line.quantity.get() - 1) {
            Some(quantity) => {
                line.quantity = quantity;
                Decrement::Decreased
            }
            None => {
                self.remove_item(product_id);
                Decrement::Removed
            }
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of units, shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity.get()))
    }

    /// Subtotal, discount and total for this cart.
    #[must_use]
    pub fn totals(&self, coupon: Option<&Coupon>) -> CartTotals {
        CartTotals::compute(&self.lines, coupon)
    }
}

/// Price breakdown of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartTotals {
    pub subtotal: Price,
    pub discount: Price,
    pub total: Price,
}

impl CartTotals {
    /// Compute totals for a set of lines and an optional coupon.
    #[must_use]
    pub fn compute(lines: &[CartLine], coupon: Option<&Coupon>) -> Self {
        let subtotal: Price = lines.iter().map(CartLine::line_total).sum();
        let discount = coupon.map_or(Price::ZERO, |c| c.discount_on(subtotal));
        Self {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{Category, Gender, Material, ProductType};

    fn product(id: &str, paise: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_paise(paise),
            images: vec![format!("https://cdn.example.com/{id}.jpg")],
            description: None,
            category: Category::Rings,
            gender: Gender::Her,
            product_type: ProductType::AntiTarnish,
            material: Material::AntiTarnish,
            trending: false,
            rsn: None,
        }
    }

    fn qty(cart: &Cart, id: &str) -> Option<u32> {
        cart.line(&ProductId::new(id)).map(|l| l.quantity.get())
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut cart = Cart::new();
        let ring = product("ring", 10_000);

        cart.add_item(&ring);
        assert_eq!(qty(&cart, "ring"), Some(1));

        cart.add_item(&ring);
        assert_eq!(qty(&cart, "ring"), Some(2));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_line_is_frozen_snapshot() {
        let mut cart = Cart::new();
        let mut ring = product("ring", 10_000);
        cart.add_item(&ring);

        ring.price = Price::from_paise(99_999);
        ring.name = "Renamed".to_string();
        cart.add_item(&ring);

        let line = cart.line(&ring.id).unwrap();
        assert_eq!(line.unit_price, Price::from_paise(10_000));
        assert_eq!(line.name, "Product ring");
        assert_eq!(line.image_url, "https://cdn.example.com/ring.jpg");
    }

    #[test]
    fn test_placeholder_image_when_product_has_none() {
        let mut cart = Cart::new();
        let mut bare = product("bare", 500);
        bare.images.clear();
        cart.add_item(&bare);
        assert_eq!(
            cart.line(&bare.id).unwrap().image_url,
            crate::types::PLACEHOLDER_IMAGE
        );
    }

    #[test]
    fn test_remove_ignores_quantity() {
        let mut cart = Cart::new();
        let ring = product("ring", 10_000);
        cart.add_item(&ring);
        cart.add_item(&ring);
        cart.add_item(&ring);

        let removed = cart.remove_item(&ring.id).unwrap();
        assert_eq!(removed.quantity.get(), 3);
        assert!(cart.is_empty());
        assert!(cart.remove_item(&ring.id).is_none());
    }

    #[test]
    fn test_decrement_at_one_removes_line() {
        let mut cart = Cart::new();
        let ring = product("ring", 10_000);
        cart.add_item(&ring);

        assert_eq!(cart.decrement_quantity(&ring.id), Decrement::Removed);
        assert!(!cart.contains(&ring.id));
        assert_eq!(cart.decrement_quantity(&ring.id), Decrement::Missing);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::new();
        let ring = product("ring", 10_000);
        cart.add_item(&ring);

        assert!(cart.increment_quantity(&ring.id));
        assert_eq!(qty(&cart, "ring"), Some(2));
        assert_eq!(cart.decrement_quantity(&ring.id), Decrement::Decreased);
        assert_eq!(qty(&cart, "ring"), Some(1));
        assert!(!cart.increment_quantity(&ProductId::new("missing")));
    }

    #[test]
    fn test_quantities_never_reach_zero() {
        let mut cart = Cart::new();
        let items = [product("a", 100), product("b", 200), product("c", 300)];

        // Deterministic mix of operations across several products.
        for step in 0u32..60 {
            let p = &items[(step % 3) as usize];
            match step % 5 {
                0 | 1 => cart.add_item(p),
                2 => {
                    cart.decrement_quantity(&p.id);
                }
                3 => {
                    cart.increment_quantity(&p.id);
                }
                _ => {
                    if step % 4 == 0 {
                        cart.remove_item(&p.id);
                    }
                }
            }
            assert!(cart.lines().iter().all(|l| l.quantity.get() >= 1));
        }
    }

    #[test]
    fn test_item_count() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", 100));
        cart.add_item(&product("a", 100));
        cart.add_item(&product("b", 100));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_totals_without_coupon() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", 12_550));
        cart.add_item(&product("a", 12_550));
        cart.add_item(&product("b", 4_999));

        let totals = cart.totals(None);
        assert_eq!(totals.subtotal, Price::from_paise(30_099));
        assert_eq!(totals.discount, Price::ZERO);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_totals_with_ten_percent_coupon() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", 10_000));
        cart.add_item(&product("a", 10_000));

        let coupon = Coupon::new("SAVE10", Decimal::TEN);
        let totals = cart.totals(Some(&coupon));
        assert_eq!(totals.subtotal, Price::from_paise(20_000));
        assert_eq!(totals.discount, Price::from_paise(2_000));
        assert_eq!(totals.total, Price::from_paise(18_000));
        assert_eq!(totals.total.to_string(), "₹180.00");
    }

    #[test]
    fn test_rounding_only_at_display() {
        let mut cart = Cart::new();
        // 3 x 0.335 = 1.005 exactly; rounding per line first would give 1.02
        let mut p = product("tiny", 0);
        p.price = Price::new(Decimal::new(335, 3));
        cart.add_item(&p);
        cart.add_item(&p);
        cart.add_item(&p);

        let totals = cart.totals(None);
        assert_eq!(totals.subtotal.amount(), Decimal::new(1005, 3));
        assert_eq!(totals.subtotal.to_string(), "₹1.01");
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let coupon = Coupon::new("SAVE10", Decimal::TEN);
        assert_eq!(Cart::new().totals(Some(&coupon)), CartTotals::default());
    }

    #[test]
    fn test_cookie_shape_roundtrip() {
        let json = r#"[{"_id":"p1","name":"Ring","price":199.99,"quantity":2,"image":"img.jpg"}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(serde_json::to_string(&cart).unwrap(), json);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let json = r#"[{"_id":"p1","name":"Ring","price":1,"quantity":0,"image":"img.jpg"}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_from_lines_merges_duplicates() {
        let line = CartLine::from_product(&product("a", 100));
        let cart = Cart::from_lines([line.clone(), line]);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }
}
