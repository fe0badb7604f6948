//! Cart page behavior: line edits, coupons and totals.
//!
//! Lines live in the `cart` cookie and survive across sessions. The applied
//! coupon lives in session storage and has to be re-applied each visit.

use everaura_core::{Cart, CartLine, CartTotals, Coupon, Decrement, ProductId};
use tracing::{instrument, warn};

use super::refusal;
use crate::api::StorefrontApi;
use crate::error::{Result, StorefrontError, add_breadcrumb};
use crate::storage::ClientStorage;

/// Shown when the coupon field is blank.
pub const EMPTY_COUPON_MESSAGE: &str = "Please enter a coupon code.";

/// Shown when the API rejects a coupon without saying why.
pub const INVALID_COUPON_MESSAGE: &str = "Invalid coupon";

/// Result of [`CartService::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was added with quantity 1.
    Added,
    /// The product was already in the cart; its quantity went up by one.
    Incremented,
    /// No product with that id exists; the cart is unchanged.
    ProductNotFound,
}

/// Everything the cart page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub coupon: Option<Coupon>,
    pub totals: CartTotals,
    pub item_count: u32,
}

/// Cart operations over client storage.
pub struct CartService<'a> {
    api: &'a StorefrontApi,
    storage: &'a ClientStorage,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(api: &'a StorefrontApi, storage: &'a ClientStorage) -> Self {
        Self { api, storage }
    }

    /// The current cart.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn cart(&self) -> Result<Cart> {
        Ok(self.storage.cart()?)
    }

    /// Add one of a product.
    ///
    /// A product already in the cart is incremented without a lookup. A new
    /// product is looked up and its name, price and first image are frozen
    /// into the line.
    ///
    /// # Errors
    ///
    /// Returns an error if storage or the product lookup fails; the cart is
    /// unchanged in that case.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_item(&self, product_id: &ProductId) -> Result<AddOutcome> {
        let mut cart = self.storage.cart()?;

        if cart.increment_quantity(product_id) {
            self.storage.save_cart(&cart)?;
            return Ok(AddOutcome::Incremented);
        }

        let Some(product) = self.api.find_product(product_id).await? else {
            warn!("Product not found to add to cart");
            return Ok(AddOutcome::ProductNotFound);
        };

        cart.add_item(&product);
        self.storage.save_cart(&cart)?;
        add_breadcrumb("cart", "Added item", Some(&[("product_id", product_id.as_str())]));
        Ok(AddOutcome::Added)
    }

    /// Remove a line whatever its quantity. Returns `false` if it was not
    /// in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn remove_item(&self, product_id: &ProductId) -> Result<bool> {
        let mut cart = self.storage.cart()?;
        if cart.remove_item(product_id).is_none() {
            return Ok(false);
        }
        self.storage.save_cart(&cart)?;
        Ok(true)
    }

    /// Add one to a line. Returns `false` if it was not in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn increment(&self, product_id: &ProductId) -> Result<bool> {
        let mut cart = self.storage.cart()?;
        if !cart.increment_quantity(product_id) {
            return Ok(false);
        }
        self.storage.save_cart(&cart)?;
        Ok(true)
    }

    /// Take one from a line; a line at quantity 1 is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn decrement(&self, product_id: &ProductId) -> Result<Decrement> {
        let mut cart = self.storage.cart()?;
        let outcome = cart.decrement_quantity(product_id);
        if outcome != Decrement::Missing {
            self.storage.save_cart(&cart)?;
        }
        Ok(outcome)
    }

    /// Empty the cart. The applied coupon is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn clear(&self) -> Result<()> {
        Ok(self.storage.save_cart(&Cart::new())?)
    }

    /// Total quantity across lines, as shown on the header badge.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn item_count(&self) -> Result<u32> {
        Ok(self.storage.cart()?.item_count())
    }

    /// Validate a coupon with the API and apply it for this session.
    ///
    /// A blank code is refused without a request. A refused code leaves any
    /// previously applied coupon in place.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Validation` with the server's reason if the
    /// code is refused, or another error if the request or storage fails.
    #[instrument(skip(self))]
    pub async fn apply_coupon(&self, code: &str) -> Result<Coupon> {
        let code = code.trim();
        if code.is_empty() {
            return Err(StorefrontError::Validation(EMPTY_COUPON_MESSAGE.to_string()));
        }

        let coupon = self
            .api
            .apply_coupon(code)
            .await
            .map_err(|e| refusal(e, INVALID_COUPON_MESSAGE))?;

        self.storage.set_applied_coupon(Some(&coupon))?;
        add_breadcrumb("cart", "Applied coupon", Some(&[("code", coupon.code.as_str())]));
        Ok(coupon)
    }

    /// Drop the applied coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn remove_coupon(&self) -> Result<()> {
        Ok(self.storage.set_applied_coupon(None)?)
    }

    /// The coupon applied this session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn applied_coupon(&self) -> Result<Option<Coupon>> {
        Ok(self.storage.applied_coupon()?)
    }

    /// Subtotal, discount and total for the current cart and coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn totals(&self) -> Result<CartTotals> {
        let cart = self.storage.cart()?;
        let coupon = self.storage.applied_coupon()?;
        Ok(cart.totals(coupon.as_ref()))
    }

    /// Everything the cart page shows.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn summary(&self) -> Result<CartSummary> {
        let cart = self.storage.cart()?;
        let coupon = self.storage.applied_coupon()?;
        let totals = cart.totals(coupon.as_ref());
        let item_count = cart.item_count();
        Ok(CartSummary {
            lines: cart.lines().to_vec(),
            coupon,
            totals,
            item_count,
        })
    }
}
