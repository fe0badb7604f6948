//! Checkout: shipping details and order placement.

use everaura_core::{Cart, OrderId, ShippingAddress};
use tracing::{instrument, warn};

use super::require_token;
use crate::api::{CreateOrderRequest, StorefrontApi};
use crate::error::{Result, StorefrontError, add_breadcrumb};
use crate::storage::ClientStorage;

/// An order the API accepted, awaiting payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Where the shopper completes payment.
    pub payment_url: String,
    pub order_id: Option<OrderId>,
}

/// Checkout page behavior.
pub struct CheckoutService<'a> {
    api: &'a StorefrontApi,
    storage: &'a ClientStorage,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(api: &'a StorefrontApi, storage: &'a ClientStorage) -> Self {
        Self { api, storage }
    }

    /// The cart to check out, once the shopper may proceed.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotLoggedIn` without a login, or
    /// `StorefrontError::EmptyCart` if there is nothing to buy.
    pub fn ready_cart(&self) -> Result<Cart> {
        require_token(self.storage)?;
        let cart = self.storage.cart()?;
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        Ok(cart)
    }

    /// Shipping details to prefill the form with.
    ///
    /// Uses the saved profile from the API; if that call fails, only the email
    /// from the profile cached at login is filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if the shopper cannot check out or storage fails.
    #[instrument(skip(self))]
    pub async fn prefill(&self) -> Result<ShippingAddress> {
        self.ready_cart()?;
        let token = require_token(self.storage)?;

        match self.api.me(&token).await {
            Ok(profile) => Ok(ShippingAddress::from_profile(&profile)),
            Err(e) => {
                warn!(error = %e, "Failed to fetch user details");
                let email = self
                    .storage
                    .user()?
                    .map(|user| user.email)
                    .unwrap_or_default();
                Ok(ShippingAddress {
                    email,
                    ..ShippingAddress::default()
                })
            }
        }
    }

    /// Create the order and return where to pay for it.
    ///
    /// On success the cart and the applied coupon are cleared. On any
    /// failure nothing local changes.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Validation` naming the first blank shipping
    /// field, `NotLoggedIn`/`EmptyCart` if checkout is not possible, or an
    /// API error if the order is refused.
    #[instrument(skip_all)]
    pub async fn place_order(&self, shipping_address: &ShippingAddress) -> Result<PlacedOrder> {
        let cart = self.ready_cart()?;
        let token = require_token(self.storage)?;

        if let Some(field) = shipping_address.missing_field() {
            return Err(StorefrontError::Validation(format!(
                "Please fill in all shipping details. Missing: {field}"
            )));
        }

        let coupon = self.storage.applied_coupon()?;
        let request = CreateOrderRequest {
            items: cart.lines(),
            shipping_address,
            coupon_code: coupon.as_ref().map(|c| c.code.as_str()),
        };

        let response = self.api.create_order(&token, &request).await?;

        self.storage.save_cart(&Cart::new())?;
        self.storage.set_applied_coupon(None)?;
        add_breadcrumb("checkout", "Order created", None);
        tracing::info!(order_id = ?response.order_id, "Order created");

        Ok(PlacedOrder {
            payment_url: response.payment_url,
            order_id: response.order_id,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use everaura_core::{Category, Gender, Material, Price, Product, ProductId, ProductType};
    use secrecy::SecretString;
    use std::time::Duration;
    use url::Url;

    fn offline_api() -> StorefrontApi {
        StorefrontApi::with_cache_ttl(
            Url::parse("http://127.0.0.1:9/api").unwrap(),
            Duration::from_secs(300),
        )
        .unwrap()
    }

    fn logged_in_with_cart() -> ClientStorage {
        let storage = ClientStorage::in_memory();
        storage
            .set_auth_token(&SecretString::from("tok".to_string()))
            .unwrap();
        let mut cart = Cart::new();
        cart.add_item(&Product {
            id: ProductId::new("p1"),
            name: "Kundan Necklace".to_string(),
            price: Price::from_paise(249_900),
            images: vec![],
            description: None,
            category: Category::Necklaces,
            gender: Gender::Her,
            product_type: ProductType::Jewelry,
            material: Material::Kundan,
            trending: false,
            rsn: None,
        });
        storage.save_cart(&cart).unwrap();
        storage
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "1 MG Road".to_string(),
            city: "Pune".to_string(),
            pincode: "411001".to_string(),
        }
    }

    #[test]
    fn test_requires_login() {
        let api = offline_api();
        let storage = ClientStorage::in_memory();
        let checkout = CheckoutService::new(&api, &storage);
        assert!(matches!(
            checkout.ready_cart(),
            Err(StorefrontError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_requires_items() {
        let api = offline_api();
        let storage = logged_in_with_cart();
        storage.save_cart(&Cart::new()).unwrap();
        let checkout = CheckoutService::new(&api, &storage);
        assert!(matches!(checkout.ready_cart(), Err(StorefrontError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_missing_field_is_named() {
        let api = offline_api();
        let storage = logged_in_with_cart();
        let checkout = CheckoutService::new(&api, &storage);

        let mut incomplete = address();
        incomplete.city = String::new();
        let err = checkout.place_order(&incomplete).await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Please fill in all shipping details. Missing: city"
        );
    }

    #[tokio::test]
    async fn test_failed_order_keeps_cart() {
        let api = offline_api();
        let storage = logged_in_with_cart();
        let checkout = CheckoutService::new(&api, &storage);

        assert!(checkout.place_order(&address()).await.is_err());
        assert_eq!(storage.cart().unwrap().item_count(), 1);
    }

    #[tokio::test]
    async fn test_prefill_falls_back_to_cached_email() {
        let api = offline_api();
        let storage = logged_in_with_cart();
        storage
            .set_user(&everaura_core::UserProfile {
                email: "asha@example.com".to_string(),
                name: Some("Asha".to_string()),
                ..Default::default()
            })
            .unwrap();
        let checkout = CheckoutService::new(&api, &storage);

        let prefill = checkout.prefill().await.unwrap();
        assert_eq!(prefill.email, "asha@example.com");
        assert!(prefill.name.is_empty());
    }
}
