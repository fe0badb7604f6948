//! Order placement and history.

use everaura_core::{CartLine, Order, OrderId, ShippingAddress};
use reqwest::Method;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{StorefrontApi, with_bearer};
use crate::api::ApiError;

/// Body of `POST /orders/create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest<'a> {
    pub items: &'a [CartLine],
    pub shipping_address: &'a ShippingAddress,
    pub coupon_code: Option<&'a str>,
}

/// Response to `POST /orders/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    /// Where the shopper completes payment.
    pub payment_url: String,
    #[serde(default)]
    pub order_id: Option<OrderId>,
}

impl StorefrontApi {
    /// Create an order and get the payment URL for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is rejected or the request fails.
    #[instrument(skip_all, fields(items = order.items.len()))]
    pub async fn create_order(
        &self,
        token: &SecretString,
        order: &CreateOrderRequest<'_>,
    ) -> Result<CreateOrderResponse, ApiError> {
        let url = self.rest().endpoint(&["orders", "create"])?;
        let request = with_bearer(self.rest().request(Method::POST, url), token).json(order);

        self.rest().send_json(request).await
    }

    /// The logged-in user's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip_all)]
    pub async fn my_orders(&self, token: &SecretString) -> Result<Vec<Order>, ApiError> {
        let url = self.rest().endpoint(&["orders", "my-orders"])?;
        let request = with_bearer(self.rest().request(Method::GET, url), token);

        self.rest().send_json(request).await
    }
}
