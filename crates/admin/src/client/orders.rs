//! Order fulfilment endpoints.

use everaura_core::{Order, OrderId, OrderStatus};
use everaura_storefront::api::ApiError;
use reqwest::Method;
use serde_json::json;
use tracing::instrument;

use super::AdminClient;

impl AdminClient {
    /// Every order in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.rest().endpoint(&["admin", "orders"])?;
        let request = self.rest().request(Method::GET, url);
        self.rest().send_json(request).await
    }

    /// Move an order to a new status. The API notifies the shopper.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let url = self
            .rest()
            .endpoint(&["admin", "orders", order_id.as_str(), "update-status"])?;
        let request = self
            .rest()
            .request(Method::PUT, url)
            .json(&json!({ "status": status }));
        self.rest().send_empty(request).await
    }

    /// Attach a courier tracking link to an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn add_tracking(&self, order_id: &OrderId, tracking_link: &str) -> Result<(), ApiError> {
        let url = self
            .rest()
            .endpoint(&["admin", "orders", order_id.as_str(), "add-tracking"])?;
        let request = self
            .rest()
            .request(Method::PUT, url)
            .json(&json!({ "tracking_link": tracking_link }));
        self.rest().send_empty(request).await
    }
}
