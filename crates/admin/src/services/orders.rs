//! Order fulfilment.

use everaura_core::{Order, OrderId, OrderStatus};
use tracing::{info, instrument};

use super::refused;
use crate::client::AdminClient;
use crate::error::{AdminError, Result};

/// Admin orders tab.
pub struct OrderDesk<'a> {
    client: &'a AdminClient,
}

impl<'a> OrderDesk<'a> {
    #[must_use]
    pub const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn list(&self) -> Result<Vec<Order>> {
        Ok(self.client.list_orders().await?)
    }

    /// Move an order to `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API refuses or the request fails.
    #[instrument(skip(self))]
    pub async fn update_status(&self, order_id: &OrderId, status: OrderStatus) -> Result<()> {
        self.client
            .update_order_status(order_id, status)
            .await
            .map_err(|e| refused(e, "Failed to update status."))?;
        info!(%order_id, %status, "Order status updated");
        Ok(())
    }

    /// Save a tracking link. The shopper is notified once the order ships.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::BadRequest` for a blank link, or an error if the
    /// API refuses or the request fails.
    #[instrument(skip(self))]
    pub async fn add_tracking(&self, order_id: &OrderId, tracking_link: &str) -> Result<()> {
        let tracking_link = tracking_link.trim();
        if tracking_link.is_empty() {
            return Err(AdminError::BadRequest(
                "Please enter a tracking link first.".to_string(),
            ));
        }

        self.client
            .add_tracking(order_id, tracking_link)
            .await
            .map_err(|e| refused(e, "Failed to save tracking link."))?;
        info!(%order_id, "Tracking link saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::AdminConfig;
    use secrecy::SecretString;
    use url::Url;

    #[tokio::test]
    async fn test_blank_tracking_link_rejected_locally() {
        let config = AdminConfig::new(
            Url::parse("http://127.0.0.1:9/api").unwrap(),
            SecretString::from("k3Y!x9#Lm2$Qp7".to_string()),
        );
        let client = AdminClient::new(&config).unwrap();
        let err = OrderDesk::new(&client)
            .add_tracking(&OrderId::new("EVR-1"), "   ")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Please enter a tracking link first.");
    }
}
