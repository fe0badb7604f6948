//! Orders and shipping details.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::OrderId;
use super::price::Price;
use super::status::OrderStatus;
use super::user::UserProfile;
use crate::cart::CartLine;

/// Where an order is shipped. Every field is required at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub pincode: String,
}

impl ShippingAddress {
    /// Prefill from the logged-in user's profile.
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: field(&profile.name),
            email: profile.email.clone(),
            phone: field(&profile.phone),
            address: field(&profile.address),
            city: field(&profile.city),
            pincode: field(&profile.pincode),
        }
    }

    /// Name of the first blank field, in form order.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("pincode", &self.pincode),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    /// One-line summary used in admin listings.
    #[must_use]
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}",
            self.name, self.phone, self.address, self.city, self.pincode
        )
    }
}

/// An order as returned by `GET /orders/my-orders` and `GET /admin/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<CartLine>,
    pub total_amount: Price,
    pub shipping_address: ShippingAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_link: Option<String>,
    #[serde(default)]
    pub payment_status: String,
}

/// Parse an order timestamp in any shape the store API has written:
/// RFC 3339, an HTTP date (`Thu, 01 Oct 2026 10:30:00 GMT`) or a naive ISO
/// timestamp, which is taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = DateTime::parse_from_rfc2822(raw) {
        return Some(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp: {raw}")))
}

/// What the shopper sees in the tracking column of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tracking<'a> {
    /// Shipped with a tracking link.
    Track(&'a str),
    /// Delivered.
    Delivered,
    /// Nothing to show yet.
    None,
}

impl Order {
    /// Tracking display for this order.
    #[must_use]
    pub fn tracking(&self) -> Tracking<'_> {
        match (self.status, self.tracking_link.as_deref()) {
            (OrderStatus::Shipped, Some(link)) if !link.is_empty() => Tracking::Track(link),
            (OrderStatus::Delivered, _) => Tracking::Delivered,
            _ => Tracking::None,
        }
    }

    /// `Name (xQty), ...` summary of the items.
    #[must_use]
    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(|i| format!("{} (x{})", i.name, i.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
