//! Test data and clients wired to a [`MockStore`].

use everaura_admin::{AdminConfig, AdminState};
use everaura_core::{
    Category, Gender, Material, Order, Price, Product, ProductId, ProductType, Rsn,
    ShippingAddress,
};
use everaura_storefront::AppState;
use everaura_storefront::config::StorefrontConfig;
use everaura_storefront::storage::ClientStorage;
use secrecy::SecretString;
use serde_json::json;

use crate::{ADMIN_KEY, MockStore};

/// An anti-tarnish necklace for her with no RSN.
#[must_use]
pub fn product(id: &str, paise: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Price::from_paise(paise),
        images: vec![format!("https://cdn.example.com/{id}.jpg")],
        description: None,
        category: Category::Necklaces,
        gender: Gender::Her,
        product_type: ProductType::AntiTarnish,
        material: Material::AntiTarnish,
        trending: false,
        rsn: None,
    }
}

/// A product with an RSN in the given bucket.
#[must_use]
pub fn product_with_rsn(
    id: &str,
    category: Category,
    product_type: ProductType,
    material: Material,
    rsn: &str,
) -> Product {
    Product {
        category,
        product_type,
        material,
        rsn: Some(Rsn::new(rsn)),
        ..product(id, 99_900)
    }
}

#[must_use]
pub fn shipping_address(email: &str) -> ShippingAddress {
    ShippingAddress {
        name: "Asha Rao".to_string(),
        email: email.to_string(),
        phone: "9876543210".to_string(),
        address: "12 MG Road".to_string(),
        city: "Pune".to_string(),
        pincode: "411001".to_string(),
    }
}

/// A paid order for `email` totalling `paise`.
///
/// # Panics
///
/// Panics if the order JSON no longer matches [`Order`].
#[must_use]
pub fn order(order_id: &str, email: &str, paise: i64) -> Order {
    serde_json::from_value(json!({
        "order_id": order_id,
        "created_at": "2026-10-01T10:30:00Z",
        "status": "Paid",
        "items": [],
        "total_amount": Price::from_paise(paise),
        "shipping_address": shipping_address(email),
        "payment_status": "paid",
    }))
    .expect("order fixture should deserialize")
}

/// Storefront state against `store` with in-memory client storage.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn shopper(store: &MockStore) -> AppState {
    let config = StorefrontConfig::for_api(store.api_url(), "unused");
    AppState::with_storage(config, ClientStorage::in_memory())
        .expect("storefront state should build")
}

/// Admin state against `store` using `key`.
///
/// # Panics
///
/// Panics if the key is not a valid header value.
#[must_use]
pub fn admin_with_key(store: &MockStore, key: &str) -> AdminState {
    let config = AdminConfig::new(store.api_url(), SecretString::from(key.to_string()));
    AdminState::new(config).expect("admin state should build")
}

/// Admin state against `store` using the key it accepts.
#[must_use]
pub fn admin(store: &MockStore) -> AdminState {
    admin_with_key(store, ADMIN_KEY)
}
