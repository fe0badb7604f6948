//! Admin flows against the mock store API.
//!
//! Covers the admin key header, RSN assignment on create and edit, coupon
//! management, review moderation and order fulfilment.

#![allow(clippy::indexing_slicing)]

use axum::http::Method;
use everaura_admin::AdminError;
use everaura_admin::services::ProductDraft;
use everaura_core::{
    Category, Coupon, Gender, Material, OrderId, OrderStatus, ProductId, ProductType,
    RsnSelection, Testimonial, TestimonialId, TestimonialStatus,
};
use everaura_integration_tests::{ADMIN_KEY, MockStore, fixtures};
use rust_decimal::Decimal;

async fn store() -> MockStore {
    MockStore::start().await.expect("Failed to start mock store")
}

fn draft(name: &str, selection: RsnSelection) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price: Decimal::new(799, 0),
        selection,
        trending: false,
        description: "Handcrafted".to_string(),
    }
}

fn rings(gender: Gender, product_type: ProductType, material: Material) -> RsnSelection {
    RsnSelection {
        category: Category::Rings,
        gender,
        product_type,
        material,
    }
}

fn testimonial(id: &str, status: TestimonialStatus) -> Testimonial {
    Testimonial {
        id: TestimonialId::new(id),
        name: format!("Reviewer {id}"),
        contact: None,
        summary: "Beautiful".to_string(),
        full_review: None,
        status,
    }
}

/// Rings catalog: anti-tarnish sequences 1 and 3, one jewelry ring, one necklace.
fn seed_rings(store: &MockStore) {
    store.add_product(fixtures::product_with_rsn(
        "ring-1",
        Category::Rings,
        ProductType::AntiTarnish,
        Material::AntiTarnish,
        "40000001",
    ));
    store.add_product(fixtures::product_with_rsn(
        "ring-3",
        Category::Rings,
        ProductType::AntiTarnish,
        Material::AntiTarnish,
        "40000003",
    ));
    store.add_product(fixtures::product_with_rsn(
        "ring-kundan",
        Category::Rings,
        ProductType::Jewelry,
        Material::Kundan,
        "40120002",
    ));
    store.add_product(fixtures::product_with_rsn(
        "necklace-7",
        Category::Necklaces,
        ProductType::AntiTarnish,
        Material::AntiTarnish,
        "30000007",
    ));
}

// ============================================================================
// Admin key
// ============================================================================

#[tokio::test]
async fn test_admin_requests_carry_the_key() {
    let store = store().await;
    let admin = fixtures::admin(&store);

    admin.coupons().list().await.expect("Coupons should list");
    admin.testimonials().all().await.expect("Reviews should list");
    admin.orders().list().await.expect("Orders should list");

    let requests = store.requests();
    assert_eq!(requests.len(), 3);
    assert!(
        requests
            .iter()
            .all(|r| r.admin_key.as_deref() == Some(ADMIN_KEY))
    );
}

#[tokio::test]
async fn test_wrong_key_is_refused() {
    let store = store().await;
    let admin = fixtures::admin_with_key(&store, "Zx8q-Wv3m-Np5t-Kb7y-Gh2s");

    let err = admin.coupons().list().await.expect_err("Key should be refused");
    assert!(matches!(err, AdminError::Api(ref e) if e.status() == Some(401)));
    assert_eq!(err.user_message(), "Unauthorized");
}

// ============================================================================
// Products and RSNs
// ============================================================================

#[tokio::test]
async fn test_preview_uses_next_sequence_in_bucket() {
    let store = store().await;
    seed_rings(&store);
    let admin = fixtures::admin(&store);
    let products = admin.products();

    let her = products
        .preview_rsn(&rings(Gender::Her, ProductType::AntiTarnish, Material::AntiTarnish))
        .await
        .expect("Preview");
    assert_eq!(her.as_str(), "40000004");

    // Gender is part of the prefix but not of the sequence bucket
    let him = products
        .preview_rsn(&rings(Gender::Him, ProductType::AntiTarnish, Material::AntiTarnish))
        .await
        .expect("Preview");
    assert_eq!(him.as_str(), "41000004");

    let kundan = products
        .preview_rsn(&rings(Gender::Her, ProductType::Jewelry, Material::Kundan))
        .await
        .expect("Preview");
    assert_eq!(kundan.as_str(), "40120003");
}

#[tokio::test]
async fn test_preview_without_catalog_starts_at_one() {
    let store = store().await;
    seed_rings(&store);
    store.take_products_down(true);
    let admin = fixtures::admin(&store);

    let rsn = admin
        .products()
        .preview_rsn(&rings(Gender::Her, ProductType::AntiTarnish, Material::AntiTarnish))
        .await
        .expect("Preview should not fail");
    assert_eq!(rsn.as_str(), "40000001");
}

#[tokio::test]
async fn test_create_uploads_image_and_assigns_rsn() {
    let store = store().await;
    seed_rings(&store);
    let admin = fixtures::admin(&store);
    let dir = tempfile::tempdir().expect("Temp dir");
    let image = dir.path().join("ring.jpg");
    std::fs::write(&image, b"\xFF\xD8\xFF\xE0fake-jpeg").expect("Write image");

    // Material is ignored for anti-tarnish pieces
    let rsn = admin
        .products()
        .create(
            draft(
                " Solitaire Ring ",
                rings(Gender::Her, ProductType::AntiTarnish, Material::Pearl),
            ),
            &image,
        )
        .await
        .expect("Product should be created");
    assert_eq!(rsn.as_str(), "40000004");
    assert_eq!(store.uploads(), ["ring.jpg"]);

    let created = store
        .products()
        .into_iter()
        .find(|p| p.rsn.as_ref() == Some(&rsn))
        .expect("Created product");
    assert_eq!(created.name, "Solitaire Ring");
    assert_eq!(created.material, Material::AntiTarnish);
    assert_eq!(created.category, Category::Rings);
    assert_eq!(created.price.amount(), Decimal::new(799, 0));
    assert!(!created.trending);

    let listed = admin.products().list().await.expect("List");
    let rsns: Vec<&str> = listed
        .iter()
        .filter_map(|p| p.rsn.as_ref().map(|r| r.as_str()))
        .collect();
    assert_eq!(
        rsns,
        ["30000007", "40000001", "40000003", "40000004", "40120002"]
    );
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing() {
    let store = store().await;
    let admin = fixtures::admin(&store);
    let dir = tempfile::tempdir().expect("Temp dir");
    let image = dir.path().join("ring.png");
    std::fs::write(&image, b"png").expect("Write image");

    let err = admin
        .products()
        .create(
            draft(
                "   ",
                rings(Gender::Her, ProductType::AntiTarnish, Material::AntiTarnish),
            ),
            &image,
        )
        .await
        .expect_err("Blank name");
    assert_eq!(err.user_message(), "Please enter a product name.");
    assert!(store.requests().is_empty());
}

#[tokio::test]
async fn test_edit_keeps_rsn_until_prefix_changes() {
    let store = store().await;
    seed_rings(&store);
    let admin = fixtures::admin(&store);
    let id = ProductId::new("ring-3");

    let mut renamed = draft(
        "Renamed Ring",
        rings(Gender::Her, ProductType::AntiTarnish, Material::AntiTarnish),
    );
    renamed.trending = true;
    let rsn = admin
        .products()
        .update(&id, renamed)
        .await
        .expect("Update");
    assert_eq!(rsn.as_str(), "40000003");

    let stored = admin.products().get(&id).await.expect("Product");
    assert_eq!(stored.name, "Renamed Ring");
    assert!(stored.trending);
    assert_eq!(stored.rsn.as_ref().map(|r| r.as_str()), Some("40000003"));

    // Moving to the jewelry bucket issues a new RSN there
    let rsn = admin
        .products()
        .update(
            &id,
            draft(
                "Kundan Ring",
                rings(Gender::Her, ProductType::Jewelry, Material::Kundan),
            ),
        )
        .await
        .expect("Update");
    assert_eq!(rsn.as_str(), "40120003");

    let stored = admin.products().get(&id).await.expect("Product");
    assert_eq!(stored.product_type, ProductType::Jewelry);
    assert_eq!(stored.material, Material::Kundan);
    assert_eq!(stored.rsn.as_ref().map(|r| r.as_str()), Some("40120003"));
    assert_eq!(store.request_count(&Method::PUT, "/api/products/ring-3"), 2);
}

#[tokio::test]
async fn test_edit_and_delete_missing_product() {
    let store = store().await;
    let admin = fixtures::admin(&store);
    let id = ProductId::new("nope");

    let err = admin
        .products()
        .update(
            &id,
            draft(
                "Ring",
                rings(Gender::Her, ProductType::AntiTarnish, Material::AntiTarnish),
            ),
        )
        .await
        .expect_err("Missing product");
    assert!(matches!(err, AdminError::NotFound(_)));
    assert_eq!(err.user_message(), "Product not found!");

    let err = admin.products().delete(&id).await.expect_err("Missing product");
    assert_eq!(err.user_message(), "Product not found");
}

// ============================================================================
// Coupons
// ============================================================================

#[tokio::test]
async fn test_coupon_lifecycle() {
    let store = store().await;
    let admin = fixtures::admin(&store);
    let coupons = admin.coupons();

    coupons
        .create(" DIWALI15 ", Decimal::from(15))
        .await
        .expect("Coupon created");
    let listed = coupons.list().await.expect("List");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].code, "DIWALI15");
    assert_eq!(listed[0].discount_percent, Decimal::from(15));

    let err = coupons
        .create("DIWALI15", Decimal::from(20))
        .await
        .expect_err("Duplicate code");
    assert_eq!(err.user_message(), "Coupon code already exists");

    let err = coupons
        .create("FREE", Decimal::from(101))
        .await
        .expect_err("Discount too large");
    assert!(matches!(err, AdminError::BadRequest(_)));
    assert_eq!(store.request_count(&Method::POST, "/api/coupons"), 2);

    let id = listed[0].id.clone().expect("Coupon id");
    coupons.delete(&id).await.expect("Coupon deleted");
    assert!(store.coupons().is_empty());
}

#[tokio::test]
async fn test_created_coupon_applies_in_storefront() {
    let store = store().await;
    store.add_product(fixtures::product("p1", 20_000));
    let admin = fixtures::admin(&store);
    admin
        .coupons()
        .create("WELCOME25", Decimal::from(25))
        .await
        .expect("Coupon created");

    let shopper = fixtures::shopper(&store);
    shopper
        .cart()
        .add_item(&ProductId::new("p1"))
        .await
        .expect("Add");
    let coupon: Coupon = shopper
        .cart()
        .apply_coupon("welcome25")
        .await
        .expect("Coupon applies");
    assert_eq!(coupon.label(), "WELCOME25 - 25% OFF");
    assert_eq!(
        shopper.cart().totals().expect("Totals").total.amount(),
        Decimal::from(150)
    );
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_moderation_controls_storefront_reviews() {
    let store = store().await;
    store.add_testimonial(testimonial("r1", TestimonialStatus::Approved));
    store.add_testimonial(testimonial("r2", TestimonialStatus::Pending));
    store.add_testimonial(testimonial("r3", TestimonialStatus::Pending));
    let admin = fixtures::admin(&store);
    let moderation = admin.testimonials();

    let all = moderation.all().await.expect("All reviews");
    let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["r2", "r3", "r1"]);
    assert_eq!(moderation.pending().await.expect("Pending").len(), 2);

    moderation
        .approve(&TestimonialId::new("r2"))
        .await
        .expect("Approved");
    moderation
        .delete(&TestimonialId::new("r3"))
        .await
        .expect("Deleted");

    let shopper = fixtures::shopper(&store);
    let public = shopper.feedback().testimonials().await.expect("Reviews");
    let ids: Vec<&str> = public.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["r1", "r2"]);

    let err = moderation
        .approve(&TestimonialId::new("r3"))
        .await
        .expect_err("Already deleted");
    assert_eq!(err.user_message(), "Testimonial not found");
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_order_fulfilment() {
    let store = store().await;
    store.add_order(fixtures::order("EVR-1001", "asha@example.com", 249_900));
    let admin = fixtures::admin(&store);
    let desk = admin.orders();
    let id = OrderId::new("EVR-1001");

    desk.update_status(&id, OrderStatus::Shipped)
        .await
        .expect("Status updated");
    desk.add_tracking(&id, "  https://courier.example.com/track/778  ")
        .await
        .expect("Tracking saved");

    let orders = desk.list().await.expect("Orders");
    assert_eq!(orders[0].status, OrderStatus::Shipped);
    assert_eq!(
        orders[0].tracking_link.as_deref(),
        Some("https://courier.example.com/track/778")
    );

    let err = desk.add_tracking(&id, "   ").await.expect_err("Blank link");
    assert_eq!(err.user_message(), "Please enter a tracking link first.");

    let err = desk
        .update_status(&OrderId::new("EVR-404"), OrderStatus::Delivered)
        .await
        .expect_err("Unknown order");
    assert!(matches!(err, AdminError::BadRequest(_)));
    assert_eq!(err.user_message(), "Order not found");
}
