//! In-memory store API.
//!
//! Routes mirror the live API closely enough for the clients to run
//! unchanged: same paths, same JSON shapes, `{"error": ...}` bodies on
//! failure. Admin routes require [`ADMIN_KEY`] in `X-ADMIN-KEY`; shopper
//! routes require a bearer token issued by `POST /auth/verify-otp`.

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use everaura_core::{
    Coupon, CouponId, NewTestimonial, Order, OrderStatus, Product, ProductId, Testimonial,
    TestimonialId, TestimonialStatus, UserProfile,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use url::Url;

/// The admin key the mock store accepts.
pub const ADMIN_KEY: &str = "Qm7v-Xr2k-Lp9w-Tz4n-Hd6c";

/// The one-time password the mock store accepts for any email.
pub const VALID_OTP: &str = "123456";

const ADMIN_KEY_HEADER: &str = "x-admin-key";
const TOKEN_PREFIX: &str = "tok:";

type Reply = Result<Response, Response>;

/// A request as the mock store saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub admin_key: Option<String>,
    pub bearer: Option<String>,
}

#[derive(Default)]
struct StoreData {
    products: Vec<Product>,
    coupons: Vec<Coupon>,
    testimonials: Vec<Testimonial>,
    orders: Vec<Order>,
    profiles: Vec<UserProfile>,
    placed_orders: Vec<Value>,
    contacts: Vec<Value>,
    otp_requests: Vec<String>,
    uploads: Vec<String>,
    last_id: u32,
}

impl StoreData {
    fn next_id(&mut self, prefix: &str) -> String {
        self.last_id += 1;
        format!("{prefix}{}", self.last_id)
    }
}

#[derive(Default)]
struct MockState {
    data: Mutex<StoreData>,
    requests: Mutex<Vec<RecordedRequest>>,
    reject_tokens: AtomicBool,
    products_down: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A running mock store. The server stops when this is dropped.
pub struct MockStore {
    addr: SocketAddr,
    api_url: Url,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockStore {
    /// Bind an ephemeral localhost port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> io::Result<Self> {
        let state = Arc::new(MockState::default());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let api_url = Url::parse(&format!("http://{addr}/api")).map_err(io::Error::other)?;

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            api_url,
            state,
            server,
        })
    }

    /// Base URL to configure clients with, ending in `/api`.
    #[must_use]
    pub fn api_url(&self) -> Url {
        self.api_url.clone()
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn add_product(&self, product: Product) {
        lock(&self.state.data).products.push(product);
    }

    pub fn add_coupon(&self, coupon: Coupon) {
        lock(&self.state.data).coupons.push(coupon);
    }

    pub fn add_testimonial(&self, testimonial: Testimonial) {
        lock(&self.state.data).testimonials.push(testimonial);
    }

    pub fn add_order(&self, order: Order) {
        lock(&self.state.data).orders.push(order);
    }

    /// Saved profile returned by `GET /auth/me` for its email.
    pub fn add_profile(&self, profile: UserProfile) {
        lock(&self.state.data).profiles.push(profile);
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        lock(&self.state.data).products.clone()
    }

    #[must_use]
    pub fn coupons(&self) -> Vec<Coupon> {
        lock(&self.state.data).coupons.clone()
    }

    #[must_use]
    pub fn testimonials(&self) -> Vec<Testimonial> {
        lock(&self.state.data).testimonials.clone()
    }

    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        lock(&self.state.data).orders.clone()
    }

    /// Bodies of every `POST /orders/create`.
    #[must_use]
    pub fn placed_orders(&self) -> Vec<Value> {
        lock(&self.state.data).placed_orders.clone()
    }

    /// Bodies of every `POST /contact`.
    #[must_use]
    pub fn contacts(&self) -> Vec<Value> {
        lock(&self.state.data).contacts.clone()
    }

    /// Emails that asked for a one-time password.
    #[must_use]
    pub fn otp_requests(&self) -> Vec<String> {
        lock(&self.state.data).otp_requests.clone()
    }

    /// File names of uploaded product images.
    #[must_use]
    pub fn uploads(&self) -> Vec<String> {
        lock(&self.state.data).uploads.clone()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// How many requests hit `method path`.
    #[must_use]
    pub fn request_count(&self, method: &Method, path: &str) -> usize {
        lock(&self.state.requests)
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }

    /// Answer every bearer-authenticated route with 401.
    pub fn reject_tokens(&self, reject: bool) {
        self.state.reject_tokens.store(reject, Ordering::SeqCst);
    }

    /// Answer `GET /products` with an HTML 500 page.
    pub fn take_products_down(&self, down: bool) {
        self.state.products_down.store(down, Ordering::SeqCst);
    }
}

impl Drop for MockStore {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/api/coupons", get(list_coupons).post(create_coupon))
        .route("/api/coupons/apply", post(apply_coupon))
        .route("/api/coupons/{id}", axum::routing::delete(delete_coupon))
        .route("/api/auth/send-otp", post(send_otp))
        .route("/api/auth/verify-otp", post(verify_otp))
        .route("/api/auth/me", get(me))
        .route("/api/orders/create", post(create_order))
        .route("/api/orders/my-orders", get(my_orders))
        .route("/api/admin/orders", get(admin_orders))
        .route("/api/admin/orders/{id}/update-status", put(update_status))
        .route("/api/admin/orders/{id}/add-tracking", put(add_tracking))
        .route(
            "/api/testimonials",
            get(all_testimonials).post(submit_testimonial),
        )
        .route("/api/testimonials/approved", get(approved_testimonials))
        .route("/api/testimonials/pending", get(pending_testimonials))
        .route(
            "/api/testimonials/{id}",
            axum::routing::delete(delete_testimonial),
        )
        .route("/api/testimonials/{id}/approve", put(approve_testimonial))
        .route("/api/contact", post(contact))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
        .with_state(state)
}

async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    let recorded = RecordedRequest {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_owned),
        admin_key: header_str(headers, ADMIN_KEY_HEADER),
        bearer: header_str(headers, header::AUTHORIZATION.as_str())
            .and_then(|v| v.strip_prefix("Bearer ").map(str::to_owned)),
    };
    lock(&state.requests).push(recorded);
    next.run(request).await
}

// =============================================================================
// Helpers
// =============================================================================

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn ok_message(message: &str) -> Reply {
    Ok(Json(json!({ "message": message })).into_response())
}

fn require_admin(headers: &HeaderMap) -> Result<(), Response> {
    match header_str(headers, ADMIN_KEY_HEADER).as_deref() {
        Some(ADMIN_KEY) => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Unauthorized")),
    }
}

/// Email of the shopper the bearer token was issued to.
fn require_shopper(state: &MockState, headers: &HeaderMap) -> Result<String, Response> {
    let email = header_str(headers, header::AUTHORIZATION.as_str())
        .and_then(|v| v.strip_prefix("Bearer ").map(str::to_owned))
        .and_then(|token| token.strip_prefix(TOKEN_PREFIX).map(str::to_owned));
    match email {
        Some(email) if !state.reject_tokens.load(Ordering::SeqCst) => Ok(email),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Invalid or expired token")),
    }
}

fn bad_request(e: impl ToString) -> Response {
    error(StatusCode::BAD_REQUEST, &e.to_string())
}

// =============================================================================
// Products
// =============================================================================

#[derive(Deserialize)]
struct ProductFilter {
    category: Option<String>,
    gender: Option<String>,
    #[serde(rename = "type")]
    product_type: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .is_none_or(|c| product.category.name() == c)
            && self
                .gender
                .as_deref()
                .is_none_or(|g| product.gender.code().to_string() == g)
            && self
                .product_type
                .as_deref()
                .is_none_or(|t| product.product_type.code().to_string() == t)
    }
}

async fn list_products(
    State(state): State<Arc<MockState>>,
    Query(filter): Query<ProductFilter>,
) -> Response {
    if state.products_down.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/html")],
            "<html><body><h1>Internal Server Error</h1></body></html>",
        )
            .into_response();
    }
    let data = lock(&state.data);
    let products: Vec<&Product> = data.products.iter().filter(|p| filter.matches(p)).collect();
    Json(products).into_response()
}

async fn create_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Reply {
    require_admin(&headers)?;

    let mut fields = serde_json::Map::new();
    let mut image = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "images" {
            image = Some(field.file_name().unwrap_or("image").to_string());
            field.bytes().await.map_err(bad_request)?;
        } else {
            let value = field.text().await.map_err(bad_request)?;
            fields.insert(name, Value::String(value));
        }
    }
    let Some(image) = image else {
        return Err(error(StatusCode::BAD_REQUEST, "Product image is required"));
    };

    let mut data = lock(&state.data);
    // The form's numeric id is the client's timestamp; the store assigns its own.
    fields.remove("id");
    fields.insert("_id".to_string(), Value::String(data.next_id("prod-")));
    fields.insert("images".to_string(), json!([format!("/uploads/{image}")]));
    let product: Product = serde_json::from_value(Value::Object(fields)).map_err(bad_request)?;

    data.uploads.push(image);
    data.products.push(product.clone());
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

async fn update_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(changes): Json<Value>,
) -> Reply {
    require_admin(&headers)?;

    let mut data = lock(&state.data);
    let product = data
        .products
        .iter_mut()
        .find(|p| p.id.as_str() == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Product not found"))?;

    let mut merged = serde_json::to_value(&*product).map_err(bad_request)?;
    if let (Value::Object(merged), Value::Object(changes)) = (&mut merged, changes) {
        merged.extend(changes);
    }
    *product = serde_json::from_value(merged).map_err(bad_request)?;
    Ok(Json(product.clone()).into_response())
}

async fn delete_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    require_admin(&headers)?;

    let id = ProductId::new(id);
    let mut data = lock(&state.data);
    let before = data.products.len();
    data.products.retain(|p| p.id != id);
    if data.products.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Product not found"));
    }
    ok_message("Product deleted")
}

// =============================================================================
// Coupons
// =============================================================================

#[derive(Deserialize)]
struct CodeBody {
    code: String,
}

async fn apply_coupon(State(state): State<Arc<MockState>>, Json(body): Json<CodeBody>) -> Reply {
    let data = lock(&state.data);
    data.coupons
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(body.code.trim()))
        .map(|c| Json(c.clone()).into_response())
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Invalid or expired coupon"))
}

async fn list_coupons(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    require_admin(&headers)?;
    Ok(Json(lock(&state.data).coupons.clone()).into_response())
}

async fn create_coupon(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(mut coupon): Json<Coupon>,
) -> Reply {
    require_admin(&headers)?;

    let mut data = lock(&state.data);
    if data
        .coupons
        .iter()
        .any(|c| c.code.eq_ignore_ascii_case(&coupon.code))
    {
        return Err(error(StatusCode::BAD_REQUEST, "Coupon code already exists"));
    }
    coupon.id = Some(CouponId::new(data.next_id("coupon-")));
    data.coupons.push(coupon.clone());
    Ok((StatusCode::CREATED, Json(coupon)).into_response())
}

async fn delete_coupon(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    require_admin(&headers)?;

    let id = CouponId::new(id);
    let mut data = lock(&state.data);
    let before = data.coupons.len();
    data.coupons.retain(|c| c.id.as_ref() != Some(&id));
    if data.coupons.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Coupon not found"));
    }
    ok_message("Coupon deleted")
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Deserialize)]
struct OtpBody {
    email: String,
    #[serde(default)]
    otp: Option<String>,
}

async fn send_otp(State(state): State<Arc<MockState>>, Json(body): Json<OtpBody>) -> Reply {
    lock(&state.data).otp_requests.push(body.email);
    ok_message("OTP sent")
}

async fn verify_otp(State(state): State<Arc<MockState>>, Json(body): Json<OtpBody>) -> Reply {
    if body.otp.as_deref() != Some(VALID_OTP) {
        return Err(error(StatusCode::BAD_REQUEST, "Invalid OTP"));
    }
    let user = profile_for(&state, &body.email);
    Ok(Json(json!({
        "token": format!("{TOKEN_PREFIX}{}", body.email),
        "user": user,
    }))
    .into_response())
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    let email = require_shopper(&state, &headers)?;
    Ok(Json(profile_for(&state, &email)).into_response())
}

fn profile_for(state: &MockState, email: &str) -> UserProfile {
    lock(&state.data)
        .profiles
        .iter()
        .find(|p| p.email == email)
        .cloned()
        .unwrap_or_else(|| UserProfile {
            email: email.to_string(),
            ..UserProfile::default()
        })
}

// =============================================================================
// Orders
// =============================================================================

async fn create_order(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    require_shopper(&state, &headers)?;

    let has_items = body
        .get("items")
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty());
    if !has_items {
        return Err(error(StatusCode::BAD_REQUEST, "Order has no items"));
    }

    let mut data = lock(&state.data);
    let order_id = data.next_id("EVR-");
    data.placed_orders.push(body);
    Ok(Json(json!({
        "payment_url": format!("https://pay.example.com/checkout/{order_id}"),
        "order_id": order_id,
    }))
    .into_response())
}

async fn my_orders(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    let email = require_shopper(&state, &headers)?;
    let data = lock(&state.data);
    let orders: Vec<&Order> = data
        .orders
        .iter()
        .filter(|o| o.shipping_address.email == email)
        .collect();
    Ok(Json(orders).into_response())
}

async fn admin_orders(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    require_admin(&headers)?;
    Ok(Json(lock(&state.data).orders.clone()).into_response())
}

#[derive(Deserialize)]
struct StatusBody {
    status: OrderStatus,
}

async fn update_status(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Reply {
    require_admin(&headers)?;
    with_order(&state, &id, |order| order.status = body.status)?;
    ok_message("Status updated")
}

#[derive(Deserialize)]
struct TrackingBody {
    tracking_link: String,
}

async fn add_tracking(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<TrackingBody>,
) -> Reply {
    require_admin(&headers)?;
    with_order(&state, &id, |order| {
        order.tracking_link = Some(body.tracking_link);
    })?;
    ok_message("Tracking link saved")
}

fn with_order(state: &MockState, id: &str, edit: impl FnOnce(&mut Order)) -> Result<(), Response> {
    let mut data = lock(&state.data);
    let order = data
        .orders
        .iter_mut()
        .find(|o| o.order_id.as_str() == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Order not found"))?;
    edit(order);
    Ok(())
}

// =============================================================================
// Testimonials and contact
// =============================================================================

async fn approved_testimonials(State(state): State<Arc<MockState>>) -> Response {
    let data = lock(&state.data);
    let approved: Vec<&Testimonial> = data
        .testimonials
        .iter()
        .filter(|t| t.is_approved())
        .collect();
    Json(approved).into_response()
}

async fn submit_testimonial(
    State(state): State<Arc<MockState>>,
    Json(body): Json<NewTestimonial>,
) -> Reply {
    let mut data = lock(&state.data);
    let id = data.next_id("review-");
    data.testimonials.push(Testimonial {
        id: TestimonialId::new(id),
        name: body.name,
        contact: Some(body.contact).filter(|c| !c.is_empty()),
        summary: body.summary,
        full_review: Some(body.full_review).filter(|r| !r.is_empty()),
        status: TestimonialStatus::Pending,
    });
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Testimonial submitted" })),
    )
        .into_response())
}

async fn all_testimonials(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    require_admin(&headers)?;
    Ok(Json(lock(&state.data).testimonials.clone()).into_response())
}

async fn pending_testimonials(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    require_admin(&headers)?;
    let data = lock(&state.data);
    let pending: Vec<&Testimonial> = data
        .testimonials
        .iter()
        .filter(|t| !t.is_approved())
        .collect();
    Ok(Json(pending).into_response())
}

async fn approve_testimonial(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    require_admin(&headers)?;
    let mut data = lock(&state.data);
    let testimonial = data
        .testimonials
        .iter_mut()
        .find(|t| t.id.as_str() == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Testimonial not found"))?;
    testimonial.status = TestimonialStatus::Approved;
    ok_message("Testimonial approved")
}

async fn delete_testimonial(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    require_admin(&headers)?;
    let mut data = lock(&state.data);
    let before = data.testimonials.len();
    data.testimonials.retain(|t| t.id.as_str() != id);
    if data.testimonials.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Testimonial not found"));
    }
    ok_message("Testimonial deleted")
}

async fn contact(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let blank = ["name", "email", "message"].iter().any(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .is_none_or(|v| v.trim().is_empty())
    });
    if blank {
        // The live API reports this with a 200 and success=false.
        return Json(json!({ "success": false, "error": "All fields are required." }))
            .into_response();
    }
    lock(&state.data).contacts.push(body);
    Json(json!({ "success": true })).into_response()
}
