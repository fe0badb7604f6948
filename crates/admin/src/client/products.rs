//! Product management endpoints.

use chrono::Utc;
use everaura_core::types::product::yes_no;
use everaura_core::{Category, Gender, Material, Price, Product, ProductId, ProductType, Rsn};
use everaura_storefront::api::ApiError;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::instrument;

use super::AdminClient;

/// Fields of the admin product form.
///
/// Serializes to the JSON body of `PUT /products/:id`; [`ProductForm::to_multipart`]
/// builds the form body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductForm {
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: rust_decimal::Decimal,
    pub category: Category,
    #[serde(rename = "isTrending", with = "yes_no")]
    pub trending: bool,
    pub rsn: Rsn,
    pub material: Material,
    pub gender: Gender,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub description: String,
}

impl ProductForm {
    /// Prefill the form from an existing product, keeping its RSN.
    ///
    /// Returns `None` for products that predate RSNs.
    #[must_use]
    pub fn from_product(product: &Product) -> Option<Self> {
        Some(Self {
            name: product.name.clone(),
            price: product.price.amount(),
            category: product.category.clone(),
            trending: product.trending,
            rsn: product.rsn.clone()?,
            material: product.material,
            gender: product.gender,
            product_type: product.product_type,
            description: product.description.clone().unwrap_or_default(),
        })
    }

    /// Price as a [`Price`].
    #[must_use]
    pub const fn price(&self) -> Price {
        Price::new(self.price)
    }

    /// Multipart body for creating a product.
    ///
    /// `id` is the creation timestamp in epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the image MIME type is invalid.
    pub fn to_multipart(&self, id: i64, image: ProductImage) -> Result<Form, ApiError> {
        let mut image_part = Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(mime) = image.mime {
            image_part = image_part.mime_str(&mime)?;
        }

        Ok(Form::new()
            .text("id", id.to_string())
            .text("name", self.name.clone())
            .text("price", self.price.normalize().to_string())
            .text("category", self.category.name().to_string())
            .text("isTrending", if self.trending { "y" } else { "n" })
            .part("images", image_part)
            .text("rsn", self.rsn.to_string())
            .text("material", self.material.as_u8().to_string())
            .text("gender", self.gender.code().to_string())
            .text("type", self.product_type.as_u8().to_string())
            .text("description", self.description.clone()))
    }
}

/// Image uploaded with a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/jpeg`; guessed by the server when absent
    pub mime: Option<String>,
}

impl ProductImage {
    /// Image with a MIME type guessed from the file extension.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name).map(str::to_string);
        Self {
            file_name,
            bytes,
            mime,
        }
    }
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

impl AdminClient {
    /// Every product, uncached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.rest().endpoint(&["products"])?;
        let request = self.rest().request(Method::GET, url);
        self.rest().send_json(request).await
    }

    /// Create a product with its image.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the product or the request fails.
    #[instrument(skip(self, form, image), fields(name = %form.name, rsn = %form.rsn))]
    pub async fn create_product(
        &self,
        form: &ProductForm,
        image: ProductImage,
    ) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["products"])?;
        let body = form.to_multipart(Utc::now().timestamp_millis(), image)?;
        let request = self.rest().request(Method::POST, url).multipart(body);
        self.rest().send_empty(request).await
    }

    /// Replace a product's fields. The image is left as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the update or the request fails.
    #[instrument(skip(self, form), fields(rsn = %form.rsn))]
    pub async fn update_product(&self, id: &ProductId, form: &ProductForm) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["products", id.as_str()])?;
        let request = self.rest().request(Method::PUT, url).json(form);
        self.rest().send_empty(request).await
    }

    /// Permanently delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["products", id.as_str()])?;
        let request = self.rest().request(Method::DELETE, url);
        self.rest().send_empty(request).await
    }
}
