//! Product management with RSN assignment.
//!
//! New products get an RSN generated from the live catalog. Edits keep the
//! existing RSN unless a selection that feeds the prefix changed.

use std::cmp::Ordering;
use std::path::Path;

use everaura_core::{Material, Product, ProductId, ProductType, Rsn, RsnSelection};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use super::refused;
use crate::client::{AdminClient, ProductForm, ProductImage};
use crate::error::{AdminError, Result};

/// Everything the product form asks for except the RSN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub selection: RsnSelection,
    pub trending: bool,
    pub description: String,
}

impl ProductDraft {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AdminError::BadRequest(
                "Please enter a product name.".to_string(),
            ));
        }
        if self.price <= Decimal::ZERO {
            return Err(AdminError::BadRequest(
                "Price must be greater than 0.".to_string(),
            ));
        }
        Ok(())
    }

    fn into_form(self, rsn: Rsn) -> ProductForm {
        let material = match self.selection.product_type {
            ProductType::AntiTarnish => Material::AntiTarnish,
            ProductType::Jewelry => self.selection.material,
        };
        ProductForm {
            name: self.name.trim().to_string(),
            price: self.price,
            category: self.selection.category,
            trending: self.trending,
            rsn,
            material,
            gender: self.selection.gender,
            product_type: self.selection.product_type,
            description: self.description,
        }
    }
}

/// Order products for the admin table: by RSN, then products without one in
/// their original order.
pub fn sort_by_rsn(products: &mut [Product]) {
    products.sort_by(|a, b| match (&a.rsn, &b.rsn) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// The product's current RSN, if it is well-formed and already in the
/// bucket `selection` maps to.
fn reusable_rsn<'p>(current: &'p Product, selection: &RsnSelection) -> Option<&'p Rsn> {
    let prefix = selection.prefix();
    current.rsn.as_ref().filter(|rsn| {
        rsn.as_str().len() == prefix.len() + 4
            && rsn.as_str().starts_with(&prefix)
            && rsn.sequence().is_some()
    })
}

/// Admin product table and form.
pub struct ProductManager<'a> {
    client: &'a AdminClient,
}

impl<'a> ProductManager<'a> {
    #[must_use]
    pub const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every product, sorted for the admin table.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn list(&self) -> Result<Vec<Product>> {
        let mut products = self.client.list_products().await?;
        sort_by_rsn(&mut products);
        Ok(products)
    }

    /// Look up one product.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if no product has this id, or an API
    /// error.
    pub async fn get(&self, id: &ProductId) -> Result<Product> {
        self.client
            .list_products()
            .await?
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| AdminError::NotFound("Product".to_string()))
    }

    /// The RSN the form would submit for these selections.
    ///
    /// If the catalog cannot be fetched the preview starts the bucket at
    /// sequence `0001`.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Rsn` if the bucket has no sequence numbers left.
    #[instrument(skip(self))]
    pub async fn preview_rsn(&self, selection: &RsnSelection) -> Result<Rsn> {
        let existing = match self.client.list_products().await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "Failed to fetch products for article number");
                Vec::new()
            }
        };
        Ok(selection.generate(&existing)?)
    }

    /// Create a product, assigning it the previewed RSN.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::BadRequest` for an incomplete form or a refused
    /// product, `AdminError::Image` if the image cannot be read, or an API
    /// error.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: ProductDraft, image_path: &Path) -> Result<Rsn> {
        draft.validate()?;
        let image = read_image(image_path).await?;
        let rsn = self.preview_rsn(&draft.selection).await?;

        let form = draft.into_form(rsn.clone());
        self.client
            .create_product(&form, image)
            .await
            .map_err(|e| refused(e, "Failed to add product"))?;

        info!(%rsn, "Product added");
        Ok(rsn)
    }

    /// Update a product.
    ///
    /// The RSN is kept when the category, gender, type and material codes are
    /// unchanged. Otherwise a new one is generated in the new bucket, ignoring
    /// the product being edited.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if the product no longer exists,
    /// `AdminError::BadRequest` for an incomplete form or a refused update, or
    /// an API error.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: &ProductId, draft: ProductDraft) -> Result<Rsn> {
        draft.validate()?;
        let products = self.client.list_products().await?;
        let current = products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| AdminError::NotFound("Product".to_string()))?;

        let rsn = match reusable_rsn(current, &draft.selection) {
            Some(rsn) => rsn.clone(),
            None => {
                let others: Vec<Product> =
                    products.iter().filter(|p| &p.id != id).cloned().collect();
                draft.selection.generate(&others)?
            }
        };

        let form = draft.into_form(rsn.clone());
        self.client
            .update_product(id, &form)
            .await
            .map_err(|e| refused(e, "Failed to update product"))?;

        info!(%rsn, "Product updated");
        Ok(rsn)
    }

    /// Permanently delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ProductId) -> Result<()> {
        self.client
            .delete_product(id)
            .await
            .map_err(|e| refused(e, "Failed to delete product"))
    }
}

async fn read_image(path: &Path) -> Result<ProductImage> {
    let bytes = tokio::fs::read(path).await.map_err(|source| AdminError::Image {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());
    Ok(ProductImage::new(file_name, bytes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use everaura_core::{Category, Gender, Price};

    fn product(id: &str, rsn: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_string(),
            price: Price::from_paise(10_000),
            images: vec![],
            description: None,
            category: Category::Rings,
            gender: Gender::Her,
            product_type: ProductType::AntiTarnish,
            material: Material::AntiTarnish,
            trending: false,
            rsn: rsn.map(Rsn::new),
        }
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Solitaire".to_string(),
            price: Decimal::new(99_900, 2),
            selection: RsnSelection {
                category: Category::Rings,
                gender: Gender::Her,
                product_type: ProductType::AntiTarnish,
                material: Material::AntiTarnish,
            },
            trending: false,
            description: String::new(),
        }
    }

    #[test]
    fn test_sort_puts_missing_rsn_last_in_order() {
        let mut products = vec![
            product("a", None),
            product("b", Some("40000002")),
            product("c", None),
            product("d", Some("10000001")),
        ];
        sort_by_rsn(&mut products);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["d", "b", "a", "c"]);
    }

    #[test]
    fn test_draft_validation() {
        let mut blank = draft();
        blank.name = "  ".to_string();
        assert!(matches!(blank.validate(), Err(AdminError::BadRequest(_))));

        let mut free = draft();
        free.price = Decimal::ZERO;
        assert!(matches!(free.validate(), Err(AdminError::BadRequest(_))));

        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_form_trims_name() {
        let mut padded = draft();
        padded.name = " Solitaire ".to_string();
        let form = padded.into_form(Rsn::new("40000001"));
        assert_eq!(form.name, "Solitaire");
        assert_eq!(form.rsn.as_str(), "40000001");
    }

    #[test]
    fn test_anti_tarnish_forces_material() {
        let mut pearl = draft();
        pearl.selection.material = Material::Pearl;
        let form = pearl.clone().into_form(Rsn::new("40000001"));
        assert_eq!(form.material, Material::AntiTarnish);

        pearl.selection.product_type = ProductType::Jewelry;
        let form = pearl.into_form(Rsn::new("40170001"));
        assert_eq!(form.material, Material::Pearl);
    }

    #[test]
    fn test_edit_reuses_only_well_formed_rsn_in_bucket() {
        let selection = draft().selection;
        let current = product("a", Some("40000007"));
        assert_eq!(
            reusable_rsn(&current, &selection).map(Rsn::as_str),
            Some("40000007")
        );

        for stale in ["N/A", "4000", "4000ABCD", "400000071", "30000007"] {
            let legacy = product("a", Some(stale));
            assert!(reusable_rsn(&legacy, &selection).is_none(), "{stale}");
        }
        assert!(reusable_rsn(&product("a", None), &selection).is_none());
    }

    #[tokio::test]
    async fn test_missing_image_is_reported() {
        let err = read_image(Path::new("/nonexistent/ring.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Image { .. }));
    }
}
