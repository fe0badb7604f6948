//! RSN (product SKU) generation.
//!
//! An RSN is eight characters:
//!
//! ```text
//! [category][gender][type][material][sequence x4]
//!     4        0      0       0        0001      => "40000001"
//! ```
//!
//! The sequence counts up per (category, type) bucket. Material is always
//! `0` for anti-tarnish pieces.
//!
//! Generation reads a snapshot of the existing catalog and picks the next
//! free sequence. Two admins generating against the same snapshot will get
//! the same RSN; nothing here (or in the API) prevents that.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Category, Gender, Material, Product, ProductType};

/// Number of digits in the sequence suffix.
pub const SEQUENCE_WIDTH: usize = 4;

/// Largest sequence that fits in [`SEQUENCE_WIDTH`] digits.
pub const MAX_SEQUENCE: u16 = 9999;

/// Errors produced while generating an RSN.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RsnError {
    /// The bucket already uses sequence 9999.
    #[error("no sequence numbers left for category code {category} and type code {product_type}")]
    SequenceExhausted { category: char, product_type: char },
}

/// A product SKU code.
///
/// RSNs read from the API are kept verbatim, even when malformed, so a
/// single bad record never breaks a catalog listing. Generated RSNs are
/// always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rsn(String);

impl Rsn {
    /// Wrap an RSN read from elsewhere.
    #[must_use]
    pub fn new(rsn: impl Into<String>) -> Self {
        Self(rsn.into())
    }

    /// The RSN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing sequence number, if the last four characters are digits.
    #[must_use]
    pub fn sequence(&self) -> Option<u16> {
        let start = self.0.len().checked_sub(SEQUENCE_WIDTH)?;
        let tail = self.0.get(start..)?;
        if !tail.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        tail.parse().ok()
    }
}

impl fmt::Display for Rsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map a category to its RSN code. Unknown categories map to `'0'`.
#[must_use]
pub fn category_code(category: &Category) -> char {
    match category {
        Category::Earrings => '1',
        Category::BanglesBracelets => '2',
        Category::Necklaces => '3',
        Category::Rings => '4',
        Category::Other(_) => '0',
    }
}

/// Material code for an RSN; anti-tarnish pieces always use `'0'`.
#[must_use]
pub const fn material_code(product_type: ProductType, material: Material) -> char {
    match product_type {
        ProductType::AntiTarnish => '0',
        ProductType::Jewelry => material.code(),
    }
}

/// Next free sequence in the (category code, type code) bucket.
///
/// Products without an RSN, or whose RSN does not end in four digits, are
/// ignored. An empty bucket starts at 1.
///
/// # Errors
///
/// Returns [`RsnError::SequenceExhausted`] when the bucket already holds
/// sequence 9999.
pub fn next_sequence(
    category: char,
    product_type: char,
    existing: &[Product],
) -> Result<u16, RsnError> {
    let max = existing
        .iter()
        .filter(|p| {
            category_code(&p.category) == category && p.product_type.code() == product_type
        })
        .filter_map(|p| p.rsn.as_ref().and_then(Rsn::sequence))
        .max()
        .unwrap_or(0);

    if max >= MAX_SEQUENCE {
        return Err(RsnError::SequenceExhausted {
            category,
            product_type,
        });
    }
    Ok(max + 1)
}

/// Format a sequence as the zero-padded RSN suffix.
#[must_use]
pub fn format_sequence(sequence: u16) -> String {
    format!("{sequence:0width$}", width = SEQUENCE_WIDTH)
}

/// The selections on the admin product form that determine an RSN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsnSelection {
    pub category: Category,
    pub gender: Gender,
    pub product_type: ProductType,
    pub material: Material,
}

impl RsnSelection {
    /// The four-character prefix before the sequence.
    #[must_use]
    pub fn prefix(&self) -> String {
        [
            category_code(&self.category),
            self.gender.code(),
            self.product_type.code(),
            material_code(self.product_type, self.material),
        ]
        .into_iter()
        .collect()
    }

    /// Generate the RSN for this selection against a catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RsnError::SequenceExhausted`] when the bucket is full.
    pub fn generate(&self, existing: &[Product]) -> Result<Rsn, RsnError> {
        let sequence = next_sequence(
            category_code(&self.category),
            self.product_type.code(),
            existing,
        )?;
        Ok(Rsn(format!("{}{}", self.prefix(), format_sequence(sequence))))
    }
}

impl From<&Product> for RsnSelection {
    fn from(product: &Product) -> Self {
        Self {
            category: product.category.clone(),
            gender: product.gender,
            product_type: product.product_type,
            material: product.material,
        }
    }
}

/// Generate an RSN from form selections and a catalog snapshot.
///
/// # Errors
///
/// Returns [`RsnError::SequenceExhausted`] when the bucket is full.
pub fn generate_rsn(
    category: &Category,
    gender: Gender,
    product_type: ProductType,
    material: Material,
    existing: &[Product],
) -> Result<Rsn, RsnError> {
    RsnSelection {
        category: category.clone(),
        gender,
        product_type,
        material,
    }
    .generate(existing)
}
