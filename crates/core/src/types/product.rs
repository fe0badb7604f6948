//! Product catalog types.
//!
//! The remote API stores products as loosely-typed documents. These types
//! validate them at the boundary: gender is a string code, type and material
//! are numeric codes, and the trending flag is `"y"`/`"n"`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::ProductId;
use super::price::Price;
use crate::rsn::Rsn;

/// Image used when a product has no pictures.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/60x60?text=No+Img";

/// Errors produced when a product code is out of range.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductCodeError {
    /// Gender code was not `"0"` or `"1"`.
    #[error("unknown gender code: {0}")]
    Gender(String),
    /// Product type code was not 0 or 1.
    #[error("unknown product type code: {0}")]
    ProductType(String),
    /// Material code was outside 0..=7.
    #[error("unknown material code: {0}")]
    Material(String),
}

// =============================================================================
// Category
// =============================================================================

/// Main product category.
///
/// Names outside the fixed set are kept verbatim in [`Category::Other`] so
/// that products created by older tooling still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Earrings,
    BanglesBracelets,
    Necklaces,
    Rings,
    Other(String),
}

impl Category {
    /// The four categories offered in the admin form.
    pub const KNOWN: [Self; 4] = [
        Self::Necklaces,
        Self::Earrings,
        Self::Rings,
        Self::BanglesBracelets,
    ];

    /// The name stored by the API.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Earrings => "Earrings",
            Self::BanglesBracelets => "Bangles/Bracelets",
            Self::Necklaces => "Necklaces",
            Self::Rings => "Rings",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        match name {
            "Earrings" => Self::Earrings,
            "Bangles/Bracelets" => Self::BanglesBracelets,
            "Necklaces" => Self::Necklaces,
            "Rings" => Self::Rings,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl FromStr for Category {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name.as_str()))
    }
}

// =============================================================================
// Gender
// =============================================================================

/// Who the piece is designed for. Stored as the string `"0"` or `"1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Her,
    Him,
}

impl Gender {
    /// The single-character code used by the API and in RSNs.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Her => '0',
            Self::Him => '1',
        }
    }

    /// Label shown in listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Her => "Her",
            Self::Him => "Him",
        }
    }
}

impl FromStr for Gender {
    type Err = ProductCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Her),
            "1" => Ok(Self::Him),
            other => Err(ProductCodeError::Gender(other.to_owned())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = NumberOrString::deserialize(deserializer)?;
        code.as_string().parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Product type
// =============================================================================

/// Finish of the piece. Stored as the number 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductType {
    #[default]
    AntiTarnish,
    Jewelry,
}

impl ProductType {
    /// The single-character code used in RSNs and query strings.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::AntiTarnish => '0',
            Self::Jewelry => '1',
        }
    }

    /// Numeric value stored by the API.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::AntiTarnish => 0,
            Self::Jewelry => 1,
        }
    }

    /// Label shown in listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AntiTarnish => "Anti-Tarnish",
            Self::Jewelry => "Jewelry",
        }
    }
}

impl FromStr for ProductType {
    type Err = ProductCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::AntiTarnish),
            "1" => Ok(Self::Jewelry),
            other => Err(ProductCodeError::ProductType(other.to_owned())),
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for ProductType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for ProductType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = NumberOrString::deserialize(deserializer)?;
        code.as_string().parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Material
// =============================================================================

/// Material of a jewelry piece. Anti-tarnish pieces always use
/// [`Material::AntiTarnish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Material {
    #[default]
    AntiTarnish,
    Meenakari,
    Kundan,
    AmericanDiamond,
    Resin,
    Chandbali,
    Chanderi,
    Pearl,
}

impl Material {
    /// Every material, in code order.
    pub const ALL: [Self; 8] = [
        Self::AntiTarnish,
        Self::Meenakari,
        Self::Kundan,
        Self::AmericanDiamond,
        Self::Resin,
        Self::Chandbali,
        Self::Chanderi,
        Self::Pearl,
    ];

    /// Numeric value stored by the API.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::AntiTarnish => 0,
            Self::Meenakari => 1,
            Self::Kundan => 2,
            Self::AmericanDiamond => 3,
            Self::Resin => 4,
            Self::Chandbali => 5,
            Self::Chanderi => 6,
            Self::Pearl => 7,
        }
    }

    /// The single-character code used in RSNs.
    #[must_use]
    pub const fn code(self) -> char {
        (b'0' + self.as_u8()) as char
    }

    /// Label shown in the admin form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AntiTarnish => "Anti Tarnish",
            Self::Meenakari => "Meenakari",
            Self::Kundan => "Kundan",
            Self::AmericanDiamond => "American Diamond",
            Self::Resin => "Resin",
            Self::Chandbali => "Chandbali",
            Self::Chanderi => "Chanderi",
            Self::Pearl => "Pearl",
        }
    }
}

impl TryFrom<u8> for Material {
    type Error = ProductCodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| ProductCodeError::Material(value.to_string()))
    }
}

impl FromStr for Material {
    type Err = ProductCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| ProductCodeError::Material(s.to_owned()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Material {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Material {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = NumberOrString::deserialize(deserializer)?;
        code.as_string().parse().map_err(serde::de::Error::custom)
    }
}

/// Codes arrive as numbers from JSON bodies but as strings from form posts.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

impl NumberOrString {
    fn as_string(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
        }
    }
}

/// Serde adapter for the `"y"`/`"n"` trending flag.
pub mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize `true` as `"y"` and `false` as `"n"`.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "y" } else { "n" })
    }

    /// Anything other than `"y"` reads as `false`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let flag = Option::<String>::deserialize(deserializer)?;
        Ok(flag.is_some_and(|f| f.eq_ignore_ascii_case("y")))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as served by `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "type", default)]
    pub product_type: ProductType,
    #[serde(default)]
    pub material: Material,
    #[serde(rename = "isTrending", with = "yes_no", default)]
    pub trending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsn: Option<Rsn>,
}

impl Product {
    /// First image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// First image, falling back to the placeholder.
    #[must_use]
    pub fn primary_image_or_placeholder(&self) -> &str {
        self.primary_image().unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Description, or the text shown when there is none.
    #[must_use]
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description available.")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_api_document() {
        let json = r#"{
            "_id": "p1",
            "name": "Pearl Drop Earrings",
            "price": 499.5,
            "images": ["https://cdn.example.com/p1.jpg"],
            "description": "Freshwater pearls",
            "category": "Earrings",
            "gender": "0",
            "type": 1,
            "material": 7,
            "isTrending": "y",
            "rsn": "10170003"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.category, Category::Earrings);
        assert_eq!(product.gender, Gender::Her);
        assert_eq!(product.product_type, ProductType::Jewelry);
        assert_eq!(product.material, Material::Pearl);
        assert!(product.trending);
        assert_eq!(product.rsn.unwrap().as_str(), "10170003");
        assert_eq!(product.price, Price::from_paise(49_950));
    }

    #[test]
    fn test_product_defaults_for_missing_fields() {
        let json = r#"{"_id": "p2", "name": "Cuff", "price": 300, "category": "Anklets"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.category, Category::Other("Anklets".to_string()));
        assert_eq!(product.product_type, ProductType::AntiTarnish);
        assert_eq!(product.material, Material::AntiTarnish);
        assert!(!product.trending);
        assert!(product.rsn.is_none());
        assert_eq!(product.primary_image_or_placeholder(), PLACEHOLDER_IMAGE);
        assert_eq!(product.description_or_default(), "No description available.");
    }

    #[test]
    fn test_codes_accept_strings_from_forms() {
        let json = r#"{"_id": "p3", "name": "Kada", "price": "120.00", "category": "Bangles/Bracelets",
                       "gender": "1", "type": "1", "material": "2", "isTrending": "n"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.gender, Gender::Him);
        assert_eq!(product.product_type, ProductType::Jewelry);
        assert_eq!(product.material, Material::Kundan);
    }

    #[test]
    fn test_out_of_range_material_is_rejected() {
        let json = r#"{"_id": "p4", "name": "X", "price": 1, "category": "Rings", "material": 9}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_product_serializes_with_api_field_names() {
        let json = r#"{"_id": "p5", "name": "Band", "price": 99, "category": "Rings", "isTrending": "y"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["_id"], "p5");
        assert_eq!(value["type"], 0);
        assert_eq!(value["gender"], "0");
        assert_eq!(value["isTrending"], "y");
    }

    #[test]
    fn test_material_codes() {
        assert_eq!(Material::AntiTarnish.code(), '0');
        assert_eq!(Material::Pearl.code(), '7');
        assert_eq!(Material::try_from(3).unwrap(), Material::AmericanDiamond);
        assert!(Material::try_from(8).is_err());
    }
}
