//! Client-side state: cookies, durable storage and session storage.
//!
//! Mirrors what a browser gives the storefront:
//!
//! | Store   | Keys                                                  | Lifetime            |
//! |---------|-------------------------------------------------------|---------------------|
//! | cookie  | `cart`                                                | 7 days from last save |
//! | durable | `wishlist`, `selectedGender`, `jwtToken`, `everauraUser` | until cleared     |
//! | session | `appliedCoupon`                                       | one session         |
//!
//! Backends implement [`KeyValueStore`]; [`ClientStorage`] layers typed
//! accessors on top. Stored JSON that fails to parse is logged and read as
//! absent rather than failing the caller.

mod cookie;
mod file;
mod memory;

pub use cookie::{CART_COOKIE, CART_MAX_AGE_DAYS, Cookie};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use everaura_core::{Cart, Coupon, Gender, UserProfile, Wishlist};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Durable storage key for the wishlist.
pub const WISHLIST_KEY: &str = "wishlist";
/// Durable storage key for the shopper's gender preference.
pub const SELECTED_GENDER_KEY: &str = "selectedGender";
/// Durable storage key for the login token.
pub const AUTH_TOKEN_KEY: &str = "jwtToken";
/// Durable storage key for the cached user profile.
pub const USER_KEY: &str = "everauraUser";
/// Session storage key for the applied coupon.
pub const APPLIED_COUPON_KEY: &str = "appliedCoupon";

/// Errors from client-side storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("malformed cookie: {0}")]
    Cookie(String),
}

/// A string-to-string store with browser storage semantics.
///
/// Implementations are synchronous; the values involved are a few
/// kilobytes at most.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every value.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Typed access to the storefront's client-side state.
#[derive(Clone)]
pub struct ClientStorage {
    cookies: Arc<dyn KeyValueStore>,
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl ClientStorage {
    /// Build from explicit backends.
    #[must_use]
    pub fn new(
        cookies: Arc<dyn KeyValueStore>,
        durable: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            cookies,
            durable,
            session,
        }
    }

    /// Storage that disappears with the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    /// File-backed storage under `state_dir`:
    ///
    /// ```text
    /// state_dir/cookies.json
    /// state_dir/durable.json
    /// state_dir/sessions/<session_id>.json
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if an existing file cannot be read.
    pub fn open(state_dir: &Path, session_id: &str) -> Result<Self, StorageError> {
        Ok(Self::new(
            Arc::new(JsonFileStore::open(state_dir.join("cookies.json"))?),
            Arc::new(JsonFileStore::open(state_dir.join("durable.json"))?),
            Arc::new(JsonFileStore::open(
                state_dir.join("sessions").join(format!("{session_id}.json")),
            )?),
        ))
    }

    // =========================================================================
    // Cart (cookie)
    // =========================================================================

    /// The saved cart. Missing, expired or unreadable carts read as empty.
    ///
    /// # Errors
    ///
    /// Returns error if the cookie store cannot be read.
    pub fn cart(&self) -> Result<Cart, StorageError> {
        self.cart_at(Utc::now())
    }

    /// The saved cart as of `now`.
    ///
    /// # Errors
    ///
    /// Returns error if the cookie store cannot be read.
    pub fn cart_at(&self, now: DateTime<Utc>) -> Result<Cart, StorageError> {
        let Some(raw) = self.cookies.get(CART_COOKIE)? else {
            return Ok(Cart::new());
        };

        let cookie = match Cookie::parse(&raw) {
            Ok(cookie) => cookie,
            Err(e) => {
                warn!(error = %e, "Ignoring malformed cart cookie");
                return Ok(Cart::new());
            }
        };

        if cookie.is_expired(now) {
            return Ok(Cart::new());
        }

        Ok(parse_or_warn(CART_COOKIE, &cookie.value).unwrap_or_default())
    }

    /// Save the cart, pushing its expiry out to seven days from now.
    ///
    /// # Errors
    ///
    /// Returns error if the cookie store cannot be written.
    pub fn save_cart(&self, cart: &Cart) -> Result<(), StorageError> {
        self.save_cart_at(cart, Utc::now())
    }

    /// Save the cart as of `now`.
    ///
    /// # Errors
    ///
    /// Returns error if the cookie store cannot be written.
    pub fn save_cart_at(&self, cart: &Cart, now: DateTime<Utc>) -> Result<(), StorageError> {
        let json = serde_json::to_string(cart)?;
        self.cookies
            .set(CART_COOKIE, &Cookie::cart(&json, now).encode())
    }

    // =========================================================================
    // Coupon (session)
    // =========================================================================

    /// The coupon applied during this session.
    ///
    /// # Errors
    ///
    /// Returns error if session storage cannot be read.
    pub fn applied_coupon(&self) -> Result<Option<Coupon>, StorageError> {
        read_json(self.session.as_ref(), APPLIED_COUPON_KEY)
    }

    /// Set or clear the applied coupon.
    ///
    /// # Errors
    ///
    /// Returns error if session storage cannot be written.
    pub fn set_applied_coupon(&self, coupon: Option<&Coupon>) -> Result<(), StorageError> {
        match coupon {
            Some(coupon) => write_json(self.session.as_ref(), APPLIED_COUPON_KEY, coupon),
            None => self.session.remove(APPLIED_COUPON_KEY),
        }
    }

    /// Forget everything session-scoped, as closing the browser would.
    ///
    /// # Errors
    ///
    /// Returns error if session storage cannot be written.
    pub fn end_session(&self) -> Result<(), StorageError> {
        self.session.clear()
    }

    // =========================================================================
    // Durable storage
    // =========================================================================

    /// The saved wishlist.
    ///
    /// # Errors
    ///
    /// Returns error if durable storage cannot be read.
    pub fn wishlist(&self) -> Result<Wishlist, StorageError> {
        Ok(read_json(self.durable.as_ref(), WISHLIST_KEY)?.unwrap_or_default())
    }

    /// Save the wishlist.
    ///
    /// # Errors
    ///
    /// Returns error if durable storage cannot be written.
    pub fn save_wishlist(&self, wishlist: &Wishlist) -> Result<(), StorageError> {
        write_json(self.durable.as_ref(), WISHLIST_KEY, wishlist)
    }

    /// The shopper's gender preference. Defaults to [`Gender::Her`].
    ///
    /// # Errors
    ///
    /// Returns error if durable storage cannot be read.
    pub fn selected_gender(&self) -> Result<Gender, StorageError> {
        let stored = self.durable.get(SELECTED_GENDER_KEY)?;
        Ok(match stored.as_deref() {
            None => Gender::default(),
            Some(code) => code.parse().unwrap_or_else(|e| {
                warn!(value = %code, error = %e, "Ignoring unknown selectedGender");
                Gender::default()
            }),
        })
    }

    /// Persist the shopper's gender preference.
    ///
    /// # Errors
    ///
    /// Returns error if durable storage cannot be written.
    pub fn set_selected_gender(&self, gender: Gender) -> Result<(), StorageError> {
        self.durable
            .set(SELECTED_GENDER_KEY, &gender.code().to_string())
    }

    /// The login token, if logged in.
    ///
    /// # Errors
    ///
    /// Returns error if durable storage cannot be read.
    pub fn auth_token(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(self
            .durable
            .get(AUTH_TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }

    /// Persist the login token.
    ///
    /// # Errors
    ///
    /// Returns error if durable storage cannot be written.
    pub fn set_auth_token(&self, token: &SecretString) -> Result<(), StorageError> {
        self.durable.set(AUTH_TOKEN_KEY, token.expose_secret())
    }

    /// The cached profile of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns error if durable storage cannot be read.
    pub fn user(&self) -> Result<Option<UserProfile>, StorageError> {
        read_json(self.durable.as_ref(), USER_KEY)
    }

    /// Cache the logged-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns error if durable storage cannot be written.
    pub fn set_user(&self, user: &UserProfile) -> Result<(), StorageError> {
        write_json(self.durable.as_ref(), USER_KEY, user)
    }

    /// Remove the token and cached profile.
    ///
    /// # Errors
    ///
    /// Returns error if durable storage cannot be written.
    pub fn clear_login(&self) -> Result<(), StorageError> {
        self.durable.remove(AUTH_TOKEN_KEY)?;
        self.durable.remove(USER_KEY)
    }
}

fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    Ok(store
        .get(key)?
        .and_then(|raw| parse_or_warn(key, &raw)))
}

fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    store.set(key, &serde_json::to_string(value)?)
}

fn parse_or_warn<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    serde_json::from_str(raw)
        .inspect_err(|e| warn!(key, error = %e, "Ignoring unreadable stored value"))
        .ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use everaura_core::{Category, Material, Price, Product, ProductId, ProductType};
    use rust_decimal::Decimal;

    fn ring() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Ring".to_string(),
            price: Price::from_paise(19_999),
            images: vec!["img.jpg".to_string()],
            description: None,
            category: Category::Rings,
            gender: Gender::Her,
            product_type: ProductType::AntiTarnish,
            material: Material::AntiTarnish,
            trending: false,
            rsn: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_cart_roundtrip_through_cookie() {
        let storage = ClientStorage::in_memory();
        let mut cart = Cart::new();
        cart.add_item(&ring());
        cart.add_item(&ring());

        storage.save_cart_at(&cart, now()).unwrap();
        assert_eq!(storage.cart_at(now()).unwrap(), cart);
    }

    #[test]
    fn test_expired_cart_reads_empty() {
        let storage = ClientStorage::in_memory();
        let mut cart = Cart::new();
        cart.add_item(&ring());
        storage.save_cart_at(&cart, now()).unwrap();

        let later = now() + Duration::days(CART_MAX_AGE_DAYS) + Duration::seconds(1);
        assert!(storage.cart_at(later).unwrap().is_empty());
    }

    #[test]
    fn test_saving_refreshes_expiry() {
        let storage = ClientStorage::in_memory();
        let mut cart = Cart::new();
        cart.add_item(&ring());
        storage.save_cart_at(&cart, now()).unwrap();
        storage
            .save_cart_at(&cart, now() + Duration::days(5))
            .unwrap();

        assert!(!storage.cart_at(now() + Duration::days(10)).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_cart_reads_empty() {
        let cookies = Arc::new(MemoryStore::new());
        cookies.set(CART_COOKIE, "cart=%7Bnot-json; path=/").unwrap();
        let storage = ClientStorage::new(
            cookies,
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        );
        assert!(storage.cart_at(now()).unwrap().is_empty());
    }

    #[test]
    fn test_coupon_is_session_scoped() {
        let storage = ClientStorage::in_memory();
        let coupon = Coupon::new("SAVE10", Decimal::from(10));

        storage.set_applied_coupon(Some(&coupon)).unwrap();
        assert_eq!(storage.applied_coupon().unwrap(), Some(coupon));

        storage.set_selected_gender(Gender::Him).unwrap();
        storage.end_session().unwrap();
        assert_eq!(storage.applied_coupon().unwrap(), None);
        // Durable state survives the session
        assert_eq!(storage.selected_gender().unwrap(), Gender::Him);
    }

    #[test]
    fn test_selected_gender_defaults_to_her() {
        let storage = ClientStorage::in_memory();
        assert_eq!(storage.selected_gender().unwrap(), Gender::Her);
    }

    #[test]
    fn test_login_state() {
        let storage = ClientStorage::in_memory();
        assert!(storage.auth_token().unwrap().is_none());

        storage
            .set_auth_token(&SecretString::from("tok".to_string()))
            .unwrap();
        storage
            .set_user(&UserProfile {
                email: "asha@example.com".to_string(),
                ..UserProfile::default()
            })
            .unwrap();
        assert_eq!(
            storage.auth_token().unwrap().unwrap().expose_secret(),
            "tok"
        );

        storage.clear_login().unwrap();
        assert!(storage.auth_token().unwrap().is_none());
        assert!(storage.user().unwrap().is_none());
    }

    #[test]
    fn test_file_backed_layout() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ClientStorage::open(dir.path(), "tab-1").unwrap();
        storage
            .set_applied_coupon(Some(&Coupon::new("X", Decimal::from(5))))
            .unwrap();
        storage.save_wishlist(&Wishlist::new()).unwrap();

        assert!(dir.path().join("sessions").join("tab-1.json").exists());
        assert!(dir.path().join("durable.json").exists());

        // A different session does not see the coupon
        let other = ClientStorage::open(dir.path(), "tab-2").unwrap();
        assert!(other.applied_coupon().unwrap().is_none());
    }
}
