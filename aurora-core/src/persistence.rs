//! Persisted cart record
//!
//! The cart lives under a single key in a local key-value store and is
//! overwritten wholesale on every mutation. Reads never fail: a missing or
//! unreadable record degrades to an empty cart.

use crate::cart::Cart;
use std::collections::HashMap;
use thiserror::Error;

/// Key-value backend holding the serialized cart.
/// Platform-specific implementations should provide this
pub trait CartStore {
    type Error: std::error::Error + 'static;

    /// Read the cart stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record cannot be read or parsed.
    fn read(&self, key: &str) -> Result<Option<Cart>, Self::Error>;

    /// Overwrite the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn write(&mut self, key: &str, cart: &Cart) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Stored cart is malformed: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Owner of the persisted cart record.
pub struct CartRecord<S: CartStore> {
    store: S,
    key: String,
}

impl<S: CartStore> CartRecord<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the cart, falling back to an empty one.
    #[must_use]
    pub fn load(&self) -> Cart {
        match self.store.read(&self.key) {
            Ok(Some(cart)) => cart.normalized(),
            Ok(None) => Cart::new(),
            Err(err) => {
                log::warn!("discarding cart record {}: {err}", self.key);
                Cart::new()
            }
        }
    }

    /// Overwrite the persisted record. Failures are logged and dropped.
    pub fn save(&mut self, cart: &Cart) {
        if let Err(err) = self.store.write(&self.key, cart) {
            log::warn!("failed to persist cart record {}: {err}", self.key);
        }
    }
}

/// In-memory string store, used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw record, e.g. to simulate corrupted data.
    #[must_use]
    pub fn with_raw(mut self, key: &str, raw: &str) -> Self {
        self.entries.insert(key.to_string(), raw.to_string());
        self
    }

    /// A store whose reads and writes all fail.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl CartStore for MemoryCartStore {
    type Error = StoreError;

    fn read(&self, key: &str) -> Result<Option<Cart>, Self::Error> {
        if self.unavailable {
            return Err(StoreError::Unavailable(String::from("memory store disabled")));
        }
        self.entries
            .get(key)
            .map(|raw| serde_json::from_str(raw))
            .transpose()
            .map_err(StoreError::from)
    }

    fn write(&mut self, key: &str, cart: &Cart) -> Result<(), Self::Error> {
        if self.unavailable {
            return Err(StoreError::Unavailable(String::from("memory store disabled")));
        }
        let raw = serde_json::to_string(cart)?;
        self.entries.insert(key.to_string(), raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::catalog::Variant;

    const KEY: &str = "aurora.cart";

    #[test]
    fn missing_record_loads_empty() {
        let record = CartRecord::new(MemoryCartStore::new(), KEY);
        assert_eq!(record.load(), Cart::new());
    }

    #[test]
    fn save_then_load_returns_equal_cart() {
        let mut record = CartRecord::new(MemoryCartStore::new(), KEY);
        let mut cart = Cart::new();
        cart.merge_item(CartItem::new(Variant::Pro, "glacier-white", 199, 2));
        cart.merge_item(CartItem::new(Variant::Standard, "matte-black", 149, 1));
        record.save(&cart);
        assert_eq!(record.load(), cart);
    }

    #[test]
    fn corrupt_record_loads_empty() {
        for raw in ["{not json", "[]", r#"{"items": 3}"#, r#"{"items":[{"id":1}]}"#] {
            let record = CartRecord::new(MemoryCartStore::new().with_raw(KEY, raw), KEY);
            assert_eq!(record.load(), Cart::new(), "raw record {raw:?}");
        }
    }

    #[test]
    fn record_uses_expected_wire_shape() {
        let mut record = CartRecord::new(MemoryCartStore::new(), KEY);
        let mut cart = Cart::new();
        cart.merge_item(CartItem::new(Variant::Standard, "matte-black", 149, 1));
        record.save(&cart);
        let raw: serde_json::Value =
            serde_json::from_str(record.store().raw(KEY).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({
                "items": [{
                    "id": "standard-matte-black",
                    "variant": "standard",
                    "color": "matte-black",
                    "price": 149,
                    "qty": 1
                }]
            })
        );
    }

    #[test]
    fn unavailable_store_degrades_silently() {
        let mut record = CartRecord::new(MemoryCartStore::unavailable(), KEY);
        record.save(&Cart::new());
        assert!(record.load().is_empty());
    }
}
