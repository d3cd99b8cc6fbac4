//! `localStorage` backend for the persisted cart record
use aurora_core::{Cart, CartStore, StoreError};
use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};

/// Browser cart storage using localStorage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserCartStore;

fn map_error(err: StorageError) -> StoreError {
    match err {
        StorageError::SerdeError(err) => StoreError::Corrupt(err),
        StorageError::KeyNotFound(key) => StoreError::Unavailable(format!("missing key {key}")),
        StorageError::JsError(err) => StoreError::Unavailable(err.to_string()),
    }
}

fn ensure_available() -> Result<(), StoreError> {
    crate::dom::local_storage()
        .map(|_| ())
        .map_err(|err| StoreError::Unavailable(crate::dom::js_error_message(&err)))
}

impl CartStore for BrowserCartStore {
    type Error = StoreError;

    fn read(&self, key: &str) -> Result<Option<Cart>, Self::Error> {
        ensure_available()?;
        match LocalStorage::get::<Cart>(key) {
            Ok(cart) => Ok(Some(cart)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(map_error(err)),
        }
    }

    fn write(&mut self, key: &str, cart: &Cart) -> Result<(), Self::Error> {
        ensure_available()?;
        LocalStorage::set(key, cart).map_err(map_error)
    }
}
