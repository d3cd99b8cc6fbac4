use aurora_core::{Cart, CartItem, CartRecord, CartStore, Variant};
use aurora_web::storage::BrowserCartStore;
use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen_test::*;

const KEY: &str = "aurora.cart.test";

#[wasm_bindgen_test]
fn browser_store_round_trips() {
    LocalStorage::delete(KEY);
    let mut store = BrowserCartStore;
    assert_eq!(store.read(KEY).expect("readable"), None);

    let mut cart = Cart::new();
    cart.merge_item(CartItem::new(Variant::Pro, "glacier-white", 199, 2));
    store.write(KEY, &cart).expect("writable");
    assert_eq!(store.read(KEY).expect("readable"), Some(cart));
    LocalStorage::delete(KEY);
}

#[wasm_bindgen_test]
fn corrupted_record_loads_as_empty_cart() {
    LocalStorage::raw()
        .set_item(KEY, "{not json")
        .expect("raw write");
    assert!(BrowserCartStore.read(KEY).is_err());
    let record = CartRecord::new(BrowserCartStore, KEY);
    assert!(record.load().is_empty());
    LocalStorage::delete(KEY);
}
