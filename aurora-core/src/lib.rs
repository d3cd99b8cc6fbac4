//! Aurora storefront core
//!
//! Platform-agnostic logic for the Aurora product page: the locally persisted
//! cart, the focus-trap state machine behind the cart panel and mobile
//! navigation, product selection and image crossfades. Rendering and storage
//! are reached through small traits so the web crate can plug in the DOM and
//! `localStorage`.

pub mod cart;
pub mod catalog;
pub mod effects;
pub mod engine;
pub mod focus_trap;
pub mod image;
pub mod persistence;
pub mod selection;

// Re-export commonly used types
pub use cart::{Cart, CartItem, count, line_id, total};
pub use catalog::{Catalog, ColorSpec, DefaultSelection, Timings, Variant, VariantSpec};
pub use effects::{EffectSlot, EffectToken};
pub use engine::{CartEngine, CartRow, CartSnapshot, CartView, Checkout};
pub use focus_trap::{
    FOCUSABLE_SELECTOR, FocusHost, FocusTrap, Key, KeyOutcome, KeyPress, PointerTarget,
    TrapOptions, is_rendered,
};
pub use image::{Crossfade, ImageSelector};
pub use persistence::{CartRecord, CartStore, MemoryCartStore, StoreError};
pub use selection::{ProductSelection, Selection, SelectionView};
