//! Cart engine: load-mutate-save over the persisted record

use crate::cart::{Cart, CartItem};
use crate::catalog::Catalog;
use crate::persistence::{CartRecord, CartStore};
use serde::Serialize;

pub use crate::cart::{count, total};

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRow {
    pub id: String,
    pub variant_label: String,
    pub color_label: String,
    pub qty: u32,
    pub unit_price: String,
    pub line_total: String,
    /// `"2 × $149"`
    pub summary: String,
}

/// Plain-data view of the cart handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub rows: Vec<CartRow>,
    pub total: u64,
    pub count: u64,
    pub formatted_total: String,
}

impl CartSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render seam for the cart panel and count badge.
pub trait CartView {
    fn render_cart(&mut self, snapshot: &CartSnapshot);

    fn show_count(&mut self, count: u64);

    /// Polite status message for assistive technology.
    fn announce(&mut self, message: &str) {
        let _ = message;
    }
}

/// Outcome of the simulated checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkout {
    Empty,
    Simulated { count: u64, total: u64 },
}

pub struct CartEngine<S: CartStore> {
    record: CartRecord<S>,
    catalog: Catalog,
}

impl<S: CartStore> CartEngine<S> {
    /// Build an engine persisting under the catalog's storage key.
    pub fn new(store: S, catalog: Catalog) -> Self {
        let record = CartRecord::new(store, catalog.storage_key.clone());
        Self { record, catalog }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn record(&self) -> &CartRecord<S> {
        &self.record
    }

    #[must_use]
    pub fn load(&self) -> Cart {
        self.record.load()
    }

    pub fn save(&mut self, cart: &Cart) {
        self.record.save(cart);
    }

    pub fn add_item<V: CartView>(&mut self, item: CartItem, view: &mut V) {
        let mut cart = self.load();
        let id = item.id.clone();
        let qty = cart.merge_item(item);
        self.save(&cart);
        log::debug!("cart line {id} now at qty {qty}");
        view.show_count(cart.count());
    }

    pub fn remove_item<V: CartView>(&mut self, id: &str, view: &mut V) {
        let mut cart = self.load();
        if cart.remove_line(id) {
            self.save(&cart);
            log::debug!("removed cart line {id}");
        }
        self.render_cart(&cart, view);
    }

    /// Recompute the cart view from the persisted record.
    pub fn render_view<V: CartView>(&self, view: &mut V) {
        let cart = self.load();
        self.render_cart(&cart, view);
    }

    #[must_use]
    pub fn snapshot(&self, cart: &Cart) -> CartSnapshot {
        let rows = cart
            .items
            .iter()
            .map(|item| {
                let unit_price = self.catalog.format_price(u64::from(item.price));
                CartRow {
                    id: item.id.clone(),
                    variant_label: self.catalog.variant_label(item.variant),
                    color_label: self.catalog.color_label(&item.color),
                    qty: item.qty,
                    summary: format!("{} × {unit_price}", item.qty),
                    unit_price,
                    line_total: self.catalog.format_price(item.line_total()),
                }
            })
            .collect();
        let total = cart.total();
        CartSnapshot {
            rows,
            total,
            count: cart.count(),
            formatted_total: self.catalog.format_price(total),
        }
    }

    /// Simulated checkout; the cart is left untouched.
    pub fn checkout<V: CartView>(&self, view: &mut V) -> Checkout {
        let cart = self.load();
        if cart.is_empty() {
            view.announce("Your cart is empty.");
            return Checkout::Empty;
        }
        let count = cart.count();
        let total = cart.total();
        let noun = if count == 1 { "item" } else { "items" };
        view.announce(&format!(
            "Checkout is a demo: {count} {noun} totalling {}.",
            self.catalog.format_price(total)
        ));
        Checkout::Simulated { count, total }
    }

    fn render_cart<V: CartView>(&self, cart: &Cart, view: &mut V) {
        let snapshot = self.snapshot(cart);
        view.render_cart(&snapshot);
        view.show_count(snapshot.count);
    }
}
