//! Shopping cart line items
use crate::catalog::Variant;
use serde::{Deserialize, Serialize};

/// Deterministic line id so identical selections merge.
#[must_use]
pub fn line_id(variant: Variant, color: &str) -> String {
    format!("{}-{color}", variant.key())
}

/// A single line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub variant: Variant,
    pub color: String,
    /// Unit price in whole currency units
    pub price: u32,
    pub qty: u32,
}

impl CartItem {
    #[must_use]
    pub fn new(variant: Variant, color: impl Into<String>, price: u32, qty: u32) -> Self {
        let color = color.into();
        Self {
            id: line_id(variant, &color),
            variant,
            color,
            price,
            qty,
        }
    }

    #[must_use]
    pub fn line_total(&self) -> u64 {
        u64::from(self.price) * u64::from(self.qty)
    }
}

/// Shopping cart state, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create a new empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a line by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Merge an item into the cart.
    /// Returns the resulting quantity for that line (0 if nothing was added).
    pub fn merge_item(&mut self, item: CartItem) -> u32 {
        if item.qty == 0 {
            return self.find(&item.id).map_or(0, |line| line.qty);
        }
        if let Some(line) = self.find_mut(&item.id) {
            line.qty = line.qty.saturating_add(item.qty);
            line.qty
        } else {
            let qty = item.qty;
            self.items.push(item);
            qty
        }
    }

    /// Remove a line entirely. Returns whether anything was removed.
    pub fn remove_line(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// Restore the cart invariants on data read from outside: zero quantities
    /// are dropped and duplicate ids are folded into their first occurrence.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut cart = Self::new();
        for item in self.items {
            cart.merge_item(item);
        }
        cart
    }
}

#[must_use]
pub fn total(cart: &Cart) -> u64 {
    cart.total()
}

#[must_use]
pub fn count(cart: &Cart) -> u64 {
    cart.count()
}
