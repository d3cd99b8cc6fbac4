//! Product selection: chosen variant and colour, displayed price, and the
//! line item built from them.

use crate::cart::CartItem;
use crate::catalog::{Catalog, Variant};
use crate::effects::{EffectSlot, EffectToken};
use crate::engine::{CartEngine, CartView};
use crate::image::{Crossfade, ImageSelector};
use crate::persistence::CartStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub variant: Variant,
    pub color: String,
}

impl Selection {
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            variant: catalog.default_selection.variant,
            color: catalog.default_selection.color.clone(),
        }
    }
}

/// Render seam for the selectors, price and upgrade note.
pub trait SelectionView {
    /// Mark `variant` active; every other variant selector inactive.
    fn mark_variant(&mut self, variant: Variant);

    fn show_price(&mut self, price: u32, formatted: &str);

    fn show_upgrade_note(&mut self, visible: bool);

    /// Mark the swatch for `color` selected; every other swatch unselected.
    fn mark_color(&mut self, color: &str);
}

pub struct ProductSelection {
    selection: Selection,
    catalog: Catalog,
}

impl ProductSelection {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            selection: Selection::from_catalog(&catalog),
            catalog,
        }
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn price(&self) -> u32 {
        self.catalog.price_of(self.selection.variant)
    }

    /// Paint the whole selection state, e.g. on page load.
    pub fn sync<V: SelectionView>(&self, view: &mut V) {
        self.paint_variant(view);
        view.mark_color(&self.selection.color);
    }

    pub fn set_variant<V: SelectionView>(&mut self, variant: Variant, view: &mut V) {
        self.selection.variant = variant;
        self.paint_variant(view);
    }

    /// Select a colour. Unknown colours leave the selection untouched.
    pub fn set_color<V: SelectionView>(
        &mut self,
        color: &str,
        view: &mut V,
        images: &mut ImageSelector,
    ) -> Option<Crossfade> {
        if self.catalog.color(color).is_none() {
            log::debug!("ignoring unknown colour {color}");
            return None;
        }
        self.selection.color = color.to_string();
        view.mark_color(color);
        images.set_image(color, &self.catalog)
    }

    #[must_use]
    pub fn line_item(&self) -> CartItem {
        CartItem::new(
            self.selection.variant,
            self.selection.color.clone(),
            self.price(),
            1,
        )
    }

    /// Add one of the current selection and start the confirmation effect.
    /// The returned token supersedes any confirmation still pending.
    pub fn add_current_selection_to_cart<S: CartStore, V: CartView>(
        &self,
        engine: &mut CartEngine<S>,
        view: &mut V,
        confirmation: &mut EffectSlot,
    ) -> EffectToken {
        engine.add_item(self.line_item(), view);
        confirmation.begin()
    }

    fn paint_variant<V: SelectionView>(&self, view: &mut V) {
        let variant = self.selection.variant;
        let price = self.price();
        view.mark_variant(variant);
        view.show_price(price, &self.catalog.format_price(u64::from(price)));
        view.show_upgrade_note(variant == Variant::Standard);
    }
}
