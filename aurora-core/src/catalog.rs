//! Product catalog: variant prices, colour imagery and page timings
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const DEFAULT_CATALOG_DATA: &str =
    include_str!("../../aurora-web/static/assets/data/catalog.json");

/// Product tier offered on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Standard,
    Pro,
}

impl Variant {
    pub const ALL: [Self; 2] = [Self::Standard, Self::Pro];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Pro => "pro",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.key() == key)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub id: Variant,
    pub label: String,
    /// Whole currency units
    pub price: u32,
    #[serde(default)]
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub swatch: String,
    /// Image resource relative to the asset base path
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    #[serde(default = "default_crossfade_ms")]
    pub crossfade_ms: u32,
    #[serde(default = "default_confirm_ms")]
    pub confirm_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            crossfade_ms: default_crossfade_ms(),
            confirm_ms: default_confirm_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSelection {
    pub variant: Variant,
    pub color: String,
}

impl Default for DefaultSelection {
    fn default() -> Self {
        Self {
            variant: Variant::Standard,
            color: String::from("matte-black"),
        }
    }
}

/// Read-only page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub product_name: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub default_selection: DefaultSelection,
    pub variants: Vec<VariantSpec>,
    pub colors: Vec<ColorSpec>,
    #[serde(default)]
    pub timings: Timings,
}

impl Default for Catalog {
    fn default() -> Self {
        let color = |id: &str, label: &str, swatch: &str| ColorSpec {
            id: id.to_string(),
            label: label.to_string(),
            swatch: swatch.to_string(),
            image: format!("static/img/aurora-{id}.webp"),
        };
        Self {
            product_name: String::from("Aurora"),
            currency_symbol: default_currency_symbol(),
            storage_key: default_storage_key(),
            default_selection: DefaultSelection::default(),
            variants: vec![
                VariantSpec {
                    id: Variant::Standard,
                    label: String::from("Aurora"),
                    price: 149,
                    tagline: String::new(),
                },
                VariantSpec {
                    id: Variant::Pro,
                    label: String::from("Aurora Pro"),
                    price: 199,
                    tagline: String::new(),
                },
            ],
            colors: vec![
                color("matte-black", "Matte Black", "#1d1d1f"),
                color("glacier-white", "Glacier White", "#f2f4f5"),
                color("ember-red", "Ember Red", "#b3261e"),
            ],
            timings: Timings::default(),
        }
    }
}

impl Catalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CATALOG_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn variant(&self, variant: Variant) -> Option<&VariantSpec> {
        self.variants.iter().find(|spec| spec.id == variant)
    }

    /// Price for a variant; zero when the catalog does not list it.
    #[must_use]
    pub fn price_of(&self, variant: Variant) -> u32 {
        self.variant(variant).map_or(0, |spec| spec.price)
    }

    #[must_use]
    pub fn variant_label(&self, variant: Variant) -> String {
        self.variant(variant)
            .map_or_else(|| variant.key().to_string(), |spec| spec.label.clone())
    }

    #[must_use]
    pub fn color(&self, key: &str) -> Option<&ColorSpec> {
        self.colors.iter().find(|spec| spec.id == key)
    }

    #[must_use]
    pub fn color_label(&self, key: &str) -> String {
        self.color(key)
            .map_or_else(|| key.to_string(), |spec| spec.label.clone())
    }

    #[must_use]
    pub fn image_for(&self, key: &str) -> Option<&str> {
        self.color(key).map(|spec| spec.image.as_str())
    }

    /// Format whole currency units, e.g. `$1,299`.
    #[must_use]
    pub fn format_price(&self, amount: u64) -> String {
        let digits = amount.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{}{grouped}", self.currency_symbol)
    }
}

fn default_currency_symbol() -> String {
    String::from("$")
}

fn default_storage_key() -> String {
    String::from("aurora.cart")
}

const fn default_crossfade_ms() -> u32 {
    200
}

const fn default_confirm_ms() -> u32 {
    1500
}
