//! Endpoint defaults, placeholder strings and the per-variant nutrient tables.

use std::time::Duration;

pub const API_BASE: &str = "https://world.openfoodfacts.net/api/v2";
pub const USER_AGENT: &str = concat!("openfoodfacts-lookup/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder used for every field the upstream did not supply.
pub const NOT_AVAILABLE: &str = "Not available";

pub const NAME_NOT_FOUND: &str = "Name not found";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const FETCH_FAILED: &str = "Error fetching data";

/// Which flavour of record a client produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Name, image and five unrounded nutrients.
    Basic,
    /// Rounded per-100g and per-serving nutrients plus scores, ingredients
    /// and allergens.
    #[default]
    Extended,
}

impl Variant {
    /// Upstream nutriment key and display label, in display order.
    pub fn nutrient_keys(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Variant::Basic => BASIC_NUTRIENTS,
            Variant::Extended => EXTENDED_NUTRIENTS,
        }
    }

    pub fn rounds(self) -> bool {
        matches!(self, Variant::Extended)
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Variant::Basic),
            "extended" => Ok(Variant::Extended),
            other => Err(format!("unknown variant '{other}' (expected basic or extended)")),
        }
    }
}

const BASIC_NUTRIENTS: &[(&str, &str)] = &[
    ("carbohydrates", "Carbohydrates"),
    ("proteins", "Proteins"),
    ("fat", "Fat"),
    ("sugars", "Sugars"),
    ("salt", "Salt"),
];

const EXTENDED_NUTRIENTS: &[(&str, &str)] = &[
    ("energy-kcal", "Energy (kcal)"),
    ("fat", "Fat"),
    ("saturated-fat", "Saturated Fat"),
    ("carbohydrates", "Carbohydrates"),
    ("sugars", "Sugars"),
    ("fiber", "Fiber"),
    ("proteins", "Protein"),
    ("salt", "Salt"),
    ("sodium", "Sodium"),
];

/// Barcodes shown when a batch request names none. All are known products.
pub fn default_barcodes() -> Vec<String> {
    ["3168930000020", "3017620422003", "3270190127512", "8000500037560"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
