use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{Variant, FETCH_FAILED, PRODUCT_NOT_FOUND};

use super::{Grade, NovaGroup, NutrientTable};

// ---------------------------------------------------------------------------
// ProductRecord — Normalized result of one barcode lookup
// ---------------------------------------------------------------------------

/// Render-ready view of one product.
///
/// Built fresh for every lookup. Failure outcomes are records too: they carry
/// a placeholder `name`, an empty `image`, fully defaulted nutrient tables and
/// `error = true`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub barcode: String,
    pub name: String,
    pub image: String,
    /// Per-100g values in the extended variant.
    pub nutrients: NutrientTable,
    /// Present for [`Variant::Extended`], including on failure.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub details: Option<ExtendedDetails>,
    pub error: bool,
}

// ---------------------------------------------------------------------------
// ExtendedDetails — Fields only the extended variant carries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedDetails {
    pub nutrients_per_serving: NutrientTable,
    /// Passed through from the upstream unchanged (e.g. `"fat": "low"`).
    pub nutrient_levels: Map<String, Value>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub nutri_score: Grade,
    pub eco_score: Grade,
    pub nova_group: NovaGroup,
}

impl ExtendedDetails {
    pub fn unavailable() -> Self {
        Self {
            nutrients_per_serving: NutrientTable::unavailable(Variant::Extended),
            nutrient_levels: Map::new(),
            ingredients: Vec::new(),
            allergens: Vec::new(),
            nutri_score: Grade::NotAvailable,
            eco_score: Grade::NotAvailable,
            nova_group: NovaGroup::NotAvailable,
        }
    }
}

impl ProductRecord {
    /// Record for a barcode the upstream says does not exist.
    pub fn not_found(barcode: &str, variant: Variant) -> Self {
        Self::placeholder(barcode, PRODUCT_NOT_FOUND, variant)
    }

    /// Record for a lookup whose request failed.
    pub fn fetch_failed(barcode: &str, variant: Variant) -> Self {
        Self::placeholder(barcode, FETCH_FAILED, variant)
    }

    fn placeholder(barcode: &str, name: &str, variant: Variant) -> Self {
        Self {
            barcode: barcode.to_string(),
            name: name.to_string(),
            image: String::new(),
            nutrients: NutrientTable::unavailable(variant),
            details: match variant {
                Variant::Basic => None,
                Variant::Extended => Some(ExtendedDetails::unavailable()),
            },
            error: true,
        }
    }

    /// The per-100g table. Alias of `nutrients`, named for the extended view.
    pub fn nutrients_per_100g(&self) -> &NutrientTable {
        &self.nutrients
    }

    pub fn nutrients_per_serving(&self) -> Option<&NutrientTable> {
        self.details.as_ref().map(|d| &d.nutrients_per_serving)
    }
}
