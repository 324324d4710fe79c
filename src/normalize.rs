//! Mapping from an upstream `product` object to a [`ProductRecord`].
//!
//! Pure functions over `serde_json::Value`; no I/O. The client feeds these
//! with decoded responses, and tests feed them fixtures directly.

use serde_json::{Map, Value};

use crate::config::{Variant, NAME_NOT_FOUND};
use crate::models::{ExtendedDetails, Grade, NovaGroup, NutrientTable, NutrientValue, ProductRecord};

/// Build the record for a product the upstream reported as found.
///
/// `product` is the `product` member of the API response. Missing members are
/// replaced with placeholders; nothing here can fail.
pub fn found(barcode: &str, product: &Value, variant: Variant) -> ProductRecord {
    let name = product
        .get("product_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NAME_NOT_FOUND)
        .to_string();

    let image = product
        .get("image_front_url")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let empty = Map::new();
    let nutriments = product
        .get("nutriments")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let (nutrients, details) = match variant {
        Variant::Basic => (
            NutrientTable::from_fn(variant, |key| {
                NutrientValue::from_raw(nutriments.get(key), false)
            }),
            None,
        ),
        Variant::Extended => (
            NutrientTable::from_fn(variant, |key| {
                let raw = nutriments
                    .get(&format!("{key}_100g"))
                    .or_else(|| nutriments.get(key));
                NutrientValue::from_raw(raw, true)
            }),
            Some(extended_details(product, nutriments)),
        ),
    };

    ProductRecord {
        barcode: barcode.to_string(),
        name,
        image,
        nutrients,
        details,
        error: false,
    }
}

fn extended_details(product: &Value, nutriments: &Map<String, Value>) -> ExtendedDetails {
    let nutrients_per_serving = NutrientTable::from_fn(Variant::Extended, |key| {
        NutrientValue::from_raw(nutriments.get(&format!("{key}_serving")), true)
    });

    let nutrient_levels = product
        .get("nutrient_levels")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let ingredients = product
        .get("ingredients")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.get("text").and_then(Value::as_str))
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(title_case)
                .collect()
        })
        .unwrap_or_default();

    let allergens = product
        .get("allergens")
        .and_then(Value::as_str)
        .map(split_allergens)
        .unwrap_or_default();

    ExtendedDetails {
        nutrients_per_serving,
        nutrient_levels,
        ingredients,
        allergens,
        nutri_score: Grade::from_raw(product.get("nutriscore_grade")),
        eco_score: Grade::from_raw(product.get("ecoscore_grade")),
        nova_group: NovaGroup::from_raw(product.get("nova_group")),
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A "word" starts at any letter that does not follow another letter, so
/// `"whole-grain OATS"` becomes `"Whole-Grain Oats"` and `"l'eau"` becomes
/// `"L'Eau"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Split the upstream allergen string (`"en:milk, en:nuts"`) into entries.
pub fn split_allergens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
