use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::config::{Variant, NOT_AVAILABLE};

// ---------------------------------------------------------------------------
// NutrientValue — A single nutriment figure or the placeholder
// ---------------------------------------------------------------------------

/// One cell of a nutrient table.
///
/// Serializes as a JSON number, or as the string `"Not available"`.
#[derive(Debug, Clone, PartialEq)]
pub enum NutrientValue {
    /// Value as reported upstream.
    Amount(f64),
    /// Value rounded to the nearest integer (half away from zero).
    Whole(i64),
    NotAvailable,
}

impl NutrientValue {
    /// Interpret a raw nutriment entry.
    ///
    /// JSON numbers and numeric strings count as present; anything else
    /// (missing, null, non-numeric text, non-finite) becomes the placeholder.
    pub fn from_raw(raw: Option<&Value>, round: bool) -> Self {
        let number = match raw {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match number {
            Some(v) if v.is_finite() => {
                if round {
                    NutrientValue::Whole(v.round() as i64)
                } else {
                    NutrientValue::Amount(v)
                }
            }
            _ => NutrientValue::NotAvailable,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, NutrientValue::NotAvailable)
    }
}

impl fmt::Display for NutrientValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutrientValue::Amount(v) => write!(f, "{v}"),
            NutrientValue::Whole(v) => write!(f, "{v}"),
            NutrientValue::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for NutrientValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NutrientValue::Amount(v) => serializer.serialize_f64(*v),
            NutrientValue::Whole(v) => serializer.serialize_i64(*v),
            NutrientValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

// ---------------------------------------------------------------------------
// NutrientTable — Ordered label -> value mapping
// ---------------------------------------------------------------------------

/// Ordered mapping from display label to value.
///
/// Always holds exactly the labels of the variant it was built for, in table
/// order. Serializes as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientTable {
    entries: Vec<(&'static str, NutrientValue)>,
}

impl NutrientTable {
    /// Every label of `variant` mapped to the placeholder.
    pub fn unavailable(variant: Variant) -> Self {
        Self {
            entries: variant
                .nutrient_keys()
                .iter()
                .map(|(_, label)| (*label, NutrientValue::NotAvailable))
                .collect(),
        }
    }

    /// Build a table by resolving each upstream key through `resolve`.
    pub fn from_fn<F>(variant: Variant, mut resolve: F) -> Self
    where
        F: FnMut(&str) -> NutrientValue,
    {
        Self {
            entries: variant
                .nutrient_keys()
                .iter()
                .map(|(key, label)| (*label, resolve(*key)))
                .collect(),
        }
    }

    pub fn get(&self, label: &str) -> Option<&NutrientValue> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(l, _)| *l).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &NutrientValue)> {
        self.entries.iter().map(|(l, v)| (*l, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for NutrientTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
