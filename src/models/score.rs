use std::fmt;

use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::config::NOT_AVAILABLE;

/// Grade strings the upstream uses to mean "no grade".
const GRADE_SENTINELS: &[&str] = &["unknown", "not-applicable"];

// ---------------------------------------------------------------------------
// Grade — Nutri-Score / Eco-Score letter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grade {
    /// Upper-cased grade, e.g. `"A"` or `"A-PLUS"`.
    Letter(String),
    NotAvailable,
}

impl Grade {
    pub fn from_raw(raw: Option<&Value>) -> Self {
        let Some(s) = raw.and_then(Value::as_str).map(str::trim) else {
            return Grade::NotAvailable;
        };
        if s.is_empty() || GRADE_SENTINELS.iter().any(|g| s.eq_ignore_ascii_case(g)) {
            return Grade::NotAvailable;
        }
        Grade::Letter(s.to_uppercase())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Letter(g) => f.write_str(g),
            Grade::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Grade::Letter(g) => serializer.serialize_str(g),
            Grade::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

// ---------------------------------------------------------------------------
// NovaGroup — Food processing classification (1..=4)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NovaGroup {
    Group(u8),
    NotAvailable,
}

impl NovaGroup {
    /// Parse an upstream `nova_group`.
    ///
    /// Integers (or integer strings) in 1..=4 are groups. Zero, out-of-range
    /// and fractional values are treated as absent.
    pub fn from_raw(raw: Option<&Value>) -> Self {
        let n = match raw {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        match n {
            Some(g @ 1..=4) => NovaGroup::Group(g as u8),
            _ => NovaGroup::NotAvailable,
        }
    }
}

impl fmt::Display for NovaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NovaGroup::Group(g) => write!(f, "{g}"),
            NovaGroup::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for NovaGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NovaGroup::Group(g) => serializer.serialize_u8(*g),
            NovaGroup::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}
