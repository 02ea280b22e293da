//! # Unit Conversion Tables
//!
//! Fixed cooking-unit tables: volume units to millilitres and weight units to
//! grams. Any unit found in neither table is a *count* unit ("piece", "pinch",
//! "to taste", blank or unrecognized text) and its quantity is used as-is.

use crate::ingredient_model::QuantityValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Millilitres in one US cup, the reference volume of the density table
pub const ML_PER_CUP: f64 = 236.588;

/// Volume units and their size in millilitres
static VOLUME_TO_ML: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("tsp", 4.92892);
    map.insert("teaspoon", 4.92892);
    map.insert("teaspoons", 4.92892);
    map.insert("tbsp", 14.7868);
    map.insert("tablespoon", 14.7868);
    map.insert("tablespoons", 14.7868);
    map.insert("cup", ML_PER_CUP);
    map.insert("cups", ML_PER_CUP);
    map.insert("ml", 1.0);
    map.insert("milliliter", 1.0);
    map.insert("milliliters", 1.0);
    map.insert("millilitre", 1.0);
    map.insert("millilitres", 1.0);
    map.insert("l", 1000.0);
    map.insert("liter", 1000.0);
    map.insert("liters", 1000.0);
    map.insert("litre", 1000.0);
    map.insert("litres", 1000.0);
    map.insert("fl oz", 29.5735);
    map.insert("fluid ounce", 29.5735);
    map.insert("fluid ounces", 29.5735);
    map.insert("pint", 473.176);
    map.insert("pints", 473.176);
    map.insert("quart", 946.353);
    map.insert("quarts", 946.353);
    map.insert("gallon", 3785.41);
    map.insert("gallons", 3785.41);
    map
});

/// Weight units and their size in grams
static WEIGHT_TO_G: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("g", 1.0);
    map.insert("gram", 1.0);
    map.insert("grams", 1.0);
    map.insert("kg", 1000.0);
    map.insert("kilogram", 1000.0);
    map.insert("kilograms", 1000.0);
    map.insert("oz", 28.3495);
    map.insert("ounce", 28.3495);
    map.insert("ounces", 28.3495);
    map.insert("lb", 453.592);
    map.insert("lbs", 453.592);
    map.insert("pound", 453.592);
    map.insert("pounds", 453.592);
    map
});

/// Aliases and their short display form
static CANONICAL_UNITS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for alias in ["tsp", "teaspoon", "teaspoons"] {
        map.insert(alias, "tsp");
    }
    for alias in ["tbsp", "tablespoon", "tablespoons"] {
        map.insert(alias, "tbsp");
    }
    for alias in ["cup", "cups"] {
        map.insert(alias, "cup");
    }
    for alias in ["ml", "milliliter", "milliliters", "millilitre", "millilitres"] {
        map.insert(alias, "ml");
    }
    for alias in ["l", "liter", "liters", "litre", "litres"] {
        map.insert(alias, "l");
    }
    for alias in ["fl oz", "fluid ounce", "fluid ounces"] {
        map.insert(alias, "fl oz");
    }
    for alias in ["pint", "pints"] {
        map.insert(alias, "pint");
    }
    for alias in ["quart", "quarts"] {
        map.insert(alias, "quart");
    }
    for alias in ["gallon", "gallons"] {
        map.insert(alias, "gallon");
    }
    for alias in ["g", "gram", "grams"] {
        map.insert(alias, "g");
    }
    for alias in ["kg", "kilogram", "kilograms"] {
        map.insert(alias, "kg");
    }
    for alias in ["oz", "ounce", "ounces"] {
        map.insert(alias, "oz");
    }
    for alias in ["lb", "lbs", "pound", "pounds"] {
        map.insert(alias, "lb");
    }
    map
});

/// What a unit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    /// Base unit: millilitres
    Volume,
    /// Base unit: grams
    Weight,
    /// No conversion, the raw number is the value
    Count,
}

impl UnitType {
    /// Short name of the base unit
    pub fn base_unit(&self) -> &'static str {
        match self {
            UnitType::Volume => "ml",
            UnitType::Weight => "g",
            UnitType::Count => "",
        }
    }
}

/// A quantity expressed in its base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseQuantity {
    pub value: f64,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
}

fn lookup_key(unit: &str) -> String {
    unit.trim().to_lowercase()
}

/// Classify a unit. Volume is checked before weight.
pub fn unit_type(unit: &str) -> UnitType {
    let key = lookup_key(unit);
    if VOLUME_TO_ML.contains_key(key.as_str()) {
        UnitType::Volume
    } else if WEIGHT_TO_G.contains_key(key.as_str()) {
        UnitType::Weight
    } else {
        UnitType::Count
    }
}

/// Whether the unit appears in either conversion table
pub fn is_convertible_unit(unit: &str) -> bool {
    unit_type(unit) != UnitType::Count
}

/// Convert a recorded quantity into its base unit.
///
/// A missing or non-numeric quantity reads as 0.
pub fn convert_to_base_unit(quantity: Option<&QuantityValue>, unit: &str) -> BaseQuantity {
    let value = quantity.and_then(QuantityValue::parse).unwrap_or(0.0);
    convert_amount_to_base_unit(value, unit)
}

/// Convert an already-parsed amount into its base unit
pub fn convert_amount_to_base_unit(value: f64, unit: &str) -> BaseQuantity {
    let key = lookup_key(unit);
    if let Some(factor) = VOLUME_TO_ML.get(key.as_str()) {
        return BaseQuantity {
            value: value * factor,
            unit_type: UnitType::Volume,
        };
    }
    if let Some(factor) = WEIGHT_TO_G.get(key.as_str()) {
        return BaseQuantity {
            value: value * factor,
            unit_type: UnitType::Weight,
        };
    }
    BaseQuantity {
        value,
        unit_type: UnitType::Count,
    }
}

/// Short form of a unit, used as a comparison key ("Cups" -> "cup").
/// Unknown units come back trimmed and lowercased.
pub fn canonical_unit(unit: &str) -> String {
    let key = lookup_key(unit);
    match CANONICAL_UNITS.get(key.as_str()) {
        Some(short) => short.to_string(),
        None => key,
    }
}
