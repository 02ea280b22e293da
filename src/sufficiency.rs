//! # Quantity Sufficiency Check
//!
//! Decides whether a pantry item covers the quantity a recipe asks for.
//!
//! ## Policy
//!
//! 1. Recipe gives no quantity: sufficient.
//! 2. Pantry quantity not recorded: not sufficient, status `Unknown`.
//! 3. Same unit type: compare base values directly.
//! 4. Weight against volume: convert the pantry amount through the ingredient
//!    density and compare.
//! 5. Anything else cannot be compared: status `Incomparable`, and the
//!    [`IncomparablePolicy`] decides the outcome (sufficient by default).
//!
//! Steps 2 and 5 are asymmetric: a missing pantry quantity is treated
//! conservatively while a missing conversion path is not. The default keeps
//! the established behaviour; `IncomparablePolicy::AssumeInsufficient` makes
//! both conservative.

use crate::config::IncomparablePolicy;
use crate::density;
use crate::ingredient_model::{format_amount, PantryItem, QuantityValue};
use crate::units::{self, UnitType};
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const NOTE_NO_QUANTITY: &str = "no quantity specified";
pub const NOTE_PANTRY_QUANTITY_UNKNOWN: &str = "pantry quantity not recorded";
pub const NOTE_INCOMPARABLE: &str = "units cannot be compared";

/// Outcome category of a sufficiency check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SufficiencyStatus {
    /// The pantry covers the requirement
    Sufficient,
    /// The pantry holds less than required
    Insufficient,
    /// The pantry item has no recorded quantity
    Unknown,
    /// The two quantities cannot be compared
    Incomparable,
}

/// Result of comparing a pantry item against a recipe requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sufficiency {
    pub enough: bool,
    pub status: SufficiencyStatus,
    /// Pantry amount as a percentage of the requirement. Not clamped: may
    /// exceed 100.
    pub percentage: Option<f64>,
    /// Whether a weight/volume density conversion was needed
    pub conversion_used: bool,
    /// Human-readable equivalent when a conversion was used, e.g. "2 cups ≈ 240 g"
    pub equivalent: Option<String>,
    pub note: Option<String>,
}

impl Sufficiency {
    fn without_comparison(enough: bool, status: SufficiencyStatus, note: &str) -> Self {
        Self {
            enough,
            status,
            percentage: None,
            conversion_used: false,
            equivalent: None,
            note: Some(note.to_string()),
        }
    }

    fn compared(pantry_value: f64, recipe_value: f64) -> Self {
        let enough = pantry_value >= recipe_value;
        Self {
            enough,
            status: if enough {
                SufficiencyStatus::Sufficient
            } else {
                SufficiencyStatus::Insufficient
            },
            percentage: Some(pantry_value / recipe_value * 100.0),
            conversion_used: false,
            equivalent: None,
            note: None,
        }
    }
}

/// Check a pantry item against a recipe requirement with the default policy
pub fn has_enough_quantity(
    pantry_item: &PantryItem,
    recipe_quantity: Option<&QuantityValue>,
    recipe_unit: &str,
    ingredient_name: &str,
) -> Sufficiency {
    check_sufficiency(
        pantry_item,
        recipe_quantity,
        recipe_unit,
        ingredient_name,
        IncomparablePolicy::default(),
    )
}

/// Check a pantry item against a recipe requirement
pub fn check_sufficiency(
    pantry_item: &PantryItem,
    recipe_quantity: Option<&QuantityValue>,
    recipe_unit: &str,
    ingredient_name: &str,
    policy: IncomparablePolicy,
) -> Sufficiency {
    let Some(recipe_amount) = recipe_quantity.and_then(QuantityValue::parse) else {
        return Sufficiency::without_comparison(
            true,
            SufficiencyStatus::Sufficient,
            NOTE_NO_QUANTITY,
        );
    };

    let Some(pantry_amount) = pantry_item.amount() else {
        return Sufficiency::without_comparison(
            false,
            SufficiencyStatus::Unknown,
            NOTE_PANTRY_QUANTITY_UNKNOWN,
        );
    };

    let recipe = units::convert_amount_to_base_unit(recipe_amount, recipe_unit);
    let pantry = units::convert_amount_to_base_unit(pantry_amount, &pantry_item.unit);

    if recipe.value <= 0.0 {
        // A zero requirement is no requirement
        return Sufficiency::without_comparison(
            true,
            SufficiencyStatus::Sufficient,
            NOTE_NO_QUANTITY,
        );
    }

    if recipe.unit_type == pantry.unit_type {
        let result = Sufficiency::compared(pantry.value, recipe.value);
        trace!(
            "'{}': {} {:?} vs {} required -> {:?}",
            ingredient_name,
            pantry.value,
            pantry.unit_type,
            recipe.value,
            result.status
        );
        return result;
    }

    let converted = density::convert_between(
        pantry.value,
        pantry.unit_type,
        recipe.unit_type,
        ingredient_name,
    )
    .or_else(|| {
        density::convert_between(
            pantry.value,
            pantry.unit_type,
            recipe.unit_type,
            &pantry_item.name,
        )
    });

    match converted {
        Some(pantry_in_recipe_type) => {
            let mut result = Sufficiency::compared(pantry_in_recipe_type, recipe.value);
            result.conversion_used = true;
            result.equivalent = Some(describe_equivalent(
                pantry_amount,
                &pantry_item.unit,
                pantry_in_recipe_type,
                recipe_unit,
                recipe.unit_type,
            ));
            trace!(
                "'{}': converted pantry amount via density -> {:?}",
                ingredient_name,
                result.equivalent
            );
            result
        }
        None => {
            let enough = policy == IncomparablePolicy::AssumeSufficient;
            trace!(
                "'{}': cannot compare {:?} with {:?}, enough={}",
                ingredient_name,
                pantry.unit_type,
                recipe.unit_type,
                enough
            );
            Sufficiency::without_comparison(
                enough,
                SufficiencyStatus::Incomparable,
                NOTE_INCOMPARABLE,
            )
        }
    }
}

/// "2 cups ≈ 240 g": the pantry amount restated in the recipe's unit
fn describe_equivalent(
    pantry_amount: f64,
    pantry_unit: &str,
    converted_base: f64,
    recipe_unit: &str,
    recipe_type: UnitType,
) -> String {
    let unit_size = units::convert_amount_to_base_unit(1.0, recipe_unit).value;
    let (amount, unit) = if unit_size > 0.0 {
        (converted_base / unit_size, recipe_unit.trim().to_string())
    } else {
        (converted_base, recipe_type.base_unit().to_string())
    };
    format!(
        "{} {} ≈ {} {}",
        format_amount(pantry_amount),
        pantry_unit.trim(),
        format_amount(amount),
        unit
    )
}
