//! # Shopping List Aggregation
//!
//! Merges every ingredient of every recipe in a meal plan into one list,
//! summing quantities per ingredient.
//!
//! Entries are grouped by normalized name. The first occurrence fixes the
//! entry's display name and unit; later occurrences in another unit are
//! converted through a small table (g/kg, ml/l, cup/tbsp/tsp to g) when a path
//! exists and added as raw numbers when none does. The raw addition is a known
//! approximation, not an error.
//!
//! ## Usage
//!
//! ```rust
//! use smart_pantry::ingredient_model::{Recipe, RecipeIngredient};
//! use smart_pantry::meal_plan::{Day, MealPlan, MealType};
//! use smart_pantry::shopping_list::build_shopping_list;
//!
//! let cake = Recipe::new("c", "Cake")
//!     .with_ingredient(RecipeIngredient::quantified("sugar", 1.0, "cup"));
//! let mut plan = MealPlan::new();
//! plan.add_recipe(Day::Monday, MealType::Snack, cake.clone());
//! plan.add_recipe(Day::Friday, MealType::Dinner, cake);
//!
//! let list = build_shopping_list(&plan);
//! assert_eq!(list.len(), 1);
//! assert_eq!(list[0].quantity, 2.0);
//! ```

use crate::config::ShoppingListConfig;
use crate::ingredient_model::{format_amount, Recipe};
use crate::meal_plan::{Day, MealPlan};
use crate::units::canonical_unit;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, trace};

/// Display text for entries without a usable total
pub const AS_NEEDED: &str = "as needed";

/// Fixed conversions between canonical units: (from, to, factor)
const UNIT_CONVERSIONS: &[(&str, &str, f64)] = &[
    ("g", "kg", 0.001),
    ("kg", "g", 1000.0),
    ("ml", "l", 0.001),
    ("l", "ml", 1000.0),
    // Approximate weights of common spoon and cup measures
    ("cup", "g", 240.0),
    ("tbsp", "g", 15.0),
    ("tsp", "g", 5.0),
];

/// One line of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    /// Name as first seen in the plan
    pub name: String,
    /// Total in `unit`; 0 when no occurrence carried a usable quantity
    pub quantity: f64,
    /// Unit as first seen in the plan
    pub unit: String,
}

impl ShoppingListEntry {
    /// "2 cup", or "as needed" when there is no usable total
    pub fn display_quantity(&self) -> String {
        if self.quantity <= 0.0 {
            return AS_NEEDED.to_string();
        }
        let amount = format_amount(self.quantity);
        let unit = self.unit.trim();
        if unit.is_empty() {
            amount
        } else {
            format!("{} {}", amount, unit)
        }
    }
}

impl fmt::Display for ShoppingListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.display_quantity())
    }
}

/// Convert a quantity between two units using the fixed table.
///
/// Returns `None` when no conversion path exists.
pub fn convert_unit(quantity: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    let from = canonical_unit(from_unit);
    let to = canonical_unit(to_unit);
    if from == to {
        return Some(quantity);
    }
    UNIT_CONVERSIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, factor)| quantity * factor)
}

/// Sort entries alphabetically by name, ignoring case
pub fn sort_by_name(entries: &mut [ShoppingListEntry]) {
    entries.sort_by_key(|entry| entry.name.to_lowercase());
}

/// Builds shopping lists from meal plans
#[derive(Debug, Clone, Default)]
pub struct ShoppingListAggregator {
    config: ShoppingListConfig,
}

impl ShoppingListAggregator {
    /// Create an aggregator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with a custom configuration
    pub fn with_config(config: ShoppingListConfig) -> Self {
        Self { config }
    }

    /// Aggregate the whole week
    pub fn build(&self, meal_plan: &MealPlan) -> Vec<ShoppingListEntry> {
        let entries = self.aggregate(meal_plan.iter().map(|(_, _, recipe)| recipe));
        info!(
            "Built shopping list with {} entries from {} planned recipes",
            entries.len(),
            meal_plan.recipe_count()
        );
        entries
    }

    /// Aggregate only the given days
    pub fn build_for_days(&self, meal_plan: &MealPlan, days: &[Day]) -> Vec<ShoppingListEntry> {
        self.aggregate(
            meal_plan
                .iter()
                .filter(|(day, _, _)| days.contains(day))
                .map(|(_, _, recipe)| recipe),
        )
    }

    /// Aggregate the ingredients of a sequence of recipes. Entries come back
    /// in first-seen order.
    pub fn aggregate<'a, I>(&self, recipes: I) -> Vec<ShoppingListEntry>
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let normalization = self.config.name_normalization;
        let mut entries: Vec<ShoppingListEntry> = Vec::new();
        let mut index_by_key: HashMap<String, usize> = HashMap::new();

        for recipe in recipes {
            for ingredient in &recipe.ingredients {
                let line = ingredient.extract();
                let key = normalization.apply(line.name);
                if key.is_empty() {
                    trace!("Skipping unnamed ingredient in '{}'", recipe.title);
                    continue;
                }

                let amount = line.amount().unwrap_or(0.0);

                let Some(&index) = index_by_key.get(&key) else {
                    index_by_key.insert(key, entries.len());
                    entries.push(ShoppingListEntry {
                        name: line.name.trim().to_string(),
                        quantity: amount,
                        unit: line.unit.trim().to_string(),
                    });
                    continue;
                };

                let entry = &mut entries[index];
                let added = match convert_unit(amount, line.unit, &entry.unit) {
                    Some(converted) => converted,
                    None => {
                        debug!(
                            "No conversion from '{}' to '{}' for '{}', adding raw quantity",
                            line.unit, entry.unit, entry.name
                        );
                        amount
                    }
                };
                entry.quantity += added;
            }
        }

        entries
    }
}

/// Build a shopping list for a meal plan with the default configuration
pub fn build_shopping_list(meal_plan: &MealPlan) -> Vec<ShoppingListEntry> {
    ShoppingListAggregator::new().build(meal_plan)
}
