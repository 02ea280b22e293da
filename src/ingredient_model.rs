//! # Pantry and Recipe Data Model
//!
//! Plain records as the document store hands them over: pantry items, recipes
//! and their ingredient lists. Quantities and units are free text typed by
//! users, so every numeric read is tolerant.
//!
//! ## Core Concepts
//!
//! - **QuantityValue**: a quantity stored either as a number or as text
//! - **PantryItem**: something a user has recorded owning
//! - **RecipeIngredient**: either a bare name (legacy records) or a quantified entry
//! - **IngredientLine**: the single shape downstream code reads ingredients through
//!
//! ## Usage
//!
//! ```rust
//! use smart_pantry::ingredient_model::{PantryItem, Recipe, RecipeIngredient};
//!
//! let flour = PantryItem::new("flour").with_quantity(2.0, "cups");
//!
//! let bread = Recipe::new("r1", "Bread")
//!     .with_ingredient(RecipeIngredient::quantified("flour", 200.0, "g"))
//!     .with_ingredient(RecipeIngredient::name_only("salt"));
//!
//! assert_eq!(bread.ingredients.len(), 2);
//! assert_eq!(flour.amount(), Some(2.0));
//! ```

use crate::ingredient_parser::parse_amount;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Read a JSON `null` the same way as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A quantity as recorded: a JSON number or free text ("1/2", "2 large", "")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityValue {
    /// Numeric quantity
    Number(f64),
    /// Free-text quantity
    Text(String),
}

impl QuantityValue {
    /// Numeric reading of this quantity.
    ///
    /// Blank or unparsable text yields `None`, meaning "not recorded".
    pub fn parse(&self) -> Option<f64> {
        match self {
            QuantityValue::Number(value) if value.is_finite() => Some(*value),
            QuantityValue::Number(_) => None,
            QuantityValue::Text(text) => parse_amount(text),
        }
    }
}

impl From<f64> for QuantityValue {
    fn from(value: f64) -> Self {
        QuantityValue::Number(value)
    }
}

impl From<&str> for QuantityValue {
    fn from(text: &str) -> Self {
        QuantityValue::Text(text.to_string())
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityValue::Number(value) => write!(f, "{}", format_amount(*value)),
            QuantityValue::Text(text) => write!(f, "{}", text.trim()),
        }
    }
}

/// An ingredient a user has recorded owning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    /// Document id in the store, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The name of the ingredient (e.g., "flour", "whole milk")
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Recorded quantity, possibly blank
    #[serde(default)]
    pub quantity: Option<QuantityValue>,

    /// Recorded unit, possibly blank
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
}

impl PantryItem {
    /// Create a pantry item with just a name
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            quantity: None,
            unit: String::new(),
        }
    }

    /// Set the recorded quantity and unit
    pub fn with_quantity(mut self, quantity: impl Into<QuantityValue>, unit: &str) -> Self {
        self.quantity = Some(quantity.into());
        self.unit = unit.to_string();
        self
    }

    /// Set the document id
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Numeric quantity, if one is recorded
    pub fn amount(&self) -> Option<f64> {
        self.quantity.as_ref()?.parse()
    }
}

/// One entry of a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeIngredient {
    /// Legacy entry: a name with no quantity
    NameOnly(String),
    /// Entry with a quantity and unit
    Quantified {
        /// Ingredient name
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        /// Required quantity, possibly blank
        #[serde(default)]
        quantity: Option<QuantityValue>,
        /// Unit of the quantity, possibly blank
        #[serde(default, deserialize_with = "null_as_default")]
        unit: String,
    },
}

/// Borrowed view of a recipe ingredient with both shapes resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientLine<'a> {
    pub name: &'a str,
    pub quantity: Option<&'a QuantityValue>,
    pub unit: &'a str,
}

impl IngredientLine<'_> {
    /// Numeric quantity, if one is specified
    pub fn amount(&self) -> Option<f64> {
        self.quantity?.parse()
    }
}

impl RecipeIngredient {
    /// A name-only ingredient
    pub fn name_only(name: &str) -> Self {
        RecipeIngredient::NameOnly(name.to_string())
    }

    /// A quantified ingredient
    pub fn quantified(name: &str, quantity: impl Into<QuantityValue>, unit: &str) -> Self {
        RecipeIngredient::Quantified {
            name: name.to_string(),
            quantity: Some(quantity.into()),
            unit: unit.to_string(),
        }
    }

    /// Resolve either shape into one view. All matching and aggregation code
    /// reads ingredients through this.
    pub fn extract(&self) -> IngredientLine<'_> {
        match self {
            RecipeIngredient::NameOnly(name) => IngredientLine {
                name,
                quantity: None,
                unit: "",
            },
            RecipeIngredient::Quantified {
                name,
                quantity,
                unit,
            } => IngredientLine {
                name,
                quantity: quantity.as_ref(),
                unit,
            },
        }
    }

    /// The ingredient name
    pub fn name(&self) -> &str {
        self.extract().name
    }
}

/// A recipe as stored; only the ingredient list matters to matching and
/// aggregation, other fields ride along for display
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, alias = "name", deserialize_with = "null_as_default")]
    pub title: String,

    /// Ingredients in display order
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<RecipeIngredient>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Recipe {
    /// Create a recipe with no ingredients
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            ingredients: Vec::new(),
            category: None,
        }
    }

    /// Append an ingredient
    pub fn with_ingredient(mut self, ingredient: RecipeIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

/// Format an amount without a trailing ".0" and with at most two decimals
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        let rounded = format!("{:.2}", amount);
        rounded.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

impl fmt::Display for IngredientLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(quantity) = self.quantity {
            let quantity = quantity.to_string();
            if !quantity.is_empty() {
                write!(f, "{} ", quantity)?;
                if !self.unit.trim().is_empty() {
                    write!(f, "{} ", self.unit.trim())?;
                }
            }
        }
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for RecipeIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extract())
    }
}

impl fmt::Display for PantryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = IngredientLine {
            name: &self.name,
            quantity: self.quantity.as_ref(),
            unit: &self.unit,
        };
        write!(f, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_value_parsing() {
        assert_eq!(QuantityValue::Number(2.0).parse(), Some(2.0));
        assert_eq!(QuantityValue::Text("1/2".to_string()).parse(), Some(0.5));
        assert_eq!(QuantityValue::Text("".to_string()).parse(), None);
        assert_eq!(QuantityValue::Text("some".to_string()).parse(), None);
        assert_eq!(QuantityValue::Number(f64::NAN).parse(), None);
    }

    #[test]
    fn test_deserialize_both_ingredient_shapes() {
        let json = r#"[
            "salt",
            {"name": "flour", "quantity": "2", "unit": "cups"},
            {"name": "milk", "quantity": 250, "unit": "ml"},
            {"name": "pepper"}
        ]"#;
        let ingredients: Vec<RecipeIngredient> = serde_json::from_str(json).unwrap();

        assert_eq!(ingredients[0], RecipeIngredient::name_only("salt"));
        assert_eq!(ingredients[1].extract().amount(), Some(2.0));
        assert_eq!(ingredients[1].extract().unit, "cups");
        assert_eq!(ingredients[2].extract().amount(), Some(250.0));
        assert_eq!(ingredients[3].extract().quantity, None);
        assert_eq!(ingredients[3].name(), "pepper");
    }

    #[test]
    fn test_pantry_item_tolerates_missing_fields() {
        let json = r#"{"name": "eggs", "quantity": null}"#;
        let item: PantryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "eggs");
        assert_eq!(item.amount(), None);
        assert_eq!(item.unit, "");
    }

    #[test]
    fn test_recipe_defaults_and_alias() {
        let json = r#"{"id": "abc", "name": "Pancakes", "servings": 4}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.title, "Pancakes");
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.category, None);
    }

    #[test]
    fn test_optional_fields_serialize_only_when_set() {
        let bare = serde_json::to_value(PantryItem::new("rice")).unwrap();
        assert!(bare.get("id").is_none());

        let item = PantryItem::new("rice").with_id("p9");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "p9");

        let recipe = Recipe::new("r1", "Risotto").with_category("Dinner");
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["category"], "Dinner");
        assert!(serde_json::to_value(Recipe::new("r2", "Rice")).unwrap()["category"].is_null());
    }

    #[test]
    fn test_display_formatting() {
        let item = PantryItem::new("flour").with_quantity(2.0, "cups");
        assert_eq!(item.to_string(), "2 cups flour");

        let bare = RecipeIngredient::name_only("salt");
        assert_eq!(bare.to_string(), "salt");

        let counted = RecipeIngredient::quantified("eggs", "3", "");
        assert_eq!(counted.to_string(), "3 eggs");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(2.0), "2");
        assert_eq!(format_amount(1.5), "1.5");
        assert_eq!(format_amount(0.333333), "0.33");
    }
}
