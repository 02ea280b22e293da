//! # Record Ingestion
//!
//! Decodes pantry, recipe and meal-plan collections exported from the
//! document store (JSON) into typed records. Ingredient shapes are resolved
//! here, once, so the matcher and aggregator only ever see typed values.

use crate::errors::PantryError;
use crate::ingredient_model::{PantryItem, Recipe};
use crate::meal_plan::MealPlan;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

fn parse_collection<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, PantryError> {
    serde_json::from_str(json)
        .map_err(|e| PantryError::InvalidRecord(format!("{what}: {e}")))
}

fn read_file(path: &Path) -> Result<String, PantryError> {
    debug!("Reading records from {}", path.display());
    fs::read_to_string(path)
        .map_err(|e| PantryError::Io(format!("{}: {}", path.display(), e)))
}

/// Decode a JSON array of pantry items
pub fn parse_pantry_items(json: &str) -> Result<Vec<PantryItem>, PantryError> {
    let items: Vec<PantryItem> = parse_collection(json, "pantry items")?;
    info!("Loaded {} pantry items", items.len());
    Ok(items)
}

/// Decode a JSON array of recipes
pub fn parse_recipes(json: &str) -> Result<Vec<Recipe>, PantryError> {
    let recipes: Vec<Recipe> = parse_collection(json, "recipes")?;
    info!("Loaded {} recipes", recipes.len());
    Ok(recipes)
}

/// Decode a meal plan, filling in any absent day or meal slot
pub fn parse_meal_plan(json: &str) -> Result<MealPlan, PantryError> {
    let mut plan: MealPlan = parse_collection(json, "meal plan")?;
    plan.fill_missing_slots();
    info!("Loaded meal plan with {} planned recipes", plan.recipe_count());
    Ok(plan)
}

pub fn load_pantry_items(path: &Path) -> Result<Vec<PantryItem>, PantryError> {
    parse_pantry_items(&read_file(path)?)
}

pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>, PantryError> {
    parse_recipes(&read_file(path)?)
}

pub fn load_meal_plan(path: &Path) -> Result<MealPlan, PantryError> {
    parse_meal_plan(&read_file(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal_plan::{Day, MealType};

    #[test]
    fn test_parse_pantry_items() {
        let json = r#"[
            {"id": "p1", "name": "Flour", "quantity": "2", "unit": "cups"},
            {"name": "Eggs", "quantity": 6, "unit": ""}
        ]"#;
        let items = parse_pantry_items(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_deref(), Some("p1"));
        assert_eq!(items[1].amount(), Some(6.0));
    }

    #[test]
    fn test_parse_recipes_with_mixed_ingredients() {
        let json = r#"[{"id": "r1", "title": "Bread", "category": "Baking",
            "ingredients": ["salt", {"name": "flour", "quantity": "500", "unit": "g"}]}]"#;
        let recipes = parse_recipes(json).unwrap();
        assert_eq!(recipes[0].ingredients.len(), 2);
        assert_eq!(recipes[0].category.as_deref(), Some("Baking"));
    }

    #[test]
    fn test_parse_meal_plan_fills_slots() {
        let plan = parse_meal_plan(r#"{"Monday": {"Lunch": []}}"#).unwrap();
        assert!(plan.slot(Day::Sunday, MealType::Snack).is_empty());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_null_pantry_unit_reads_as_blank() {
        let items =
            parse_pantry_items(r#"[{"name": "flour", "quantity": "2", "unit": null}]"#).unwrap();
        assert_eq!(items[0].unit, "");
        assert_eq!(items[0].amount(), Some(2.0));
    }

    #[test]
    fn test_null_ingredient_unit_keeps_quantified_shape() {
        let json = r#"[{"id": "r1", "title": "Rolls", "ingredients": [
            {"name": "eggs", "quantity": 2, "unit": null},
            {"name": "butter", "quantity": null, "unit": null}
        ]}]"#;
        let recipes = parse_recipes(json).unwrap();
        let eggs = recipes[0].ingredients[0].extract();
        assert_eq!(eggs.name, "eggs");
        assert_eq!(eggs.amount(), Some(2.0));
        assert_eq!(eggs.unit, "");
        assert_eq!(recipes[0].ingredients[1].extract().quantity, None);
    }

    #[test]
    fn test_null_ingredient_list_reads_as_empty() {
        let recipes = parse_recipes(r#"[{"id": "r1", "title": "Water", "ingredients": null}]"#)
            .unwrap();
        assert!(recipes[0].ingredients.is_empty());
    }

    #[test]
    fn test_null_meal_plan_slots_read_as_empty() {
        let plan = parse_meal_plan(r#"{"Monday": {"Lunch": null}, "Tuesday": null}"#).unwrap();
        assert!(plan.slot(Day::Monday, MealType::Lunch).is_empty());
        assert!(plan.slot(Day::Tuesday, MealType::Dinner).is_empty());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_invalid_record() {
        let err = parse_recipes(r#"{"not": "a list"}"#).unwrap_err();
        match err {
            PantryError::InvalidRecord(msg) => assert!(msg.starts_with("recipes:")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_recipes(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, PantryError::Io(_)));
    }
}
