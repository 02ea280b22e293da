//! # Matcher Integration Tests
//!
//! End-to-end checks of pantry matching through the public API.

use smart_pantry::ingredient_model::{PantryItem, QuantityValue, Recipe, RecipeIngredient};
use smart_pantry::matcher::{match_all_recipes, match_recipe};
use smart_pantry::sufficiency::{has_enough_quantity, SufficiencyStatus};
use smart_pantry::units::convert_to_base_unit;

fn sample_pantry() -> Vec<PantryItem> {
    vec![
        PantryItem::new("all-purpose flour").with_quantity("2", "cups"),
        PantryItem::new("Sugar").with_quantity(500.0, "g"),
        PantryItem::new("Eggs").with_quantity(4.0, ""),
        PantryItem::new("butter").with_quantity("", ""),
        PantryItem::new("vanilla extract"),
    ]
}

fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("cookies", "Cookies")
            .with_ingredient(RecipeIngredient::quantified("flour", 200.0, "g"))
            .with_ingredient(RecipeIngredient::quantified("sugar", "1", "cup"))
            .with_ingredient(RecipeIngredient::quantified("butter", "1/2", "cup"))
            .with_ingredient(RecipeIngredient::name_only("chocolate chips")),
        Recipe::new("meringue", "Meringue")
            .with_ingredient(RecipeIngredient::quantified("egg", 3.0, ""))
            .with_ingredient(RecipeIngredient::quantified("sugar", 150.0, "g")),
        Recipe::new("custard", "Custard")
            .with_ingredient(RecipeIngredient::quantified("eggs", 6.0, ""))
            .with_ingredient(RecipeIngredient::quantified("milk", 500.0, "ml"))
            .with_ingredient(RecipeIngredient::name_only("vanilla")),
        Recipe::new("empty", "Nothing"),
    ]
}

#[test]
fn test_empty_recipe_has_zero_scores() {
    let result = match_recipe(&Recipe::new("e", "Empty"), &sample_pantry());
    assert_eq!(result.match_percentage, 0.0);
    assert_eq!(result.cookability_percentage, 0.0);
    assert!(!result.match_percentage.is_nan());
}

#[test]
fn test_equal_name_without_recipe_quantity_is_matching() {
    let pantry = vec![PantryItem::new("Tomatoes").with_quantity("", "")];
    let recipe =
        Recipe::new("s", "Salad").with_ingredient(RecipeIngredient::name_only("tomato"));

    let result = match_recipe(&recipe, &pantry);
    assert_eq!(result.matching.len(), 1);
    assert!(result.insufficient.is_empty());
    assert!(result.missing.is_empty());
}

#[test]
fn test_blank_pantry_quantity_is_insufficient_not_missing() {
    let recipe = Recipe::new("t", "Toast")
        .with_ingredient(RecipeIngredient::quantified("butter", 2.0, "tbsp"));

    let result = match_recipe(&recipe, &sample_pantry());
    assert!(result.missing.is_empty());
    assert_eq!(result.insufficient.len(), 1);
    assert_eq!(
        result.insufficient[0].sufficiency.status,
        SufficiencyStatus::Unknown
    );
}

#[test]
fn test_kg_and_g_base_values_agree() {
    for x in [0.0, 0.25, 1.0, 2.5, 12.0] {
        let kg = convert_to_base_unit(Some(&QuantityValue::Number(x)), "kg");
        let g = convert_to_base_unit(Some(&QuantityValue::Number(x * 1000.0)), "g");
        assert_eq!(kg.value, g.value);
    }
}

#[test]
fn test_cups_of_flour_cover_grams_of_flour() {
    let pantry_item = PantryItem::new("flour").with_quantity("2", "cups");
    let required = QuantityValue::Text("200".to_string());

    let result = has_enough_quantity(&pantry_item, Some(&required), "g", "flour");
    assert!(result.enough);
    assert!(result.conversion_used);
    assert!((result.percentage.unwrap() - 120.0).abs() < 0.01);
}

#[test]
fn test_recipe_buckets_in_catalog() {
    let results = match_all_recipes(&sample_recipes(), &sample_pantry(), 0.0);
    let cookies = results.iter().find(|r| r.recipe.id == "cookies").unwrap();

    // flour via density, sugar 500 g vs 1 cup (200 g)
    assert_eq!(cookies.matching.len(), 2);
    // butter has no recorded quantity
    assert_eq!(cookies.insufficient.len(), 1);
    assert_eq!(cookies.missing_names(), vec!["chocolate chips"]);
    assert_eq!(cookies.match_percentage, 50.0);
    assert_eq!(cookies.cookability_percentage, 62.5);
}

#[test]
fn test_threshold_zero_keeps_every_recipe() {
    let recipes = sample_recipes();
    let results = match_all_recipes(&recipes, &sample_pantry(), 0.0);
    assert_eq!(results.len(), recipes.len());
}

#[test]
fn test_threshold_hundred_keeps_only_fully_covered() {
    let results = match_all_recipes(&sample_recipes(), &sample_pantry(), 100.0);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe.id, "meringue");
    assert!(results.iter().all(|r| r.is_fully_cookable()));
}

#[test]
fn test_sorted_by_match_then_cookability() {
    let results = match_all_recipes(&sample_recipes(), &sample_pantry(), 0.0);
    let ids: Vec<&str> = results.iter().map(|r| r.recipe.id.as_str()).collect();
    // meringue 100/100, cookies 50/62.5, custard 33/50, empty 0/0
    assert_eq!(ids, vec!["meringue", "cookies", "custard", "empty"]);

    for pair in results.windows(2) {
        assert!(pair[0].match_percentage >= pair[1].match_percentage);
    }
}

#[test]
fn test_equal_scores_keep_input_order() {
    let recipes: Vec<Recipe> = ["first", "second", "third"]
        .iter()
        .map(|id| Recipe::new(id, id).with_ingredient(RecipeIngredient::name_only("eggs")))
        .collect();

    let results = match_all_recipes(&recipes, &sample_pantry(), 0.0);
    let ids: Vec<&str> = results.iter().map(|r| r.recipe.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn test_matching_is_idempotent() {
    let recipes = sample_recipes();
    let pantry = sample_pantry();

    let first = match_all_recipes(&recipes, &pantry, 30.0);
    let second = match_all_recipes(&recipes, &pantry, 30.0);
    assert_eq!(first, second);
}
