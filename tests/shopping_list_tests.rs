//! # Shopping List Integration Tests
//!
//! Aggregation over whole meal plans through the public API.

use smart_pantry::ingredient_model::{Recipe, RecipeIngredient};
use smart_pantry::meal_plan::{Day, MealPlan, MealType};
use smart_pantry::shopping_list::{build_shopping_list, sort_by_name, AS_NEEDED};

fn cake() -> Recipe {
    Recipe::new("cake", "Cake")
        .with_ingredient(RecipeIngredient::quantified("sugar", 1.0, "cup"))
        .with_ingredient(RecipeIngredient::quantified("Butter", 250.0, "g"))
        .with_ingredient(RecipeIngredient::name_only("salt"))
}

fn pasta() -> Recipe {
    Recipe::new("pasta", "Pasta")
        .with_ingredient(RecipeIngredient::quantified("butter", "0.25", "kg"))
        .with_ingredient(RecipeIngredient::quantified("Milk", 1.0, "l"))
        .with_ingredient(RecipeIngredient::quantified("milk", 250.0, "ml"))
        .with_ingredient(RecipeIngredient::quantified("", 3.0, "g"))
}

#[test]
fn test_same_unit_entries_are_summed() {
    let mut plan = MealPlan::new();
    plan.add_recipe(
        Day::Monday,
        MealType::Breakfast,
        Recipe::new("a", "A")
            .with_ingredient(RecipeIngredient::quantified("sugar", "1", "cup")),
    );
    plan.add_recipe(
        Day::Thursday,
        MealType::Snack,
        Recipe::new("b", "B")
            .with_ingredient(RecipeIngredient::quantified("sugar", "1", "cup")),
    );

    let list = build_shopping_list(&plan);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "sugar");
    assert_eq!(list[0].quantity, 2.0);
    assert_eq!(list[0].unit, "cup");
}

#[test]
fn test_unnamed_ingredients_are_excluded() {
    let mut plan = MealPlan::new();
    plan.add_recipe(Day::Monday, MealType::Dinner, pasta());

    let list = build_shopping_list(&plan);
    assert!(list.iter().all(|entry| !entry.name.is_empty()));
    assert_eq!(list.len(), 2);
}

#[test]
fn test_week_aggregation_with_conversions() {
    let mut plan = MealPlan::new();
    plan.add_recipe(Day::Saturday, MealType::Snack, cake());
    plan.add_recipe(Day::Monday, MealType::Dinner, pasta());
    plan.add_recipe(Day::Wednesday, MealType::Dinner, pasta());

    let mut list = build_shopping_list(&plan);
    sort_by_name(&mut list);

    let names: Vec<&str> = list.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["butter", "Milk", "salt", "sugar"]);

    // Monday's pasta is seen first: 0.25 kg + 0.25 kg + 250 g
    let butter = &list[0];
    assert_eq!(butter.unit, "kg");
    assert!((butter.quantity - 0.75).abs() < 1e-9);

    // 1 l + 250 ml, twice
    let milk = &list[1];
    assert_eq!(milk.unit, "l");
    assert!((milk.quantity - 2.5).abs() < 1e-9);

    assert_eq!(list[2].display_quantity(), AS_NEEDED);
    assert_eq!(list[3].display_quantity(), "1 cup");
}

#[test]
fn test_aggregation_is_order_independent() {
    let mut forward = MealPlan::new();
    forward.add_recipe(Day::Monday, MealType::Lunch, cake());
    forward.add_recipe(Day::Tuesday, MealType::Lunch, pasta());

    let mut reverse = MealPlan::new();
    reverse.add_recipe(Day::Monday, MealType::Lunch, pasta());
    reverse.add_recipe(Day::Tuesday, MealType::Lunch, cake());

    let totals = |plan: &MealPlan| {
        let mut list = build_shopping_list(plan);
        sort_by_name(&mut list);
        list.iter()
            .map(|e| (e.name.to_lowercase(), e.quantity, e.unit.clone()))
            .collect::<Vec<_>>()
    };

    let forward_totals = totals(&forward);
    let reverse_totals = totals(&reverse);
    assert_eq!(forward_totals.len(), reverse_totals.len());

    // Sums agree once expressed in the same unit
    let butter_forward = &forward_totals[0];
    let butter_reverse = &reverse_totals[0];
    assert_eq!(butter_forward.2, "g");
    assert_eq!(butter_reverse.2, "kg");
    assert!((butter_forward.1 - butter_reverse.1 * 1000.0).abs() < 1e-9);
}

#[test]
fn test_empty_plan_gives_empty_list() {
    assert!(build_shopping_list(&MealPlan::new()).is_empty());
}
