//! # Smart Pantry
//!
//! Pantry matching and meal-plan shopping lists for a recipe-sharing app.
//! Given a user's pantry and a recipe catalog, scores how cookable each recipe
//! is; given a weekly meal plan, merges every planned ingredient into one
//! shopping list.
//!
//! Both cores are pure, synchronous functions over in-memory records fetched
//! beforehand from the document store.

pub mod config;
pub mod density;
pub mod errors;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod matcher;
pub mod meal_plan;
pub mod normalize;
pub mod records;
pub mod shopping_list;
pub mod sufficiency;
pub mod units;

pub use matcher::{match_all_recipes, IngredientMatcher, MatchResult};
pub use shopping_list::{build_shopping_list, ShoppingListAggregator, ShoppingListEntry};
