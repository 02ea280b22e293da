//! # Ingredient Matcher
//!
//! Scores recipes against a user's pantry for the "what can I cook" view.
//!
//! Each recipe ingredient is paired with the pantry item whose name matches it
//! most precisely, then bucketed:
//!
//! - **matching**: the pantry covers the requirement (or none was given)
//! - **insufficient**: the pantry has the ingredient but not enough of it, or
//!   the amount cannot be confirmed
//! - **missing**: no pantry item matches at all
//!
//! ## Usage
//!
//! ```rust
//! use smart_pantry::ingredient_model::{PantryItem, Recipe, RecipeIngredient};
//! use smart_pantry::matcher::match_all_recipes;
//!
//! let pantry = vec![PantryItem::new("eggs").with_quantity(6.0, "")];
//! let recipes = vec![
//!     Recipe::new("1", "Boiled eggs")
//!         .with_ingredient(RecipeIngredient::quantified("egg", 2.0, "")),
//!     Recipe::new("2", "Toast").with_ingredient(RecipeIngredient::name_only("bread")),
//! ];
//!
//! let results = match_all_recipes(&recipes, &pantry, 50.0);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].recipe.title, "Boiled eggs");
//! ```

use crate::config::MatcherConfig;
use crate::ingredient_model::{PantryItem, Recipe, RecipeIngredient};
use crate::normalize::{key_match_tier, MatchTier};
use crate::sufficiency::{check_sufficiency, Sufficiency};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// A recipe ingredient paired with the pantry item that matched it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientMatch {
    pub ingredient: RecipeIngredient,
    pub pantry_item: PantryItem,
    pub tier: MatchTier,
    pub sufficiency: Sufficiency,
}

/// How well a pantry covers one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub recipe: Recipe,
    pub matching: Vec<IngredientMatch>,
    pub insufficient: Vec<IngredientMatch>,
    pub missing: Vec<RecipeIngredient>,
    /// Share of ingredients fully covered, 0 to 100
    pub match_percentage: f64,
    /// Share with partial credit for insufficient ingredients, 0 to 100
    pub cookability_percentage: f64,
}

impl MatchResult {
    /// Number of ingredients the recipe lists
    pub fn total_ingredients(&self) -> usize {
        self.matching.len() + self.insufficient.len() + self.missing.len()
    }

    /// Every ingredient is fully covered
    pub fn is_fully_cookable(&self) -> bool {
        self.insufficient.is_empty() && self.missing.is_empty()
    }

    /// Names of ingredients with no pantry match
    pub fn missing_names(&self) -> Vec<&str> {
        self.missing.iter().map(RecipeIngredient::name).collect()
    }

    /// Names of everything worth buying before cooking: missing ingredients
    /// first, then insufficient ones
    pub fn shopping_gaps(&self) -> Vec<&str> {
        self.missing
            .iter()
            .map(RecipeIngredient::name)
            .chain(self.insufficient.iter().map(|m| m.ingredient.name()))
            .collect()
    }
}

/// Matches recipes against a pantry
#[derive(Debug, Clone, Default)]
pub struct IngredientMatcher {
    config: MatcherConfig,
}

impl IngredientMatcher {
    /// Create a matcher with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a custom configuration
    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Score one recipe against the pantry
    pub fn match_recipe(&self, recipe: &Recipe, pantry_items: &[PantryItem]) -> MatchResult {
        let normalization = self.config.name_normalization;
        let pantry_keys: Vec<String> = pantry_items
            .iter()
            .map(|item| normalization.apply(&item.name))
            .collect();

        let mut matching = Vec::new();
        let mut insufficient = Vec::new();
        let mut missing = Vec::new();

        for ingredient in &recipe.ingredients {
            let line = ingredient.extract();
            let key = normalization.apply(line.name);

            let Some((pantry_item, tier)) = best_pantry_match(&key, pantry_items, &pantry_keys)
            else {
                trace!("'{}' not found in pantry", line.name);
                missing.push(ingredient.clone());
                continue;
            };

            let sufficiency = check_sufficiency(
                pantry_item,
                line.quantity,
                line.unit,
                line.name,
                self.config.incomparable_policy,
            );
            trace!(
                "'{}' matched pantry item '{}' ({:?}), enough={}",
                line.name,
                pantry_item.name,
                tier,
                sufficiency.enough
            );

            let matched = IngredientMatch {
                ingredient: ingredient.clone(),
                pantry_item: pantry_item.clone(),
                tier,
                sufficiency,
            };
            if matched.sufficiency.enough {
                matching.push(matched);
            } else {
                insufficient.push(matched);
            }
        }

        let total = recipe.ingredients.len();
        let (match_percentage, cookability_percentage) = if total == 0 {
            (0.0, 0.0)
        } else {
            let total = total as f64;
            let full = matching.len() as f64;
            let partial = insufficient.len() as f64 * self.config.partial_credit_weight;
            (full / total * 100.0, (full + partial) / total * 100.0)
        };

        debug!(
            "Recipe '{}': {} matching, {} insufficient, {} missing ({:.1}% match, {:.1}% cookable)",
            recipe.title,
            matching.len(),
            insufficient.len(),
            missing.len(),
            match_percentage,
            cookability_percentage
        );

        MatchResult {
            recipe: recipe.clone(),
            matching,
            insufficient,
            missing,
            match_percentage,
            cookability_percentage,
        }
    }

    /// Score every recipe, keep those at or above `min_cookability` and sort
    /// them by match percentage, then cookability, both descending. Recipes
    /// with equal scores keep their input order.
    pub fn match_all_recipes(
        &self,
        recipes: &[Recipe],
        pantry_items: &[PantryItem],
        min_cookability: f64,
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = recipes
            .iter()
            .map(|recipe| self.match_recipe(recipe, pantry_items))
            .filter(|result| result.cookability_percentage >= min_cookability)
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| {
            b.match_percentage
                .total_cmp(&a.match_percentage)
                .then_with(|| b.cookability_percentage.total_cmp(&a.cookability_percentage))
        });

        info!(
            "Matched {} recipes against {} pantry items: {} at or above {}% cookability",
            recipes.len(),
            pantry_items.len(),
            results.len(),
            min_cookability
        );

        results
    }
}

/// The pantry item matching `key` at the most precise tier; the first one in
/// pantry order wins within a tier
fn best_pantry_match<'a>(
    key: &str,
    pantry_items: &'a [PantryItem],
    pantry_keys: &[String],
) -> Option<(&'a PantryItem, MatchTier)> {
    let mut best: Option<(&PantryItem, MatchTier)> = None;
    for (item, item_key) in pantry_items.iter().zip(pantry_keys) {
        let Some(tier) = key_match_tier(key, item_key) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((_, best_tier)) => tier < best_tier,
        };
        if better {
            best = Some((item, tier));
            if tier == MatchTier::Exact {
                break;
            }
        }
    }
    best
}

/// Score one recipe with the default configuration
pub fn match_recipe(recipe: &Recipe, pantry_items: &[PantryItem]) -> MatchResult {
    IngredientMatcher::new().match_recipe(recipe, pantry_items)
}

/// Score and filter recipes with the default configuration
pub fn match_all_recipes(
    recipes: &[Recipe],
    pantry_items: &[PantryItem],
    min_cookability: f64,
) -> Vec<MatchResult> {
    IngredientMatcher::new().match_all_recipes(recipes, pantry_items, min_cookability)
}
