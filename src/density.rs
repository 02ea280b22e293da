//! # Ingredient Density Lookup
//!
//! Bridges weight and volume quantities for the same ingredient.
//!
//! Densities are stored as grams per US cup (236.588 ml) for a fixed list of
//! common baking and cooking ingredients. Names are looked up with the same
//! normalize-and-fuzzy-match policy used for pantry matching.

use crate::normalize::{key_match_tier, normalize, MatchTier};
use crate::units::{UnitType, ML_PER_CUP};
use std::sync::LazyLock;
use tracing::trace;

/// Grams per cup, in lookup order for equally specific matches
const DENSITY_TABLE: &[(&str, f64)] = &[
    ("flour", 120.0),
    ("bread flour", 127.0),
    ("whole wheat flour", 113.0),
    ("cake flour", 114.0),
    ("cornstarch", 128.0),
    ("sugar", 200.0),
    ("brown sugar", 213.0),
    ("powdered sugar", 120.0),
    ("honey", 340.0),
    ("maple syrup", 315.0),
    ("butter", 227.0),
    ("milk", 245.0),
    ("heavy cream", 238.0),
    ("sour cream", 242.0),
    ("yogurt", 245.0),
    ("cheese", 113.0),
    ("water", 237.0),
    ("vegetable oil", 218.0),
    ("olive oil", 216.0),
    ("rice", 185.0),
    ("rolled oats", 90.0),
    ("almonds", 143.0),
    ("walnuts", 120.0),
    ("chocolate chips", 170.0),
    ("cocoa powder", 85.0),
    ("baking powder", 192.0),
    ("baking soda", 220.0),
    ("salt", 273.0),
];

/// Table keys normalized once
static NORMALIZED_TABLE: LazyLock<Vec<(String, &'static str, f64)>> = LazyLock::new(|| {
    DENSITY_TABLE
        .iter()
        .map(|(name, grams_per_cup)| (normalize(name), *name, *grams_per_cup))
        .collect()
});

/// A density table hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    /// The table entry that matched
    pub ingredient: &'static str,
    pub grams_per_cup: f64,
}

/// Find the density for an ingredient name.
///
/// The most precise match tier wins; within a tier the longest table key wins,
/// so "light brown sugar" resolves to "brown sugar" rather than "sugar".
pub fn find_density(name: &str) -> Option<Density> {
    let key = normalize(name);
    let mut best: Option<(MatchTier, usize, Density)> = None;

    for (table_key, ingredient, grams_per_cup) in NORMALIZED_TABLE.iter() {
        let Some(tier) = key_match_tier(&key, table_key) else {
            continue;
        };
        let length = table_key.chars().count();
        let better = match &best {
            None => true,
            Some((best_tier, best_length, _)) => {
                tier < *best_tier || (tier == *best_tier && length > *best_length)
            }
        };
        if better {
            best = Some((
                tier,
                length,
                Density {
                    ingredient,
                    grams_per_cup: *grams_per_cup,
                },
            ));
        }
    }

    match best {
        Some((tier, _, density)) => {
            trace!(
                "Density for '{}' resolved to '{}' ({:?})",
                name,
                density.ingredient,
                tier
            );
            Some(density)
        }
        None => None,
    }
}

/// Grams for a volume in millilitres
pub fn volume_to_weight(ml: f64, grams_per_cup: f64) -> f64 {
    ml / ML_PER_CUP * grams_per_cup
}

/// Millilitres for a weight in grams
pub fn weight_to_volume(grams: f64, grams_per_cup: f64) -> f64 {
    grams / grams_per_cup * ML_PER_CUP
}

/// Convert a base-unit value between weight and volume for the named
/// ingredient.
///
/// Returns `None` when the types are not a weight/volume pair or no density is
/// known for the ingredient; the caller must treat that as "cannot compare".
pub fn convert_between(value: f64, from: UnitType, to: UnitType, name: &str) -> Option<f64> {
    match (from, to) {
        (UnitType::Volume, UnitType::Weight) => {
            find_density(name).map(|d| volume_to_weight(value, d.grams_per_cup))
        }
        (UnitType::Weight, UnitType::Volume) => {
            find_density(name).map(|d| weight_to_volume(value, d.grams_per_cup))
        }
        _ => None,
    }
}
