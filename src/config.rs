//! # Configuration Module
//!
//! Tunables for pantry matching and shopping-list aggregation, with defaults
//! that reproduce the established behaviour and optional environment overrides.

use crate::errors::PantryError;
use crate::normalize::NameNormalization;
use serde::{Deserialize, Serialize};
use std::env;

pub use crate::units::ML_PER_CUP;

// Constants for suggestion configuration
pub const DEFAULT_MIN_COOKABILITY: f64 = 0.0;
pub const MAX_COOKABILITY: f64 = 100.0;
pub const PARTIAL_CREDIT_WEIGHT: f64 = 0.5;

/// Option name reported when a cookability threshold is rejected
pub const MIN_COOKABILITY_KEY: &str = "min_cookability";

// Environment variable names
pub const ENV_MATCH_NORMALIZATION: &str = "SMART_PANTRY_MATCH_NORMALIZATION";
pub const ENV_SHOPPING_NORMALIZATION: &str = "SMART_PANTRY_SHOPPING_NORMALIZATION";
pub const ENV_INCOMPARABLE_POLICY: &str = "SMART_PANTRY_INCOMPARABLE_POLICY";
pub const ENV_PARTIAL_CREDIT: &str = "SMART_PANTRY_PARTIAL_CREDIT";

/// What to conclude when a pantry quantity cannot be compared with the
/// recipe's (count units, or weight against volume with no known density)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomparablePolicy {
    /// Presence of the ingredient is taken as enough
    #[default]
    AssumeSufficient,
    /// Treat the ingredient as insufficient, like an unrecorded pantry quantity
    AssumeInsufficient,
}

impl std::str::FromStr for IncomparablePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assume_sufficient" | "sufficient" => Ok(IncomparablePolicy::AssumeSufficient),
            "assume_insufficient" | "insufficient" => Ok(IncomparablePolicy::AssumeInsufficient),
            other => Err(format!("unknown incomparable policy '{other}'")),
        }
    }
}

/// Configuration for the ingredient matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Name normalization used before fuzzy matching
    pub name_normalization: NameNormalization,
    /// Outcome for quantities that cannot be compared
    pub incomparable_policy: IncomparablePolicy,
    /// Credit an insufficient ingredient earns toward cookability (0.0 to 1.0)
    pub partial_credit_weight: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            name_normalization: NameNormalization::Full,
            incomparable_policy: IncomparablePolicy::AssumeSufficient,
            partial_credit_weight: PARTIAL_CREDIT_WEIGHT,
        }
    }
}

/// Configuration for the shopping-list aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListConfig {
    /// Name normalization used for grouping keys
    pub name_normalization: NameNormalization,
}

impl Default for ShoppingListConfig {
    fn default() -> Self {
        Self {
            // Grouping has always been plain trim + lowercase
            name_normalization: NameNormalization::Simple,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PantryConfig {
    pub matcher: MatcherConfig,
    pub shopping_list: ShoppingListConfig,
}

impl PantryConfig {
    /// Defaults overridden by `SMART_PANTRY_*` environment variables
    pub fn from_env() -> Result<Self, PantryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PantryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MATCH_NORMALIZATION) {
            config.matcher.name_normalization =
                parse_setting(ENV_MATCH_NORMALIZATION, &value)?;
        }
        if let Some(value) = lookup(ENV_SHOPPING_NORMALIZATION) {
            config.shopping_list.name_normalization =
                parse_setting(ENV_SHOPPING_NORMALIZATION, &value)?;
        }
        if let Some(value) = lookup(ENV_INCOMPARABLE_POLICY) {
            config.matcher.incomparable_policy = parse_setting(ENV_INCOMPARABLE_POLICY, &value)?;
        }
        if let Some(value) = lookup(ENV_PARTIAL_CREDIT) {
            let weight: f64 = parse_setting(ENV_PARTIAL_CREDIT, &value)?;
            if !(0.0..=1.0).contains(&weight) {
                return Err(PantryError::InvalidConfig {
                    key: ENV_PARTIAL_CREDIT.to_string(),
                    value,
                });
            }
            config.matcher.partial_credit_weight = weight;
        }

        Ok(config)
    }
}

/// Parse a cookability threshold, which must lie within 0 to 100
pub fn parse_min_cookability(value: &str) -> Result<f64, PantryError> {
    let threshold: f64 = parse_setting(MIN_COOKABILITY_KEY, value)?;
    if !(DEFAULT_MIN_COOKABILITY..=MAX_COOKABILITY).contains(&threshold) {
        return Err(PantryError::InvalidConfig {
            key: MIN_COOKABILITY_KEY.to_string(),
            value: value.to_string(),
        });
    }
    Ok(threshold)
}

fn parse_setting<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, PantryError> {
    value.trim().parse().map_err(|_| PantryError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    })
}
