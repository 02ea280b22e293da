//! # Name Normalization
//!
//! Heuristic ingredient-name normalization and the fuzzy name-equality used to
//! pair recipe ingredients with pantry items.
//!
//! The full pipeline lowercases, strips punctuation, collapses whitespace and
//! crudely singularizes the last characters. It is lossy on purpose: callers
//! must tolerate false matches ("chilies" and "chili") as well as misses.
//!
//! Name equality falls back through three tiers, from most to least precise:
//!
//! 1. normalized forms are equal
//! 2. one normalized form contains the other
//! 3. the forms share a whitespace-delimited token
//!
//! The fallback favours recall over precision. A known false positive is
//! "milk" matching "buttermilk".

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref NON_WORD: Regex =
        Regex::new(r"[^\w\s]").expect("Non-word pattern should be valid");
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("Whitespace pattern should be valid");
}

/// How ingredient names are reduced to comparison keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameNormalization {
    /// Lowercase, strip punctuation, collapse whitespace, singularize
    #[default]
    Full,
    /// Trim and lowercase only
    Simple,
}

impl NameNormalization {
    /// Reduce a name to its comparison key under this strategy
    pub fn apply(&self, name: &str) -> String {
        match self {
            NameNormalization::Full => normalize(name),
            NameNormalization::Simple => name.trim().to_lowercase(),
        }
    }
}

impl std::str::FromStr for NameNormalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(NameNormalization::Full),
            "simple" => Ok(NameNormalization::Simple),
            other => Err(format!("unknown name normalization '{other}'")),
        }
    }
}

/// Which fallback tier made two names match. Ordered from most to least precise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Substring,
    SharedToken,
}

/// Normalize an ingredient name with the full pipeline
pub fn normalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    singularize(collapsed.trim())
}

/// Crude singular form: longer than 3 characters drops a trailing "es",
/// otherwise a trailing "s"
fn singularize(name: &str) -> String {
    if name.chars().count() <= 3 {
        return name.to_string();
    }
    if let Some(stem) = name.strip_suffix("es") {
        return stem.to_string();
    }
    name.strip_suffix('s').unwrap_or(name).to_string()
}

/// Compare two already-normalized keys. Empty keys never match.
pub fn key_match_tier(a: &str, b: &str) -> Option<MatchTier> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if a == b {
        return Some(MatchTier::Exact);
    }
    if a.contains(b) || b.contains(a) {
        return Some(MatchTier::Substring);
    }
    let shares_token = a
        .split_whitespace()
        .any(|token| b.split_whitespace().any(|other| other == token));
    if shares_token {
        return Some(MatchTier::SharedToken);
    }
    None
}

/// Tier at which two raw names match under the full normalization
pub fn match_tier(a: &str, b: &str) -> Option<MatchTier> {
    key_match_tier(&normalize(a), &normalize(b))
}

/// Whether two raw names refer to the same ingredient
pub fn names_match(a: &str, b: &str) -> bool {
    match_tier(a, b).is_some()
}
