//! # Ingredient Parser
//!
//! Tolerant parsing of the free-text quantities users type into pantry and
//! recipe forms, plus a quick-entry parser turning a line such as
//! `"2 cups flour"` into a structured [`RecipeIngredient`].
//!
//! ## Features
//!
//! - Exact amounts: "2", "1.5", ".25"
//! - Fractions and mixed numbers: "1/2", "2 1/4"
//! - Ranges, read as their midpoint: "2-3", "1 to 2"
//! - A leading number followed by text: "3 large" -> 3
//!
//! Anything else (blank, "a pinch", "to taste") has no amount. Callers treat a
//! missing amount as "not recorded", never as zero.
//!
//! ## Usage
//!
//! ```rust
//! use smart_pantry::ingredient_parser::{parse_amount, parse_ingredient_line};
//!
//! assert_eq!(parse_amount("1 1/2"), Some(1.5));
//! assert_eq!(parse_amount("to taste"), None);
//!
//! let flour = parse_ingredient_line("2 cups flour").unwrap();
//! assert_eq!(flour.name(), "flour");
//! ```

use crate::ingredient_model::{QuantityValue, RecipeIngredient};
use crate::units;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Regex patterns for parsing different quantity formats
static QUANTITY_PATTERNS: LazyLock<QuantityPatterns> = LazyLock::new(QuantityPatterns::new);

/// Count-style units recognized by the quick-entry parser. They carry no
/// conversion factor; the amount is used as a plain count.
const COUNT_UNITS: &[&str] = &[
    "piece", "pieces", "pinch", "pinches", "dash", "dashes", "clove", "cloves", "can", "cans",
    "bottle", "bottles", "package", "packages", "pkg", "slice", "slices", "stick", "sticks",
    "bunch", "bunches", "dozen", "handful", "handfuls",
];

/// Compiled regex patterns for parsing
struct QuantityPatterns {
    /// Fractions, optionally mixed: "1/2", "2 1/4"
    fraction: Regex,
    /// Ranges: "2-3", "1 to 2"
    range: Regex,
    /// Leading number, parsed the way a lenient float reader would: "3 large"
    leading_number: Regex,
    /// Splits a free-text line into its leading quantity and the remainder
    ingredient_line: Regex,
}

impl QuantityPatterns {
    fn new() -> Self {
        Self {
            fraction: Regex::new(r"^(?:(\d+)\s+)?(\d+)\s*[⁄/]\s*(\d+)").unwrap(),
            range: Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:-|–|—|to)\s*(\d+(?:\.\d+)?)").unwrap(),
            leading_number: Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)").unwrap(),
            ingredient_line: Regex::new(
                r"^(?P<qty>(?:\d+\s+)?\d+\s*[⁄/]\s*\d+|\d+(?:\.\d+)?\s*(?:-|–|to)\s*\d+(?:\.\d+)?|\d*\.?\d+)\s*(?P<rest>.*)$",
            )
            .unwrap(),
        }
    }
}

/// Parse a free-text amount into a number.
///
/// Returns `None` when the text carries no usable amount, including fractions
/// with a zero denominator.
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(captures) = QUANTITY_PATTERNS.fraction.captures(text) {
        let whole: f64 = captures
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0.0);
        let numerator: f64 = captures[2].parse().ok()?;
        let denominator: f64 = captures[3].parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(whole + numerator / denominator);
    }

    if let Some(captures) = QUANTITY_PATTERNS.range.captures(text) {
        let min: f64 = captures[1].parse().ok()?;
        let max: f64 = captures[2].parse().ok()?;
        return Some((min + max) / 2.0);
    }

    QUANTITY_PATTERNS
        .leading_number
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Parse a quick-entry line ("2 cups flour", "1/2 tsp salt", "eggs") into a
/// recipe ingredient.
///
/// Lines without a leading amount become [`RecipeIngredient::NameOnly`].
/// Returns `None` for blank lines or lines with an amount but no name.
pub fn parse_ingredient_line(line: &str) -> Option<RecipeIngredient> {
    let line = strip_parenthetical(line.trim());
    if line.is_empty() {
        return None;
    }

    let Some(captures) = QUANTITY_PATTERNS.ingredient_line.captures(&line) else {
        trace!("No leading amount in '{}', keeping it as a name", line);
        return Some(RecipeIngredient::NameOnly(line));
    };

    let quantity = captures["qty"].trim().to_string();
    let rest = captures["rest"].trim();
    let (unit, name) = split_unit(rest);
    let name = name
        .strip_prefix("of ")
        .unwrap_or(name)
        .trim()
        .to_string();

    if name.is_empty() {
        return None;
    }

    trace!(
        "Parsed line '{}' -> quantity='{}', unit='{}', name='{}'",
        line,
        quantity,
        unit,
        name
    );

    Some(RecipeIngredient::Quantified {
        name,
        quantity: Some(QuantityValue::Text(quantity)),
        unit,
    })
}

/// Split a leading unit off the remainder of an ingredient line
fn split_unit(rest: &str) -> (String, &str) {
    let lower = rest.to_lowercase();

    // Two-word units first so "fl oz" is not read as "fl" + "oz milk"
    for two_word in ["fl oz", "fluid ounce", "fluid ounces"] {
        if let Some(after) = lower.strip_prefix(two_word) {
            if after.is_empty() || after.starts_with(' ') {
                return (units::canonical_unit(two_word), rest[two_word.len()..].trim_start());
            }
        }
    }

    let mut parts = rest.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("");
    let remainder = parts.next().unwrap_or("").trim_start();
    let first_lower = first.trim_end_matches('.').to_lowercase();

    if units::is_convertible_unit(&first_lower) {
        return (units::canonical_unit(&first_lower), remainder);
    }
    // "3 eggs": a lone word after the amount is the name, not a unit
    if COUNT_UNITS.contains(&first_lower.as_str()) && !remainder.is_empty() {
        return (first_lower, remainder);
    }

    (String::new(), rest)
}

/// Drop a trailing "(...)" note such as "(sifted)"
fn strip_parenthetical(line: &str) -> String {
    match (line.find('('), line.ends_with(')')) {
        (Some(open), true) => line[..open].trim().to_string(),
        _ => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_amounts() {
        assert_eq!(parse_amount("2"), Some(2.0));
        assert_eq!(parse_amount(" 1.5 "), Some(1.5));
        assert_eq!(parse_amount(".25"), Some(0.25));
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse_amount("1/2"), Some(0.5));
        assert_eq!(parse_amount("2 1/4"), Some(2.25));
        assert_eq!(parse_amount("3/4 cup"), Some(0.75));
        assert_eq!(parse_amount("1/0"), None);
    }

    #[test]
    fn test_parse_ranges_as_midpoint() {
        assert_eq!(parse_amount("2-3"), Some(2.5));
        assert_eq!(parse_amount("1 to 2"), Some(1.5));
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_amount("3 large"), Some(3.0));
        assert_eq!(parse_amount("250g"), Some(250.0));
    }

    #[test]
    fn test_unparsable_amounts() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("a pinch"), None);
        assert_eq!(parse_amount("to taste"), None);
    }

    #[test]
    fn test_parse_line_with_unit() {
        let parsed = parse_ingredient_line("2 cups flour").unwrap();
        let line = parsed.extract();
        assert_eq!(line.name, "flour");
        assert_eq!(line.unit, "cup");
        assert_eq!(line.amount(), Some(2.0));
    }

    #[test]
    fn test_parse_line_with_fraction_and_modifier() {
        let parsed = parse_ingredient_line("1 1/2 tbsp olive oil (extra virgin)").unwrap();
        let line = parsed.extract();
        assert_eq!(line.name, "olive oil");
        assert_eq!(line.unit, "tbsp");
        assert_eq!(line.amount(), Some(1.5));
    }

    #[test]
    fn test_parse_line_two_word_unit() {
        let parsed = parse_ingredient_line("8 fl oz milk").unwrap();
        let line = parsed.extract();
        assert_eq!(line.name, "milk");
        assert_eq!(line.unit, "fl oz");
    }

    #[test]
    fn test_parse_line_count_and_bare_name() {
        let eggs = parse_ingredient_line("3 eggs").unwrap();
        assert_eq!(eggs.extract().name, "eggs");
        assert_eq!(eggs.extract().unit, "");

        let garlic = parse_ingredient_line("2 cloves garlic").unwrap();
        assert_eq!(garlic.extract().unit, "cloves");
        assert_eq!(garlic.extract().name, "garlic");

        let salt = parse_ingredient_line("salt").unwrap();
        assert_eq!(salt, RecipeIngredient::NameOnly("salt".to_string()));
    }

    #[test]
    fn test_parse_line_rejects_empty() {
        assert!(parse_ingredient_line("").is_none());
        assert!(parse_ingredient_line("2 cups").is_none());
    }
}
