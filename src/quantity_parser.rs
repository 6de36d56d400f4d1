//! Quantity parsing for free-text ingredient lines.
//!
//! A quantity is a number immediately followed (with at most one space) by one
//! of a closed set of unit tokens, e.g. `100 г`, `2шт`, `1,5 л`, `1 ст.л`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Unit tokens recognized after a number. Longest first so that `кг` wins
/// over `г` and `ст.л` is never cut short.
pub const RECOGNIZED_UNITS: &[&str] = &[
    "щепотка", // pinch
    "ст.л",    // tablespoon
    "ч.л",     // teaspoon
    "кг",
    "kg",
    "мл",
    "шт",
    "г",
    "л",
];

fn unit_alternation() -> String {
    RECOGNIZED_UNITS
        .iter()
        .map(|unit| regex::escape(unit))
        .collect::<Vec<_>>()
        .join("|")
}

lazy_static! {
    static ref QUANTITY_RE: Regex = Regex::new(&format!(
        r"(?i)([0-9]+(?:[.,][0-9]+)?)\s?({})\b",
        unit_alternation()
    ))
    .expect("quantity pattern should be valid");
    static ref LEADING_QUANTITY_RE: Regex = Regex::new(&format!(
        r"(?i)^\s*([0-9]+(?:[.,][0-9]+)?)\s?({})\b",
        unit_alternation()
    ))
    .expect("leading quantity pattern should be valid");
}

/// Numeric amount and unit token. An empty unit means nothing was parsed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedQuantity {
    pub amount: f64,
    pub unit: String,
}

impl ParsedQuantity {
    pub fn unparsed() -> Self {
        Self::default()
    }

    pub fn is_parsed(&self) -> bool {
        !self.unit.is_empty()
    }
}

/// A quantity found somewhere inside a longer line.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityMatch<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
}

fn parse_amount(digits: &str) -> f64 {
    digits.replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Parses a quantity at the start of `text` (leading whitespace allowed).
///
/// Never fails: text without a recognizable quantity yields amount `0.0` and
/// an empty unit.
pub fn parse_quantity(text: &str) -> ParsedQuantity {
    match LEADING_QUANTITY_RE.captures(text) {
        Some(caps) => ParsedQuantity {
            amount: parse_amount(&caps[1]),
            unit: caps[2].to_lowercase(),
        },
        None => ParsedQuantity::unparsed(),
    }
}

/// Finds the first quantity anywhere in `line`.
pub fn find_quantity(line: &str) -> Option<QuantityMatch<'_>> {
    QUANTITY_RE.find(line).map(|m| QuantityMatch {
        text: m.as_str(),
        span: m.range(),
    })
}

/// Removes every quantity occurring in `text`.
pub fn strip_quantities(text: &str) -> String {
    QUANTITY_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_recognized_unit() {
        for unit in RECOGNIZED_UNITS {
            for n in [0u32, 1, 7, 250, 1000] {
                let parsed = parse_quantity(&format!("{} {}", n, unit));
                assert_eq!(parsed.amount, n as f64, "amount for '{} {}'", n, unit);
                assert_eq!(parsed.unit, unit.to_lowercase());
            }
        }
    }

    #[test]
    fn test_unit_is_lowercased() {
        let parsed = parse_quantity("2 ШТ");
        assert_eq!(parsed, ParsedQuantity { amount: 2.0, unit: "шт".to_string() });
        assert_eq!(parse_quantity("1 KG").unit, "kg");
    }

    #[test]
    fn test_no_space_and_decimal_comma() {
        assert_eq!(parse_quantity("500г").amount, 500.0);
        let parsed = parse_quantity("1,5 л");
        assert_eq!(parsed.amount, 1.5);
        assert_eq!(parsed.unit, "л");
    }

    #[test]
    fn test_unparsed_fallback() {
        assert_eq!(parse_quantity(""), ParsedQuantity::unparsed());
        assert_eq!(parse_quantity("abc"), ParsedQuantity::unparsed());
        assert_eq!(parse_quantity("по вкусу"), ParsedQuantity::unparsed());
        assert!(!parse_quantity("3 стакана").is_parsed());
    }

    #[test]
    fn test_parse_is_anchored_at_start() {
        assert_eq!(parse_quantity("сахар 100 г"), ParsedQuantity::unparsed());
        assert_eq!(parse_quantity("  100 г сахара").amount, 100.0);
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(parse_quantity("١٠٠ г"), ParsedQuantity::unparsed());
        assert!(find_quantity("١٠٠ г сахара").is_none());
    }

    #[test]
    fn test_longest_unit_wins() {
        assert_eq!(parse_quantity("2 кг").unit, "кг");
        assert_eq!(parse_quantity("1 ст.л сахара").unit, "ст.л");
    }

    #[test]
    fn test_unit_must_end_at_word_boundary() {
        // "л" must not match the start of "ложка"
        assert!(find_quantity("1 ложка мёда").is_none());
        assert!(find_quantity("100 гр муки").is_none());
    }

    #[test]
    fn test_find_quantity_anywhere() {
        let line = "Творог - 200 г (молочные продукты)";
        let found = find_quantity(line).unwrap();
        assert_eq!(found.text, "200 г");
        assert_eq!(&line[found.span], "200 г");
    }

    #[test]
    fn test_strip_quantities_removes_all() {
        assert_eq!(strip_quantities("сахар 100 г и 2 шт"), "сахар  и ");
    }
}
