//! Parenthetical annotations on ingredient lines, e.g. `(молочные продукты)`
//! or a grading code such as `(С1)`.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PARENTHETICAL_RE: Regex =
        Regex::new(r"\((.*?)\)").expect("parenthetical pattern should be valid");
}

/// Contents of the first parenthetical group in `line`, trimmed.
pub fn first_annotation(line: &str) -> Option<&str> {
    PARENTHETICAL_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Removes parenthetical groups, except those whose contents `keep` accepts.
pub fn strip_annotations(text: &str, keep: impl Fn(&str) -> bool) -> String {
    PARENTHETICAL_RE
        .replace_all(text, |caps: &Captures| {
            if keep(&caps[1]) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Recognizes grading codes (a quality grade rather than a category).
#[derive(Debug, Clone)]
pub struct GradeMarker {
    pattern: Regex,
}

impl GradeMarker {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self { pattern: Regex::new(pattern)? })
    }

    pub fn is_grade(&self, annotation: &str) -> bool {
        self.pattern.is_match(annotation.trim())
    }

    /// Grading groups in `text`, parentheses included, in order.
    pub fn find_grades<'t>(&self, text: &'t str) -> Vec<&'t str> {
        PARENTHETICAL_RE
            .captures_iter(text)
            .filter(|caps| self.is_grade(&caps[1]))
            .filter_map(|caps| caps.get(0).map(|m| m.as_str()))
            .collect()
    }

    /// Removes grading annotations, leaving every other group in place.
    pub fn strip_grades(&self, text: &str) -> String {
        strip_annotations(text, |inner| !self.is_grade(inner))
    }
}
