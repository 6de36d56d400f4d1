use crate::annotation::GradeMarker;
use crate::config::{CartConfig, CategoryRule};
use crate::error::ConfigError;

/// Assigns a shopping-list category to a normalized ingredient name.
///
/// An explicit annotation from the ingredient line takes precedence (with
/// grading codes remapped to a fixed category). Otherwise the ordered rule list
/// is scanned top to bottom and the first keyword contained in the name wins.
/// An empty string means "uncategorized".
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
    grades: GradeMarker,
    grade_category: String,
    filler_marker: String,
}

impl CategoryClassifier {
    pub fn new(config: &CartConfig) -> Result<Self, ConfigError> {
        let rules = config
            .rules
            .iter()
            .map(|rule| CategoryRule {
                keyword: rule.keyword.trim().to_lowercase(),
                category: rule.category.trim().to_string(),
            })
            .collect();

        Ok(Self {
            rules,
            grades: GradeMarker::new(&config.grade_pattern)?,
            grade_category: config.grade_category.trim().to_string(),
            filler_marker: config.filler_marker.trim().to_lowercase(),
        })
    }

    pub fn classify(&self, normalized_name: &str, explicit_category: &str) -> String {
        let explicit = explicit_category.trim();
        if !explicit.is_empty() {
            if self.grades.is_grade(explicit) {
                return self.grade_category.clone();
            }
            return explicit.to_string();
        }

        if normalized_name == self.filler_marker {
            return String::new();
        }

        self.rules
            .iter()
            .find(|rule| normalized_name.contains(rule.keyword.as_str()))
            .map(|rule| rule.category.clone())
            .unwrap_or_default()
    }
}
