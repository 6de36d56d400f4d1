use serde::{Deserialize, Serialize};

use crate::annotation::{first_annotation, strip_annotations, GradeMarker};
use crate::category_classifier::CategoryClassifier;
use crate::config::{CartConfig, GradePolicy};
use crate::error::ConfigError;
use crate::name_normalizer::{trim_noise, NameNormalizer};
use crate::quantity_parser::{find_quantity, strip_quantities};

/// One ingredient line of a recipe, structured.
///
/// `quantity_text` keeps the original substring (e.g. `"100 г"`); it is parsed
/// into numbers only when a shopping list is aggregated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientRecord {
    pub name: String,
    pub quantity_text: String,
    pub category: String,
    pub recipe_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    #[serde(alias = "title")]
    pub name: String,
    pub ingredients: Vec<IngredientRecord>,
    pub instructions: String,
}

/// Splits raw ingredient blobs into [`IngredientRecord`]s.
#[derive(Debug, Clone)]
pub struct RecipeParser {
    normalizer: NameNormalizer,
    classifier: CategoryClassifier,
    grades: GradeMarker,
    filler_marker: String,
}

impl RecipeParser {
    pub fn new(config: &CartConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            normalizer: NameNormalizer::new(config)?,
            classifier: CategoryClassifier::new(config)?,
            grades: GradeMarker::new(&config.grade_pattern)?,
            filler_marker: config.filler_marker.trim().to_lowercase(),
        })
    }

    pub fn is_filler(&self, line: &str) -> bool {
        line.to_lowercase().contains(&self.filler_marker)
    }

    /// Structures a single ingredient line. Returns `None` only for blank and
    /// filler lines; a line with a quantity but no name yields an empty name.
    pub fn parse_line(&self, recipe_id: &str, line: &str) -> Option<IngredientRecord> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if self.is_filler(line) {
            log::debug!("[{}] skipping filler line '{}'", recipe_id, line);
            return None;
        }

        let quantity_text = find_quantity(line)
            .map(|found| found.text.trim().to_string())
            .unwrap_or_default();
        let explicit_category = first_annotation(line).unwrap_or("");

        let keep_grades = self.normalizer.grade_policy() == GradePolicy::Preserve;
        let without_notes = strip_annotations(line, |inner| keep_grades && self.grades.is_grade(inner));
        let without_quantity = strip_quantities(&without_notes);
        let name = self.normalizer.normalize_name(trim_noise(&without_quantity));
        if name.is_empty() {
            log::debug!("[{}] no ingredient name in line '{}'", recipe_id, line);
        }

        let category = self.classifier.classify(&name, explicit_category);
        Some(IngredientRecord {
            name,
            quantity_text,
            category,
            recipe_id: recipe_id.to_string(),
        })
    }

    /// Lazily structures every line of `blob`, in source order. The iterator is
    /// `Clone`, so a copy taken before iterating restarts from the first line.
    pub fn ingredient_records<'a>(
        &'a self,
        recipe_id: &'a str,
        blob: &'a str,
    ) -> impl Iterator<Item = IngredientRecord> + Clone + 'a {
        blob.split('\n').filter_map(move |line| self.parse_line(recipe_id, line))
    }

    pub fn decompose(&self, recipe_id: &str, raw_ingredient_blob: &str, instructions: &str) -> Recipe {
        let recipe_id = recipe_id.trim();
        Recipe {
            name: recipe_id.to_string(),
            ingredients: self.ingredient_records(recipe_id, raw_ingredient_blob).collect(),
            instructions: instructions.to_string(),
        }
    }
}
