//! Ingredient name normalization: lower-casing, noise removal and a single
//! synonym substitution pass.

use std::collections::HashMap;

use crate::annotation::GradeMarker;
use crate::config::{CartConfig, GradePolicy};
use crate::error::ConfigError;
use crate::quantity_parser::strip_quantities;

fn is_boundary_noise(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '–' | '—' | '.')
}

/// Trims whitespace, dashes and periods at both ends of `text`.
pub fn trim_noise(text: &str) -> &str {
    text.trim_matches(is_boundary_noise)
}

#[derive(Debug, Clone)]
pub struct NameNormalizer {
    synonyms: HashMap<String, String>,
    grades: GradeMarker,
    grade_policy: GradePolicy,
}

impl NameNormalizer {
    pub fn new(config: &CartConfig) -> Result<Self, ConfigError> {
        let mut normalizer = Self {
            synonyms: HashMap::new(),
            grades: GradeMarker::new(&config.grade_pattern)?,
            grade_policy: config.grade_policy,
        };

        let mut synonyms = HashMap::with_capacity(config.synonyms.len());
        for entry in &config.synonyms {
            let from = normalizer.clean(&entry.from);
            let to = normalizer.clean(&entry.to);
            if from.is_empty() || to.is_empty() {
                return Err(ConfigError::EmptyEntry("synonym"));
            }
            if let Some(previous) = synonyms.insert(from.clone(), to) {
                log::warn!("Synonym '{}' defined twice, dropping '{}'", from, previous);
            }
        }
        synonyms.retain(|from, to| from != to);
        // One substitution pass only: a target must already be canonical.
        for (from, to) in &synonyms {
            if synonyms.contains_key(to) {
                return Err(ConfigError::ChainedSynonym { from: from.clone(), to: to.clone() });
            }
        }

        normalizer.synonyms = synonyms;
        Ok(normalizer)
    }

    pub fn grade_policy(&self) -> GradePolicy {
        self.grade_policy
    }

    /// Canonical form of `raw_name`. Idempotent.
    ///
    /// With preserved grades the synonym is looked up on the name without its
    /// grading groups, which are appended back to the canonical name.
    pub fn normalize_name(&self, raw_name: &str) -> String {
        let cleaned = self.clean(raw_name);
        if let Some(canonical) = self.synonyms.get(&cleaned) {
            return canonical.clone();
        }
        if self.grade_policy == GradePolicy::Preserve {
            let graded = self.grades.find_grades(&cleaned);
            if !graded.is_empty() {
                let base = self.clean(&self.grades.strip_grades(&cleaned));
                if let Some(canonical) = self.synonyms.get(&base) {
                    return format!("{} {}", canonical, graded.join(" "));
                }
            }
        }
        cleaned
    }

    fn clean(&self, raw_name: &str) -> String {
        let mut current = raw_name.to_lowercase();
        // Removing a quantity can bring two fragments together into a new one,
        // so repeat until nothing changes.
        loop {
            let mut next = strip_quantities(&current);
            if self.grade_policy == GradePolicy::Strip {
                next = self.grades.strip_grades(&next);
            }
            let next = next.split_whitespace().collect::<Vec<_>>().join(" ");
            let next = trim_noise(&next).to_string();
            if next == current {
                return next;
            }
            current = next;
        }
    }
}
