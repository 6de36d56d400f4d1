use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Prefix for environment overrides, e.g. `RECIPE_CART_GRADE_POLICY=preserve`.
pub const ENV_PREFIX: &str = "RECIPE_CART";

/// What to do with a grading annotation such as `(С1)` in an ingredient name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradePolicy {
    /// Drop the annotation so all grades aggregate under one name.
    #[default]
    Strip,
    /// Keep the annotation as part of the name.
    Preserve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub from: String,
    pub to: String,
}

/// A substring rule for the category classifier. Rules are evaluated in
/// configuration order and the first hit wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: String,
}

/// Static tables driving normalization and classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Lines containing this phrase are not ingredients.
    #[serde(default = "default_filler_marker")]
    pub filler_marker: String,
    #[serde(default)]
    pub grade_policy: GradePolicy,
    /// Matched against a whole parenthetical annotation.
    #[serde(default = "default_grade_pattern")]
    pub grade_pattern: String,
    /// Category assigned when the explicit annotation is a grading code.
    #[serde(default = "default_grade_category")]
    pub grade_category: String,
    #[serde(default = "default_synonyms")]
    pub synonyms: Vec<SynonymEntry>,
    #[serde(default = "default_rules")]
    pub rules: Vec<CategoryRule>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            filler_marker: default_filler_marker(),
            grade_policy: GradePolicy::default(),
            grade_pattern: default_grade_pattern(),
            grade_category: default_grade_category(),
            synonyms: default_synonyms(),
            rules: default_rules(),
        }
    }
}

impl CartConfig {
    /// Loads the built-in defaults, overlaid by an optional TOML file and then
    /// by `RECIPE_CART_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let config: CartConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        log::debug!(
            "Loaded configuration: {} synonyms, {} rules, grade policy {:?}",
            config.synonyms.len(),
            config.rules.len(),
            config.grade_policy
        );
        Ok(config)
    }

    /// Loads configuration from a TOML string, without environment overrides.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: CartConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.filler_marker.trim().is_empty() {
            return Err(ConfigError::EmptyEntry("filler marker"));
        }
        if self.rules.iter().any(|rule| rule.keyword.trim().is_empty()) {
            return Err(ConfigError::EmptyEntry("rule keyword"));
        }
        if self.synonyms.iter().any(|s| s.from.trim().is_empty() || s.to.trim().is_empty()) {
            return Err(ConfigError::EmptyEntry("synonym"));
        }
        Ok(())
    }
}

fn default_filler_marker() -> String {
    "для начинки".to_string()
}

fn default_grade_pattern() -> String {
    // Egg grades: С0-С3, СВ (высшая), СО (отборная), Д0-Д3 (диетические)
    r"(?i)^[сcдd]\s?[0-3овob]$".to_string()
}

fn default_grade_category() -> String {
    "яйца".to_string()
}

fn default_synonyms() -> Vec<SynonymEntry> {
    [
        ("яйцо", "яйца"),
        ("яйцо куриное", "яйца"),
        ("яйца куриные", "яйца"),
        ("сахара", "сахар"),
        ("сахарный песок", "сахар"),
        ("муки", "мука"),
        ("мука пшеничная", "мука"),
        ("соли", "соль"),
        ("молока", "молоко"),
        ("сметаны", "сметана"),
        ("масла сливочного", "масло сливочное"),
        ("сливочное масло", "масло сливочное"),
        ("ванильного сахара", "ванильный сахар"),
        ("разрыхлителя", "разрыхлитель"),
        ("изюма", "изюм"),
    ]
    .into_iter()
    .map(|(from, to)| SynonymEntry { from: from.to_string(), to: to.to_string() })
    .collect()
}

fn default_rules() -> Vec<CategoryRule> {
    [
        ("яйц", "яйца"),
        // before "масло", so butter lands in dairy
        ("масло сливочное", "молочные продукты"),
        ("творог", "молочные продукты"),
        ("творож", "молочные продукты"),
        ("сыр", "молочные продукты"),
        ("сметан", "молочные продукты"),
        ("молок", "молочные продукты"),
        ("кефир", "молочные продукты"),
        ("сливк", "молочные продукты"),
        ("йогурт", "молочные продукты"),
        ("масло", "масла и жиры"),
        // before "сахар", so vanilla sugar is a spice
        ("ванил", "специи"),
        ("корица", "специи"),
        ("соль", "специи"),
        ("соли", "специи"),
        ("перец", "специи"),
        ("мук", "бакалея"),
        ("сахар", "бакалея"),
        ("крахмал", "бакалея"),
        ("манк", "бакалея"),
        ("разрыхлит", "бакалея"),
        ("сода", "бакалея"),
        ("изюм", "сухофрукты"),
        ("кураг", "сухофрукты"),
        ("чернослив", "сухофрукты"),
        ("ягод", "фрукты и ягоды"),
        ("яблок", "фрукты и ягоды"),
        ("банан", "фрукты и ягоды"),
        ("лимон", "фрукты и ягоды"),
        ("морков", "овощи"),
        ("тыкв", "овощи"),
    ]
    .into_iter()
    .map(|(keyword, category)| CategoryRule {
        keyword: keyword.to_string(),
        category: category.to_string(),
    })
    .collect()
}
