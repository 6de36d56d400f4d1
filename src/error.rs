use thiserror::Error;

/// Errors raised while loading or validating the normalization tables.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid grade pattern: {0}")]
    InvalidGradePattern(#[from] regex::Error),

    #[error("Synonym '{from}' maps to '{to}', which is itself a synonym key")]
    ChainedSynonym { from: String, to: String },

    #[error("Empty {0} in configuration")]
    EmptyEntry(&'static str),
}

/// Errors raised while turning the raw recipe table into a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Recipe table not found at: {0}")]
    NotFound(String),

    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Failed to read recipe table: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by selection mutations.
#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("Recipe '{0}' not found")]
    UnknownRecipe(String),

    #[error("Servings must be at least 1 (got {0})")]
    InvalidServings(u32),
}
