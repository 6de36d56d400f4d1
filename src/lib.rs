pub mod annotation;
pub mod catalog;
pub mod category_classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod name_normalizer;
pub mod quantity_parser;
pub mod recipe_aggregator;
pub mod recipe_parser;
pub mod selection;

pub use error::{CatalogError, ConfigError, SelectionError};
