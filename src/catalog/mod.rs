pub mod data_loader;

pub use data_loader::{load_recipe_table, read_recipe_table, RawRecipe};

use rayon::prelude::*;
use std::collections::HashMap;

use crate::recipe_parser::{Recipe, RecipeParser};

/// Decomposed recipes keyed by their (unique) title.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

impl RecipeCatalog {
    /// Decomposes every raw row. When a title appears more than once the first
    /// row wins and later ones are ignored.
    pub fn from_raw(parser: &RecipeParser, rows: &[RawRecipe]) -> Self {
        let decomposed: Vec<Recipe> = rows
            .par_iter()
            .map(|row| parser.decompose(&row.name, &row.ingredients, &row.instructions))
            .collect();

        let mut catalog = Self::default();
        for recipe in decomposed {
            if recipe.name.is_empty() {
                log::warn!("Skipping recipe row without a title");
                continue;
            }
            if catalog.index.contains_key(&recipe.name) {
                log::warn!("Duplicate recipe '{}', keeping the first one", recipe.name);
                continue;
            }
            catalog.index.insert(recipe.name.clone(), catalog.recipes.len());
            catalog.recipes.push(recipe);
        }
        log::info!("Catalog holds {} recipes", catalog.recipes.len());
        catalog
    }

    pub fn get(&self, recipe_id: &str) -> Option<&Recipe> {
        self.index.get(recipe_id.trim()).map(|&idx| &self.recipes[idx])
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.index.contains_key(recipe_id.trim())
    }

    /// Recipes in source order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes with at least one ingredient whose normalized name contains
    /// `query` (case-insensitive).
    pub fn search_by_ingredient(&self, query: &str) -> Vec<&Recipe> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.recipes
            .iter()
            .filter(|recipe| recipe.ingredients.iter().any(|ing| ing.name.contains(&query)))
            .collect()
    }
}
