use serde::{Deserialize, Serialize};

use crate::catalog::RecipeCatalog;
use crate::error::SelectionError;
use crate::recipe_parser::Recipe;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SelectionEntry {
    pub recipe_id: String,
    pub servings: u32,
}

/// The recipes picked for one shopping session, with serving counts.
///
/// Every mutation is validated before the store is touched, so a failed call
/// leaves the selection exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    entries: Vec<SelectionEntry>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `servings` of a recipe. Adding a recipe that is already selected
    /// increases its serving count. Returns the resulting count.
    pub fn add(
        &mut self,
        catalog: &RecipeCatalog,
        recipe_id: &str,
        servings: u32,
    ) -> Result<u32, SelectionError> {
        if servings == 0 {
            return Err(SelectionError::InvalidServings(servings));
        }
        let recipe = catalog
            .get(recipe_id)
            .ok_or_else(|| SelectionError::UnknownRecipe(recipe_id.trim().to_string()))?;

        if let Some(entry) = self.entries.iter_mut().find(|e| e.recipe_id == recipe.name) {
            entry.servings = entry.servings.saturating_add(servings);
            log::debug!("'{}' now has {} servings", entry.recipe_id, entry.servings);
            return Ok(entry.servings);
        }

        self.entries.push(SelectionEntry {
            recipe_id: recipe.name.clone(),
            servings,
        });
        log::debug!("Added '{}' with {} servings", recipe.name, servings);
        Ok(servings)
    }

    /// Removes a recipe from the selection. Unknown ids are a no-op.
    pub fn remove(&mut self, recipe_id: &str) -> bool {
        let recipe_id = recipe_id.trim();
        let before = self.entries.len();
        self.entries.retain(|e| e.recipe_id != recipe_id);
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn servings(&self, recipe_id: &str) -> Option<u32> {
        let recipe_id = recipe_id.trim();
        self.entries.iter().find(|e| e.recipe_id == recipe_id).map(|e| e.servings)
    }

    /// Entries in the order they were first added.
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs each entry with its recipe from `catalog`.
    pub fn resolve<'c>(
        &self,
        catalog: &'c RecipeCatalog,
    ) -> Result<Vec<(&'c Recipe, u32)>, SelectionError> {
        self.entries
            .iter()
            .map(|entry| {
                catalog
                    .get(&entry.recipe_id)
                    .map(|recipe| (recipe, entry.servings))
                    .ok_or_else(|| SelectionError::UnknownRecipe(entry.recipe_id.clone()))
            })
            .collect()
    }
}
