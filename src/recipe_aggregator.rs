use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::RecipeCatalog;
use crate::error::SelectionError;
use crate::quantity_parser::parse_quantity;
use crate::recipe_parser::Recipe;
use crate::selection::SelectionStore;

/// Total of one ingredient across the selected recipes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AggregatedLine {
    pub name: String,
    pub category: String,
    /// Empty when the quantity could not be parsed.
    pub unit: String,
    pub total_amount: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryGroup {
    /// Empty for the uncategorized bucket.
    pub category: String,
    pub lines: Vec<AggregatedLine>,
}

// Named categories sort before the uncategorized bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CategoryKey {
    Named(String),
    Uncategorized,
}

impl CategoryKey {
    fn new(category: &str) -> Self {
        if category.is_empty() {
            CategoryKey::Uncategorized
        } else {
            CategoryKey::Named(category.to_string())
        }
    }

    fn into_string(self) -> String {
        match self {
            CategoryKey::Named(name) => name,
            CategoryKey::Uncategorized => String::new(),
        }
    }
}

/// Sums scaled quantities per (name, category, unit).
///
/// Quantities are re-parsed from each record's `quantity_text`. Unparsed
/// quantities are kept as 0.0 with an empty unit so the ingredient still shows
/// up on the list. Output is sorted by category (uncategorized last), name and
/// unit.
pub fn aggregate<'a, I>(selection: I) -> Vec<AggregatedLine>
where
    I: IntoIterator<Item = (&'a Recipe, u32)>,
{
    let mut totals: BTreeMap<(CategoryKey, String, String), f64> = BTreeMap::new();

    for (recipe, servings) in selection {
        let multiplier = f64::from(servings);
        for ingredient in &recipe.ingredients {
            let quantity = parse_quantity(&ingredient.quantity_text);
            if !quantity.is_parsed() {
                log::debug!(
                    "[{}] no quantity for '{}' ('{}')",
                    recipe.name,
                    ingredient.name,
                    ingredient.quantity_text
                );
            }
            let key = (
                CategoryKey::new(&ingredient.category),
                ingredient.name.clone(),
                quantity.unit,
            );
            *totals.entry(key).or_insert(0.0) += quantity.amount * multiplier;
        }
    }

    totals
        .into_iter()
        .map(|((category, name, unit), total_amount)| AggregatedLine {
            name,
            category: category.into_string(),
            unit,
            total_amount,
        })
        .collect()
}

/// Aggregates the recipes currently held in `store`.
pub fn aggregate_selection(
    store: &SelectionStore,
    catalog: &RecipeCatalog,
) -> Result<Vec<AggregatedLine>, SelectionError> {
    let resolved = store.resolve(catalog)?;
    Ok(aggregate(resolved))
}

/// Buckets lines by category, named categories first, uncategorized last.
pub fn group_by_category(lines: &[AggregatedLine]) -> Vec<CategoryGroup> {
    let mut groups: BTreeMap<CategoryKey, Vec<AggregatedLine>> = BTreeMap::new();
    for line in lines {
        groups
            .entry(CategoryKey::new(&line.category))
            .or_default()
            .push(line.clone());
    }
    groups
        .into_iter()
        .map(|(category, lines)| CategoryGroup {
            category: category.into_string(),
            lines,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_parser::IngredientRecord;

    fn recipe(name: &str, ingredients: &[(&str, &str, &str)]) -> Recipe {
        Recipe {
            name: name.to_string(),
            ingredients: ingredients
                .iter()
                .map(|(ing, qty, cat)| IngredientRecord {
                    name: ing.to_string(),
                    quantity_text: qty.to_string(),
                    category: cat.to_string(),
                    recipe_id: name.to_string(),
                })
                .collect(),
            instructions: String::new(),
        }
    }

    fn line(name: &str, category: &str, unit: &str, total_amount: f64) -> AggregatedLine {
        AggregatedLine {
            name: name.to_string(),
            category: category.to_string(),
            unit: unit.to_string(),
            total_amount,
        }
    }

    #[test]
    fn test_servings_multiply() {
        let sweet = recipe("Сладкое", &[("сахар", "100 г", "бакалея")]);
        assert_eq!(aggregate([(&sweet, 3)]), vec![line("сахар", "бакалея", "г", 300.0)]);
    }

    #[test]
    fn test_split_servings_match_combined() {
        let sweet = recipe("Сладкое", &[("сахар", "100 г", "бакалея"), ("яйца", "2 шт", "яйца")]);
        assert_eq!(aggregate([(&sweet, 1), (&sweet, 2)]), aggregate([(&sweet, 3)]));
    }

    #[test]
    fn test_sums_across_recipes_by_name_category_unit() {
        let a = recipe("А", &[("сахар", "100 г", "бакалея"), ("молоко", "200 мл", "молочные продукты")]);
        let b = recipe("Б", &[("сахар", "50 г", "бакалея"), ("сахар", "1 кг", "бакалея"), ("сахар", "1 ст.л", "")]);

        let totals = aggregate([(&a, 1), (&b, 2)]);
        assert_eq!(
            totals,
            vec![
                line("сахар", "бакалея", "г", 200.0),
                line("сахар", "бакалея", "кг", 2.0),
                line("молоко", "молочные продукты", "мл", 200.0),
                line("сахар", "", "ст.л", 2.0),
            ]
        );
    }

    #[test]
    fn test_unparsed_quantities_are_kept() {
        let a = recipe("А", &[("соль", "", "по вкусу"), ("вода", "стакан", "")]);
        let totals = aggregate([(&a, 4)]);
        assert_eq!(totals, vec![line("соль", "по вкусу", "", 0.0), line("вода", "", "", 0.0)]);
    }

    #[test]
    fn test_empty_selection() {
        assert!(aggregate(Vec::<(&Recipe, u32)>::new()).is_empty());
    }

    #[test]
    fn test_group_by_category_uncategorized_last() {
        let lines = vec![
            line("вода", "", "л", 1.0),
            line("сахар", "бакалея", "г", 100.0),
            line("мука", "бакалея", "г", 200.0),
            line("яйца", "яйца", "шт", 3.0),
        ];
        let groups = group_by_category(&lines);
        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["бакалея", "яйца", ""]);
        assert_eq!(groups[0].lines.len(), 2);
    }
}
