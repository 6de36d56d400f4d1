use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::error::CatalogError;

// Required column headers of the raw recipe table
pub const NAME_COL: &str = "Название";
pub const INGREDIENTS_COL: &str = "Ингредиенты";
pub const INSTRUCTIONS_COL: &str = "Инструкция";

/// One row of the raw recipe table, before decomposition.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RawRecipe {
    pub name: String,
    /// Newline-separated ingredient lines.
    pub ingredients: String,
    pub instructions: String,
}

pub fn load_recipe_table(csv_path: &Path) -> Result<Vec<RawRecipe>, CatalogError> {
    if !csv_path.exists() {
        return Err(CatalogError::NotFound(csv_path.display().to_string()));
    }
    let file = std::fs::File::open(csv_path)?;
    read_recipe_table(file)
}

pub fn read_recipe_table<R: Read>(reader: R) -> Result<Vec<RawRecipe>, CatalogError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let position = |col: &str| headers.iter().position(|h| h == col);

    let (name_idx, ingredients_idx, instructions_idx) = match (
        position(NAME_COL),
        position(INGREDIENTS_COL),
        position(INSTRUCTIONS_COL),
    ) {
        (Some(n), Some(i), Some(s)) => (n, i, s),
        _ => {
            let missing = [NAME_COL, INGREDIENTS_COL, INSTRUCTIONS_COL]
                .iter()
                .filter(|col| position(**col).is_none())
                .map(|col| col.to_string())
                .collect();
            return Err(CatalogError::MissingColumns(missing));
        }
    };

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
        rows.push(RawRecipe {
            name: field(name_idx).trim().to_string(),
            ingredients: field(ingredients_idx),
            instructions: field(instructions_idx),
        });
    }
    log::debug!("Read {} raw recipe rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv_file() -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, " {} ,{}, {}", NAME_COL, INGREDIENTS_COL, INSTRUCTIONS_COL)?;
        writeln!(file, "Сырники ,\"200 г творога\n1 шт яйцо\",Смешать.")?;
        writeln!(file, "Чай,\"1 ч.л заварки\"")?; // short row
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_load_recipe_table_success() -> Result<()> {
        let file = create_test_csv_file()?;
        let rows = load_recipe_table(file.path())?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Сырники");
        assert_eq!(rows[0].ingredients, "200 г творога\n1 шт яйцо");
        assert_eq!(rows[0].instructions, "Смешать.");
        assert_eq!(rows[1].instructions, "");
        Ok(())
    }

    #[test]
    fn test_missing_columns_listed() {
        let data = format!("{},Рецепт\nБорщ,варить\n", NAME_COL);
        let err = read_recipe_table(data.as_bytes()).unwrap_err();
        match err {
            CatalogError::MissingColumns(cols) => {
                assert_eq!(cols, vec![INGREDIENTS_COL.to_string(), INSTRUCTIONS_COL.to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_file_not_found() {
        let result = load_recipe_table(Path::new("this_file_does_not_exist.csv"));
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }
}
