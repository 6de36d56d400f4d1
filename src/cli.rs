use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the recipe table (CSV with Название, Ингредиенты, Инструкция)
    #[arg(short, long, default_value = "recipes.csv")]
    pub recipe_file: PathBuf,

    /// TOML file overriding synonyms, category rules and the grade policy
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every recipe with its ingredients
    List,
    /// Find recipes that use an ingredient
    Search { ingredient: String },
    /// Build a shopping list from recipes given as NAME or NAME=SERVINGS
    Shop {
        #[arg(required = true, value_parser = parse_selection_arg)]
        recipes: Vec<SelectionArg>,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionArg {
    pub recipe_id: String,
    pub servings: u32,
}

/// `NAME=SERVINGS` when the part after the last `=` is a serving count,
/// otherwise the whole argument is the recipe name with one serving.
pub fn parse_selection_arg(arg: &str) -> Result<SelectionArg, String> {
    let (recipe_id, servings) = arg
        .rsplit_once('=')
        .and_then(|(name, count)| count.trim().parse::<u32>().ok().map(|n| (name, n)))
        .unwrap_or((arg, 1));
    let recipe_id = recipe_id.trim();
    if recipe_id.is_empty() {
        return Err("recipe name is empty".to_string());
    }
    Ok(SelectionArg { recipe_id: recipe_id.to_string(), servings })
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_arg() {
        assert_eq!(
            parse_selection_arg("Сырники=3"),
            Ok(SelectionArg { recipe_id: "Сырники".to_string(), servings: 3 })
        );
        assert_eq!(parse_selection_arg(" Шарлотка ").unwrap().servings, 1);
        assert!(parse_selection_arg("=2").is_err());
        assert_eq!(parse_selection_arg("Салат=0").unwrap().servings, 0);
    }

    #[test]
    fn test_equals_sign_in_recipe_name() {
        assert_eq!(
            parse_selection_arg("Салат=Оливье"),
            Ok(SelectionArg { recipe_id: "Салат=Оливье".to_string(), servings: 1 })
        );
        assert_eq!(parse_selection_arg("Шарлотка=много").unwrap().recipe_id, "Шарлотка=много");
        assert_eq!(
            parse_selection_arg("Салат=Оливье=2"),
            Ok(SelectionArg { recipe_id: "Салат=Оливье".to_string(), servings: 2 })
        );
    }

    #[test]
    fn test_shop_command() {
        let cli = Cli::try_parse_from(["recipe-cart", "-r", "data.csv", "shop", "Сырники=2", "Шарлотка", "--json"]).unwrap();
        assert_eq!(cli.recipe_file, PathBuf::from("data.csv"));
        match cli.command {
            Command::Shop { recipes, json } => {
                assert!(json);
                assert_eq!(recipes.len(), 2);
                assert_eq!(recipes[0].servings, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_shop_requires_recipes() {
        assert!(Cli::try_parse_from(["recipe-cart", "shop"]).is_err());
    }
}
