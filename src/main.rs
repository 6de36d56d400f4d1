use anyhow::{Context, Result};
use recipe_cart::catalog::{load_recipe_table, RecipeCatalog};
use recipe_cart::cli::{parse_args, Command, SelectionArg};
use recipe_cart::config::CartConfig;
use recipe_cart::recipe_aggregator::{aggregate_selection, group_by_category, AggregatedLine};
use recipe_cart::recipe_parser::{Recipe, RecipeParser};
use recipe_cart::selection::SelectionStore;

const UNCATEGORIZED_TITLE: &str = "Без категории";

fn print_recipe(recipe: &Recipe) {
    println!("### {}", recipe.name);
    println!("Ингредиенты:");
    for ingredient in &recipe.ingredients {
        println!(
            "- {} — {} ({})",
            ingredient.name, ingredient.quantity_text, ingredient.category
        );
    }
    println!("Инструкция:\n{}", recipe.instructions);
    println!("---");
}

fn format_line(line: &AggregatedLine) -> String {
    if line.unit.is_empty() {
        return line.name.clone();
    }
    if line.total_amount.fract() == 0.0 {
        format!("{} — {} {}", line.name, line.total_amount, line.unit)
    } else {
        format!("{} — {:.2} {}", line.name, line.total_amount, line.unit)
    }
}

fn shop(catalog: &RecipeCatalog, recipes: &[SelectionArg], json: bool) -> Result<()> {
    let mut store = SelectionStore::new();
    for arg in recipes {
        store
            .add(catalog, &arg.recipe_id, arg.servings)
            .with_context(|| format!("Cannot add '{}' to the shopping list", arg.recipe_id))?;
    }

    let lines = aggregate_selection(&store, catalog)?;
    let groups = group_by_category(&lines);
    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    for group in &groups {
        let title = if group.category.is_empty() { UNCATEGORIZED_TITLE } else { group.category.as_str() };
        println!("## {}", title);
        for line in &group.lines {
            println!("- {}", format_line(line));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok(); // .env may carry RECIPE_CART_* overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli_args = parse_args();

    let config = CartConfig::load(cli_args.config.as_deref())
        .context("Failed to load normalization configuration")?;
    let parser = RecipeParser::new(&config).context("Invalid normalization configuration")?;

    let rows = load_recipe_table(&cli_args.recipe_file).with_context(|| {
        format!("Failed to load recipe table '{}'", cli_args.recipe_file.display())
    })?;
    let catalog = RecipeCatalog::from_raw(&parser, &rows);

    match cli_args.command {
        Command::List => catalog.recipes().iter().for_each(print_recipe),
        Command::Search { ingredient } => {
            let found = catalog.search_by_ingredient(&ingredient);
            if found.is_empty() {
                println!("Рецепты с ингредиентом '{}' не найдены.", ingredient);
            }
            found.into_iter().for_each(print_recipe);
        }
        Command::Shop { recipes, json } => shop(&catalog, &recipes, json)?,
    }

    Ok(())
}
