use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use smart_pantry::config::{parse_min_cookability, PantryConfig, DEFAULT_MIN_COOKABILITY};
use smart_pantry::matcher::{IngredientMatcher, MatchResult};
use smart_pantry::records;
use smart_pantry::shopping_list::{sort_by_name, ShoppingListAggregator, ShoppingListEntry};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_JSON_ENV_VAR: &str = "SMART_PANTRY_LOG_JSON";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Pantry matching and shopping lists over exported records",
    long_about = None
)]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank recipes by how well the pantry covers them
    Suggest {
        /// Path to a JSON array of pantry items
        #[arg(short, long)]
        pantry: PathBuf,
        /// Path to a JSON array of recipes
        #[arg(short, long)]
        recipes: PathBuf,
        /// Minimum cookability percentage (0-100)
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_MIN_COOKABILITY,
            value_parser = cookability_arg
        )]
        min_cookability: f64,
    },
    /// Aggregate a weekly meal plan into a shopping list
    ShoppingList {
        /// Path to a JSON meal plan
        #[arg(short, long)]
        plan: PathBuf,
    },
}

fn cookability_arg(value: &str) -> Result<f64, String> {
    parse_min_cookability(value).map_err(|e| e.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var(LOG_JSON_ENV_VAR)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_suggestions(results: &[MatchResult]) {
    if results.is_empty() {
        println!("No recipes meet the cookability threshold.");
        return;
    }
    for result in results {
        println!(
            "{} ({:.0}% match, {:.0}% cookable)",
            result.recipe.title, result.match_percentage, result.cookability_percentage
        );
        let gaps = result.shopping_gaps();
        if !gaps.is_empty() {
            println!("  need: {}", gaps.join(", "));
        }
    }
}

fn print_shopping_list(entries: &[ShoppingListEntry]) {
    if entries.is_empty() {
        println!("Nothing planned this week.");
        return;
    }
    for entry in entries {
        println!("  • {}", entry);
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = PantryConfig::from_env().context("Failed to read configuration")?;
    info!("Starting smart-pantry with {:?}", config);

    match cli.command {
        Command::Suggest {
            pantry,
            recipes,
            min_cookability,
        } => {
            let pantry_items = records::load_pantry_items(&pantry)
                .with_context(|| format!("Failed to load pantry from '{}'", pantry.display()))?;
            let recipes = records::load_recipes(&recipes)
                .with_context(|| format!("Failed to load recipes from '{}'", recipes.display()))?;

            let matcher = IngredientMatcher::with_config(config.matcher);
            let results = matcher.match_all_recipes(&recipes, &pantry_items, min_cookability);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_suggestions(&results);
            }
        }
        Command::ShoppingList { plan } => {
            let meal_plan = records::load_meal_plan(&plan)
                .with_context(|| format!("Failed to load meal plan from '{}'", plan.display()))?;

            let aggregator = ShoppingListAggregator::with_config(config.shopping_list);
            let mut entries = aggregator.build(&meal_plan);
            sort_by_name(&mut entries);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_shopping_list(&entries);
            }
        }
    }

    Ok(())
}
