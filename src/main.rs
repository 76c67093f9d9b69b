// Copyright 2023 Remi Bernotavicius

use clap::Parser;
use clap::Subcommand;
use inventory::EmptyStockPolicy;
use std::path::PathBuf;

mod auth;
mod database;
mod error;
mod inventory;
mod recipes;
mod seed;
mod suggest;
mod ui;

pub use error::{AuthError, Error, Result, ValidationError};

/// Settings chosen at startup and shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub empty_stock_policy: EmptyStockPolicy,
}

#[derive(Parser, Debug)]
#[command(about = "Manage recipes and a kitchen inventory, and see what you can cook")]
struct Args {
    /// SQLite database to use instead of the one in the user data directory.
    #[arg(long, global = true, env = "KITCHEN_MANAGER_DATABASE")]
    database: Option<PathBuf>,

    /// What happens to an inventory item whose quantity would drop to zero or below.
    #[arg(long, global = true, value_enum, default_value_t)]
    empty_stock_policy: EmptyStockPolicy,

    #[arg(long, global = true, default_value = "info")]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, clap::Args)]
struct Credentials {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the desktop app.
    Run,
    /// Create an account.
    SignUp(Credentials),
    /// Add the common ingredients and the sample recipes to an account.
    Seed(Credentials),
    /// Print recipe suggestions for an account, best match first.
    Suggest(Credentials),
}

/// This is where the database and other user-data lives on-disk. On Linux it should be like:
/// `~/.local/share/kitchen_manager/`
fn data_path() -> Result<PathBuf> {
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| Error::Other("failed to get user home directory".into()))?;
    let path = dirs.data_dir().join("kitchen_manager");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

fn run(conn: database::Connection, config: Config) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Kitchen Manager",
        native_options,
        Box::new(|_cc| Ok(Box::new(ui::KitchenManager::new(conn, config)))),
    )
    .map_err(|e| Error::Other(format!("failed to run the app: {e}")))
}

fn sign_in(conn: &mut database::Connection, credentials: &Credentials) -> Result<auth::Session> {
    let mut session = auth::Session::new();
    session.sign_in(conn, &credentials.email, &credentials.password)?;
    Ok(session)
}

fn print_suggestions(conn: &mut database::Connection, credentials: &Credentials) -> Result<()> {
    let user = sign_in(conn, credentials)?.user_id()?;
    let suggestions = suggest::suggest(conn, user)?;
    if suggestions.is_empty() {
        println!("No suggestions. Add recipes and stock your inventory first.");
    }
    for scored in suggestions {
        println!("{:>3}%  {}", scored.match_percentage, scored.recipe.recipe.name);
        if !scored.missing_ingredients.is_empty() {
            let missing: Vec<_> = scored
                .missing_ingredients
                .iter()
                .map(|i| i.ingredient.name.as_str())
                .collect();
            println!("      missing: {}", missing.join(", "));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::SimpleLogger::new()
        .with_level(args.log_level)
        .env()
        .init()
        .map_err(|e| Error::Other(format!("failed to set up logging: {e}")))?;

    let config = Config {
        database_path: match args.database {
            Some(path) => path,
            None => data_path()?.join("data.sqlite"),
        },
        empty_stock_policy: args.empty_stock_policy,
    };
    log::info!(
        "using database {} with empty stock policy {}",
        config.database_path.display(),
        config.empty_stock_policy
    );

    let mut conn = database::establish_connection(&config.database_path)?;
    match args.commands {
        Commands::Run => run(conn, config)?,
        Commands::SignUp(credentials) => {
            let user = auth::sign_up(&mut conn, &credentials.email, &credentials.password)?;
            println!("created account {}", user.email);
        }
        Commands::Seed(credentials) => {
            let user = sign_in(&mut conn, &credentials)?.user_id()?;
            let report = seed::seed_sample_data(&mut conn, user)?;
            println!(
                "added {} ingredients and {} recipes",
                report.ingredients_added, report.recipes_added
            );
        }
        Commands::Suggest(credentials) => print_suggestions(&mut conn, &credentials)?,
    }
    Ok(())
}
