use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;

use recipe_browser::{open_browser, render, BrowserConfig, Intent};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Print HTML fragments instead of plain text
    #[arg(long, global = true)]
    html: bool,

    /// Favorites file (overrides the configured storage_path)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// A batch of random recipes
    Random {
        /// How many recipes to fetch (defaults to random_batch_size)
        #[arg(long)]
        count: Option<usize>,
    },
    /// The featured recipes strip
    Featured,
    /// Recipes in a category, e.g. Seafood
    Category { name: String },
    /// Recipes whose name matches a search term
    Search { term: String },
    /// One random recipe
    Surprise,
    /// Saved recipes
    Favorites,
    /// Full details of one recipe
    Show { id: String },
    /// Save or unsave a recipe
    Toggle { id: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let mut config = BrowserConfig::load()?;
    if let Some(store) = args.store {
        config.storage_path = store;
    }
    debug!("{:#?}", config);

    let intent = match args.command {
        Command::Random { count } => {
            if let Some(count) = count {
                config.random_batch_size = count;
            }
            Intent::AllRecipes
        }
        Command::Featured => Intent::Featured,
        Command::Category { name } => Intent::Category(name),
        Command::Search { term } => Intent::Search(term),
        Command::Surprise => Intent::Surprise,
        Command::Favorites => Intent::Favorites,
        Command::Show { id } => Intent::Detail(id),
        Command::Toggle { id } => Intent::ToggleFavorite(id),
    };

    let mut browser = open_browser(&config)?;
    let view = browser.handle(intent).await;

    let output = if args.html {
        render::html(&view)
    } else {
        render::text(&view)
    };

    if view.is_failure() {
        eprint!("{}", output);
        Ok(ExitCode::FAILURE)
    } else {
        print!("{}", output);
        Ok(ExitCode::SUCCESS)
    }
}
