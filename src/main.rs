//! Brew Calculator
//!
//! Command line front end for the recipe engine.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use strum::IntoEnumIterator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use brew_calculator::catalog::{self, Catalog};
use brew_calculator::composer::{self, ComposerSettings};
use brew_calculator::formulas::DEFAULT_EFFICIENCY;
use brew_calculator::models::{BitternessLevel, CommercialBeer, FlavorTag, RecipeTarget, Style};
use brew_calculator::{db, import, matcher, report};

#[derive(Parser)]
#[command(name = "brew-calculator")]
#[command(about = "Recipe calculator for all-grain beer brewing")]
struct Cli {
    /// Path to the SQLite ingredient catalog
    #[arg(short, long, default_value = "brew_catalog.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Design a recipe
    Brew {
        /// Beer style (e.g., "IPA", "Stout")
        style: Style,

        /// Batch volume in liters
        #[arg(short, long, default_value = "20")]
        volume: f64,

        /// Target alcohol by volume (%)
        #[arg(short, long, default_value = "6.0")]
        abv: f64,

        /// Bitterness tier: minimal, light, medium, strong, extreme
        #[arg(short, long, default_value = "medium")]
        bitterness: BitternessLevel,

        /// Exact bitterness in IBU, overrides the tier
        #[arg(long)]
        ibu: Option<f64>,

        /// Flavor tag (repeat for two, e.g. -f citrus -f biscuit)
        #[arg(short, long = "flavor")]
        flavors: Vec<FlavorTag>,

        /// Mash extraction efficiency (0-1]
        #[arg(short, long, default_value_t = DEFAULT_EFFICIENCY)]
        efficiency: f64,

        /// Print the recipe as JSON instead of a brew sheet
        #[arg(long)]
        json: bool,

        /// Also suggest a commercial beer to taste
        #[arg(short, long)]
        suggest: bool,
    },

    /// Find the commercial beer closest to a style, flavor and strength
    Match {
        style: Style,

        #[arg(short, long, default_value = "6.0")]
        abv: f64,

        #[arg(short, long = "flavor")]
        flavors: Vec<FlavorTag>,
    },

    /// Import malts, hops and beers from *.catalog files
    Import {
        /// Directory to scan for catalog files
        source_dir: PathBuf,

        /// Clear existing data before import
        #[arg(long)]
        clear: bool,
    },

    /// List malts in the catalog
    ListMalts,

    /// List hops in the catalog
    ListHops,

    /// List styles and flavor tags
    ListStyles,

    /// Initialize empty database with schema
    Init,

    /// Load the built-in malts, hops and commercial beers
    LoadSample,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut conn = Connection::open(&cli.database)?;
    db::init_schema(&conn)?;

    match cli.command {
        Commands::Brew {
            style,
            volume,
            abv,
            bitterness,
            ibu,
            flavors,
            efficiency,
            json,
            suggest,
        } => {
            let target = RecipeTarget::new(style, volume, abv)
                .with_bitterness(ibu.unwrap_or(bitterness.ibu()))
                .with_flavors(flavors);
            let catalog = load_catalog(&conn)?;
            let settings = ComposerSettings { efficiency };

            let recipe = composer::compose_recipe_with(&target, &catalog, &settings)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                print!("{}", report::render_brew_sheet(&target, &recipe));
                println!();
                println!("{}", composer::summarize_recipe(&recipe, &target));
            }

            if suggest {
                let beers = load_beers(&conn)?;
                match matcher::find_match(&beers, style, &target.flavor_tags, abv) {
                    Some(m) => println!(
                        "Try: {} by {} ({}%, score {})",
                        m.beer.name, m.beer.brewery, m.beer.abv, m.score
                    ),
                    None => println!("No commercial beer close enough to suggest."),
                }
            }
        }

        Commands::Match { style, abv, flavors } => {
            let tags: BTreeSet<FlavorTag> = flavors.into_iter().collect();
            let beers = load_beers(&conn)?;
            match matcher::find_match(&beers, style, &tags, abv) {
                Some(m) => {
                    println!("{} ({})", m.beer.name, m.beer.brewery);
                    println!("  Style: {}  ABV: {}%", m.beer.style, m.beer.abv);
                    println!("  Notes: {}", m.beer.flavor_notes);
                    println!("  Score: {}", m.score);
                }
                None => println!("No match scoring {} or more.", matcher::MIN_MATCH_SCORE),
            }
        }

        Commands::Import { source_dir, clear } => {
            if clear {
                println!("Clearing existing catalog...");
                db::clear_catalog(&conn)?;
            }

            let stats = import::import_to_database(&mut conn, &source_dir)?;
            println!("\n{}", stats);
        }

        Commands::ListMalts => {
            let catalog = load_catalog(&conn)?;
            println!("{:<24} {:>10} {:>10}", "Malt", "Yield (%)", "Color (EBC)");
            println!("{}", "-".repeat(46));
            for m in catalog.malts() {
                println!("{:<24} {:>10.0} {:>10.0}", m.name, m.extraction_yield_percent, m.color_ebc);
            }
        }

        Commands::ListHops => {
            let catalog = load_catalog(&conn)?;
            println!("{:<24} {:>10}", "Hop", "Alpha (%)");
            println!("{}", "-".repeat(35));
            for h in catalog.hops() {
                println!("{:<24} {:>10.1}", h.name, h.alpha_acid_percent);
            }
        }

        Commands::ListStyles => {
            println!("Styles:");
            for style in Style::iter() {
                println!("  {:<8} {}", style, style.description());
            }
            println!("Flavor tags:");
            for tag in FlavorTag::iter() {
                println!("  {}", tag);
            }
        }

        Commands::Init => {
            println!("Database initialized at: {}", cli.database.display());
        }

        Commands::LoadSample => {
            load_sample_data(&conn)?;
            println!("Sample data loaded successfully!");
        }
    }

    Ok(())
}

/// Built-in catalog extended by whatever the database holds
fn load_catalog(conn: &Connection) -> Result<Catalog> {
    let catalog = db::load_merged_catalog(conn)?;
    info!(malts = catalog.malt_count(), hops = catalog.hop_count(), "loaded catalog");
    Ok(catalog)
}

fn load_beers(conn: &Connection) -> Result<Vec<CommercialBeer>> {
    let beers = db::load_merged_beers(conn)?;
    info!(beers = beers.len(), "loaded commercial beers");
    Ok(beers)
}

/// Seed the database with the built-in catalog
fn load_sample_data(conn: &Connection) -> Result<()> {
    db::clear_catalog(conn)?;

    let malts = catalog::builtin_malts();
    for malt in &malts {
        db::upsert_malt(conn, malt)?;
    }

    let hops = catalog::builtin_hops();
    for hop in &hops {
        db::upsert_hop(conn, hop)?;
    }

    let beers = matcher::builtin_beers();
    for beer in &beers {
        db::upsert_commercial_beer(conn, beer)?;
    }

    println!(
        "Loaded {} malts, {} hops and {} commercial beers",
        malts.len(),
        hops.len(),
        beers.len()
    );
    Ok(())
}
