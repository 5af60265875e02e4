use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use clu_lib::commands::{render_json, render_text, OutputOptions, Resolver};
use clu_lib::config::Config;
use clu_lib::cty::{read_version, AbbreviationIndex, AreaTable, Database};
use clu_lib::geodesy::SphericalEarth;

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve amateur radio callsigns and locators using CTY.DAT")]
struct Cli {
    /// Show the matched prefix, primary prefix and alias list
    #[arg(short = 'p', long)]
    prefixes: bool,

    /// Distance and bearing between consecutive stations
    #[arg(short = 'd', long)]
    distance: bool,

    /// One JSON object per token instead of text
    #[arg(long)]
    json: bool,

    /// Print the country file version and exit
    #[arg(short = 'v', long)]
    cty_version: bool,

    /// Country file (overrides CLU_CTY)
    #[arg(long)]
    cty: Option<PathBuf>,

    /// Call area file (overrides CLU_AREA)
    #[arg(long)]
    area: Option<PathBuf>,

    /// Country abbreviation file (overrides CLU_ABBREV)
    #[arg(long)]
    abbrev: Option<PathBuf>,

    /// Callsigns and Maidenhead locators; a locator right after a callsign
    /// is that station's grid
    #[arg(required_unless_present = "cty_version")]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("clu=warn")).init();
    let cli = Cli::parse();

    let config = Config::from_env().with_overrides(cli.cty.clone(), cli.area.clone(), cli.abbrev.clone());
    log::debug!("Using {:?}", config);

    if cli.cty_version {
        return handle_version(&config);
    }
    handle_lookup(&cli, &config)
}

fn handle_version(config: &Config) -> Result<()> {
    let version = read_version(&config.cty_path)
        .with_context(|| format!("failed to read country file {}", config.cty_path.display()))?;
    match version {
        Some(version) => println!("{}", version),
        None => println!("unknown"),
    }
    Ok(())
}

fn handle_lookup(cli: &Cli, config: &Config) -> Result<()> {
    let db = Database::load(&config.cty_path)
        .with_context(|| format!("failed to load country file {}", config.cty_path.display()))?;

    // area and abbreviation data only add detail
    let abbreviations = AbbreviationIndex::load(&config.abbreviation_path)
        .map_err(|e| log::warn!("{}", e))
        .ok();
    let areas = AreaTable::load(&config.area_path)
        .map_err(|e| log::warn!("{}", e))
        .ok();

    let resolver = Resolver {
        db: &db,
        abbreviations: abbreviations.as_ref(),
        areas: areas.as_ref(),
        geodesy: &SphericalEarth,
    };
    let stations = resolver.resolve_tokens(&cli.tokens, cli.distance);

    let options = OutputOptions {
        show_prefixes: cli.prefixes,
        show_distance: cli.distance,
    };
    for station in &stations {
        if cli.json {
            println!("{}", render_json(station).context("failed to serialize result")?);
        } else {
            print!("{}", render_text(station, options));
        }
    }

    Ok(())
}
