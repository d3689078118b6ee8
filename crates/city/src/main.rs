//! Code City: turns a repository's file, commit and bug history into a city.

mod config;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use dataset::analyze::analyze_repository;
use dataset::{discover_datasets, display_name, Dataset};
use layout::CityComposer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene::{Layer, TimeOfDay, WorldState};

use crate::config::CityConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Config file (defaults to ./config.ron).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Dataset directory, overriding the config.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a city from a dataset and print its summary.
    Show {
        /// Dataset file name inside the data directory.
        dataset: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Building budget, overriding the config.
        #[arg(long)]
        limit: Option<usize>,
        /// Highlight this file's building and frame the camera on it.
        #[arg(long)]
        focus: Option<String>,
        #[arg(long)]
        night: bool,
        /// Show smoke plumes over smelly files.
        #[arg(long)]
        smoke: bool,
        /// Number of tallest buildings to list.
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Write the placement plan as RON.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List datasets in the data directory.
    List,
    /// Find files by name in a dataset.
    Search {
        query: String,
        #[arg(long)]
        dataset: Option<String>,
    },
    /// Analyze a git repository (local path or clone URL) into a new dataset.
    Analyze { source: String },
    /// Write the effective configuration to the config file.
    InitConfig {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let mut config = CityConfig::load(Some(config_path.as_path()));
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    match args.command {
        Command::Show {
            dataset,
            seed,
            limit,
            focus,
            night,
            smoke,
            top,
            export,
        } => {
            if let Some(limit) = limit {
                config.layout.max_buildings = limit;
            }
            let options = ShowOptions {
                dataset,
                seed: seed.or(config.seed),
                focus,
                night: night || config.night_mode,
                smoke,
                top,
                export,
            };
            show(&config, options)
        }
        Command::List => list(&config),
        Command::Search { query, dataset } => search(&config, dataset, &query),
        Command::Analyze { source } => analyze(&config, &source),
        Command::InitConfig { force } => init_config(&config, &config_path, force),
    }
}

struct ShowOptions {
    dataset: Option<String>,
    seed: Option<u64>,
    focus: Option<String>,
    night: bool,
    smoke: bool,
    top: usize,
    export: Option<PathBuf>,
}

/// Dataset named on the command line, in the config, or the first one discovered.
fn resolve_dataset(config: &CityConfig, requested: Option<String>) -> Result<String> {
    if let Some(name) = requested.or_else(|| config.dataset.clone()) {
        return Ok(name);
    }
    discover_datasets(&config.data_dir)
        .with_context(|| format!("failed to scan {}", config.data_dir.display()))?
        .into_iter()
        .next()
        .ok_or_else(|| {
            anyhow!(
                "no datasets found in {}; run `codecity analyze <repo>` first",
                config.data_dir.display()
            )
        })
}

fn load_dataset(config: &CityConfig, name: &str) -> Result<Dataset> {
    let path = config.data_dir.join(name);
    Dataset::load(&path).with_context(|| format!("failed to load dataset {}", path.display()))
}

fn show(config: &CityConfig, options: ShowOptions) -> Result<()> {
    let name = resolve_dataset(config, options.dataset)?;
    let dataset = load_dataset(config, &name)?;

    let seed = options.seed.unwrap_or_else(rand::random);
    log::debug!("Using seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let composer = CityComposer::new(config.layout.clone());
    let plan = composer.compose_with_rng(&dataset.files, &mut rng);

    let mut state = WorldState::new(&mut rng);
    if options.night {
        state.set_time_of_day(TimeOfDay::Night);
    }
    state.set_layer(Layer::Smoke, options.smoke);
    state.populate(&plan, &mut rng);

    println!(
        "{}",
        report::summary(&name, &dataset, config.layout.max_buildings, &plan, &state.census())
    );
    println!("{}", report::legend(&dataset));
    if options.top > 0 && !plan.is_empty() {
        println!("Tallest buildings:");
        print!("{}", report::tallest(&plan, options.top));
    }

    if let Some(path) = options.focus {
        match state.focus_on(&path) {
            Some(center) => println!(
                "\nFocused {} at ({:.2}, {:.2}, {:.2}); camera at {:?}",
                path,
                center.x,
                center.y,
                center.z,
                state.camera.position()
            ),
            None => println!("\n{} is not in this city", path),
        }
    }

    if let Some(path) = options.export {
        let ron = ron::ser::to_string_pretty(&plan, ron::ser::PrettyConfig::default())
            .context("failed to serialize placement plan")?;
        std::fs::write(&path, ron).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("Wrote placement plan to {}", path.display());
    }
    Ok(())
}

fn init_config(config: &CityConfig, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!("{} already exists; pass --force to replace it", path.display()));
    }
    config.save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn list(config: &CityConfig) -> Result<()> {
    let found = discover_datasets(&config.data_dir)
        .with_context(|| format!("failed to scan {}", config.data_dir.display()))?;
    if found.is_empty() {
        println!("No datasets in {}. Run `codecity analyze <repo>` first.", config.data_dir.display());
    }
    for file in found {
        println!("{:<32} {}", display_name(&file), file);
    }
    Ok(())
}

fn search(config: &CityConfig, dataset: Option<String>, query: &str) -> Result<()> {
    let name = resolve_dataset(config, dataset)?;
    let dataset = load_dataset(config, &name)?;
    let hits = dataset.search(query);
    if hits.is_empty() {
        println!("No files matching {:?}", query);
    }
    for file in hits {
        println!(
            "{:<60} commits {:>4}  bugs {:>3}  smell {:>3}",
            file.path, file.commits, file.bugs, file.smell_score
        );
    }
    Ok(())
}

fn analyze(config: &CityConfig, source: &str) -> Result<()> {
    let analysis = analyze_repository(source, &config.data_dir, &config.checkout_dir)
        .with_context(|| format!("failed to analyze {source}"))?;
    let dataset = &analysis.dataset;
    println!("Analysis complete: {} files, {} LOC", dataset.total_files, dataset.total_loc);
    println!(
        "Found {} bug-related commits affecting {} files",
        dataset.total_bugs, dataset.files_with_bugs
    );
    println!("Found {} files with high code smell scores (>50)", analysis.smelly_files);
    println!("Data saved to {}", analysis.output.display());
    Ok(())
}
