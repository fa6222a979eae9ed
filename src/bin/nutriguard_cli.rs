// ABOUTME: NutriGuard CLI - evaluate foods, inspect restriction profiles, scan ingredient labels
// ABOUTME: Reads JSON inputs from files and prints JSON results on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Evaluate one food (or a JSON array of foods) for a profile
//! nutriguard-cli evaluate --food food.json --profile profile.json
//!
//! # Use a restriction snapshot and an AI overlay instead of the seed catalog
//! nutriguard-cli evaluate --food food.json --profile profile.json --store store.json --computed limits.json
//!
//! # Show the consolidated restriction profile for a condition set
//! nutriguard-cli profile --conditions ckd-3b-5,hypertension
//!
//! # Show additive categories found in label text
//! nutriguard-cli scan "water, corn syrup, sodium phosphate"
//!
//! # Show a grain's phosphorus bioavailability tier
//! nutriguard-cli grain "brown rice"
//! ```

use clap::{Parser, Subcommand};
use nutriguard::errors::{AppError, AppResult};
use nutriguard::intelligence::{
    classify_grain, ConflictEngine, PatternScan, PolicyConfig, RestrictionProfile,
};
use nutriguard::logging::LoggingConfig;
use nutriguard::models::{ComputedLimits, RestrictionStore, UserProfile};
use nutriguard::services::{evaluate_input, FoodInput};
use nutriguard::store::{load_store_or_default, read_json_file};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "nutriguard-cli",
    about = "NutriGuard restriction and food-safety CLI",
    long_about = "Evaluate foods against chronic-condition restrictions and inspect consolidated restriction profiles."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Restriction store snapshot (JSON); defaults to the built-in catalog
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Evaluate a food (or array of foods) against a user profile
    Evaluate {
        /// Food JSON file: one object or an array
        #[arg(long)]
        food: PathBuf,

        /// User profile JSON file
        #[arg(long)]
        profile: PathBuf,

        /// AI-generated computed limits JSON file
        #[arg(long)]
        computed: Option<PathBuf>,
    },

    /// Print the consolidated restriction profile for a condition set
    Profile {
        /// Comma-separated condition slugs
        #[arg(long, value_delimiter = ',')]
        conditions: Vec<String>,

        /// AI-generated computed limits JSON file
        #[arg(long)]
        computed: Option<PathBuf>,
    },

    /// Print additive categories and matched phrases for ingredient text
    Scan {
        /// Ingredient label text
        ingredients: String,
    },

    /// Print the bioavailability tier of a grain
    Grain {
        /// Grain ingredient name
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    run(cli)?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Evaluate {
            food,
            profile,
            computed,
        } => {
            let store = load_store_or_default(cli.store.as_deref())?;
            evaluate(&store, &food, &profile, computed.as_deref())
        }
        Command::Profile {
            conditions,
            computed,
        } => {
            let store = load_store_or_default(cli.store.as_deref())?;
            let restrictions = build_restrictions(&store, &conditions, computed.as_deref())?;
            print_json(&restrictions)
        }
        Command::Scan { ingredients } => print_json(&PatternScan::scan(&ingredients)),
        Command::Grain { name } => {
            let tier = classify_grain(&name);
            print_json(&json!({ "ingredient": name, "tier": tier }))
        }
    }
}

fn evaluate(
    store: &RestrictionStore,
    food_path: &Path,
    profile_path: &Path,
    computed_path: Option<&Path>,
) -> Result<()> {
    let profile: UserProfile = read_json_file(profile_path)?;
    let restrictions = build_restrictions(store, &profile.condition_slugs(), computed_path)?;
    let engine = ConflictEngine::new(PolicyConfig::global().clone());

    let foods = FoodInput::from_value(read_json_file(food_path)?)?;
    print_json(&evaluate_input(&engine, &foods, &profile, &restrictions))
}

fn build_restrictions<S: AsRef<str>>(
    store: &RestrictionStore,
    conditions: &[S],
    computed_path: Option<&Path>,
) -> Result<RestrictionProfile> {
    let mut restrictions = RestrictionProfile::from_store(store, conditions);
    if let Some(path) = computed_path {
        let computed: ComputedLimits = read_json_file(path)?;
        restrictions = restrictions.with_computed_limits(&computed);
    }
    Ok(restrictions)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
