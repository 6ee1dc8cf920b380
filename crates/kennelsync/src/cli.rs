//! CLI command definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use kennelsync_core::models::{Collection, Species, Theme};

use crate::config::Config;

/// Offline-first pet boarding data from the command line.
#[derive(Debug, Parser)]
#[command(name = "kennelsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Profile name. Each profile has its own local database.
    #[arg(long)]
    pub profile: Option<String>,

    /// Local database file.
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Boarding API base URL.
    #[arg(long)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Applies command line overrides on top of the environment configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(profile) = &self.profile {
            config = config.with_profile(profile.clone());
        }
        if let Some(db_path) = &self.db_path {
            config.db_path = db_path.clone();
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        config
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pets of one owner.
    #[command(subcommand)]
    Pets(PetsAction),
    /// Bookings of one user.
    #[command(subcommand)]
    Bookings(BookingsAction),
    /// Any collection, read through the local cache.
    Records {
        /// Collection name, e.g. `medical_records` or `kennel-runs`.
        #[arg(value_parser = parse_collection)]
        collection: Collection,
        #[command(subcommand)]
        action: RecordsAction,
    },
    /// Kennel search (remote only).
    #[command(subcommand)]
    Kennels(KennelsAction),
    /// Confirmed arrivals at a kennel (remote only).
    CheckIns {
        kennel_id: String,
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Bookings with pets on site at a kennel (remote only).
    Active {
        kennel_id: String,
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Raw settings.
    #[command(subcommand)]
    Settings(SettingsAction),
    /// User preferences.
    #[command(subcommand)]
    Prefs(PrefsAction),
}

#[derive(Debug, Subcommand)]
pub enum PetsAction {
    /// List pets.
    List {
        #[arg(long)]
        owner: String,
    },
    /// Add a pet.
    Add {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_enum::<Species>)]
        species: Species,
        #[arg(long)]
        breed: Option<String>,
        /// Birth date (YYYY-MM-DD).
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },
}

#[derive(Debug, Subcommand)]
pub enum BookingsAction {
    /// List bookings.
    List {
        #[arg(long)]
        user: String,
    },
    /// Request a booking.
    Add {
        #[arg(long)]
        user: String,
        #[arg(long)]
        kennel: String,
        #[arg(long)]
        check_in: NaiveDate,
        #[arg(long)]
        check_out: NaiveDate,
        /// Pet to board. Repeat for several pets.
        #[arg(long = "pet")]
        pets: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecordsAction {
    /// List records by owner key.
    List {
        #[arg(long)]
        owner: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum KennelsAction {
    /// Search kennels by name or city. No query lists every kennel.
    Search {
        #[arg(default_value = "")]
        query: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print a setting.
    Get { key: String },
    /// Store a setting. Values that are not valid JSON are stored as strings.
    Set { key: String, value: String },
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// Print preferences.
    Show,
    /// Change preferences.
    Set {
        #[arg(long, value_parser = parse_enum::<Theme>)]
        theme: Option<Theme>,
        #[arg(long)]
        default_kennel: Option<String>,
        #[arg(long)]
        notifications: Option<bool>,
    },
}

/// Parses a collection by table name. Hyphens are accepted for underscores.
fn parse_collection(value: &str) -> Result<Collection, String> {
    Collection::from_table_name(&value.replace('-', "_")).ok_or_else(|| {
        let names: Vec<_> = Collection::ALL.iter().map(|c| c.table_name()).collect();
        format!("unknown collection '{value}', expected one of: {}", names.join(", "))
    })
}

/// Parses a snake_case enum through its serde representation.
fn parse_enum<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.replace('-', "_")))
        .map_err(|_| format!("invalid value '{value}'"))
}
