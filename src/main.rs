// src/main.rs

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use mastery_projector::constants::DEFAULT_DB_FILE;
use mastery_projector::error::{ProjectionError, Result};
use mastery_projector::models::{PhaseCostTable, RegimenConfig};
use mastery_projector::{database, projection, report, repository};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process;

/// Training mastery projections for a dog's skill catalog
#[derive(Parser, Debug)]
#[command(name = "mastery-projector")]
#[command(about = "Project when each training skill will be mastered")]
struct Cli {
    /// SQLite skill store (created and seeded if missing)
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute mastery projections
    Project {
        /// Read the catalog from a JSON file instead of the store
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Minutes to advance out of phases 1-4, comma separated
        #[arg(long, value_delimiter = ',')]
        phase_costs: Option<Vec<u32>>,

        /// Projection start date (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        regimen: RegimenArgs,
    },
    /// Record a new level for a skill
    SetLevel { skill: String, level: u8 },
    /// Save the regimen used by later projections
    SaveRegimen {
        #[command(flatten)]
        regimen: RegimenArgs,
    },
    /// Merge a JSON catalog into the store
    Import { file: PathBuf },
}

#[derive(Args, Debug)]
struct RegimenArgs {
    /// Training sessions per day
    #[arg(long)]
    sessions: Option<u32>,

    /// Minutes per session
    #[arg(long)]
    minutes: Option<u32>,

    /// Training days per week
    #[arg(long)]
    days: Option<u32>,

    /// Skills trained concurrently per session
    #[arg(long)]
    concurrent: Option<u32>,
}

impl RegimenArgs {
    fn apply(&self, base: RegimenConfig) -> RegimenConfig {
        RegimenConfig {
            sessions_per_day: self.sessions.unwrap_or(base.sessions_per_day),
            session_duration_minutes: self.minutes.unwrap_or(base.session_duration_minutes),
            days_per_week: self.days.unwrap_or(base.days_per_week),
            concurrent_skills_per_session: self
                .concurrent
                .unwrap_or(base.concurrent_skills_per_session),
        }
    }
}

fn open_store(path: &Path) -> Result<Connection> {
    info!("Database path: {:?}", path);
    let conn = Connection::open(path)?;
    database::init_db(&conn)?;
    Ok(conn)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Project {
            catalog,
            phase_costs,
            today,
            json,
            regimen,
        } => {
            let costs = match phase_costs {
                Some(list) => PhaseCostTable::try_from(list.as_slice())
                    .map_err(ProjectionError::InvalidPhaseCosts)?,
                None => PhaseCostTable::default(),
            };

            let (skills, base) = match catalog {
                Some(path) => (database::load_catalog_json(&path)?, RegimenConfig::default()),
                None => {
                    let conn = open_store(&cli.db)?;
                    (
                        repository::get_skill_catalog(&conn)?,
                        repository::get_regimen(&conn)?,
                    )
                }
            };
            let regimen = regimen.apply(base);
            let today = today.unwrap_or_else(|| Local::now().date_naive());

            let summary = projection::project(&skills, &costs, &regimen, today)?;
            if json {
                println!("{}", report::render_json(&summary)?);
            } else {
                print!("{}", report::render_text(&summary, &regimen, today));
            }
        }
        Command::SetLevel { skill, level } => {
            let conn = open_store(&cli.db)?;
            let updated = repository::set_skill_level(&conn, &skill, level)?;
            println!("{} is now level {}", updated.name, updated.level);
        }
        Command::SaveRegimen { regimen } => {
            let conn = open_store(&cli.db)?;
            let saved = regimen.apply(repository::get_regimen(&conn)?);
            repository::save_regimen(&conn, &saved)?;
            println!(
                "Saved regimen: {} x {} min, {} days/week, {} concurrent",
                saved.sessions_per_day,
                saved.session_duration_minutes,
                saved.days_per_week,
                saved.concurrent_skills_per_session
            );
        }
        Command::Import { file } => {
            let conn = open_store(&cli.db)?;
            let skills = database::load_catalog_json(&file)?;
            let count = repository::import_catalog(&conn, &skills)?;
            println!("Imported {} skills", count);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}
