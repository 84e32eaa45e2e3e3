//! Mastery projection for dog-training curricula.
//!
//! The engine in [`projection`] turns a skill catalog snapshot and a practice
//! regimen into per-skill mastery dates plus an aggregate estimate. The
//! remaining modules are the local skill store and report rendering used by
//! the command-line front end.

pub mod constants;
pub mod database;
pub mod error;
pub mod models;
pub mod projection;
pub mod report;
pub mod repository;

pub use error::{ProjectionError, Result};
pub use models::{
    Horizon, Phase, PhaseCostTable, ProjectionEntry, ProjectionSummary, RegimenConfig, Skill,
};
pub use projection::project;
