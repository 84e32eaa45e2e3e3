// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("Skill '{skill}' has level {level}, expected 1..=5")]
    InvalidLevel { skill: String, level: i64 },

    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    #[error("Invalid phase cost list: {0}")]
    InvalidPhaseCosts(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
