// src/repository.rs

use crate::constants::*;
use crate::error::{ProjectionError, Result};
use crate::models::{RegimenConfig, Skill};
use crate::projection::validate_level;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Snapshot of the whole catalog in id order.
///
/// Rows with a level the engine cannot accept surface as `InvalidLevel`
/// rather than being clamped.
pub fn get_skill_catalog(conn: &Connection) -> Result<Vec<Skill>> {
    let mut stmt = conn.prepare("SELECT id, name, category, level FROM skills ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let skills = rows
        .into_iter()
        .map(|(id, name, category, level)| Skill::from_raw(id, name, category, level))
        .collect::<Result<Vec<_>>>()?;

    debug!("[DB] Loaded catalog snapshot: {} skills", skills.len());
    Ok(skills)
}

/// Case-insensitive lookup by display name.
pub fn find_skill_by_name(conn: &Connection, name: &str) -> Result<Option<Skill>> {
    let skill = conn
        .query_row(
            "SELECT id, name, category, level FROM skills WHERE name = ? COLLATE NOCASE",
            [name],
            |row| {
                Ok(Skill {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                    level: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(skill)
}

/// Records a new level for a skill, as a training session outcome would.
pub fn set_skill_level(conn: &Connection, name: &str, level: u8) -> Result<Skill> {
    let mut skill = find_skill_by_name(conn, name)?
        .ok_or_else(|| ProjectionError::SkillNotFound(name.to_string()))?;
    let old_level = skill.level;
    skill.level = level;
    validate_level(&skill)?;

    conn.execute(
        "UPDATE skills SET level = ? WHERE id = ?",
        params![skill.level, skill.id],
    )?;
    debug!(
        "[DB] Skill {} ({}): level {} -> {}",
        skill.id, skill.name, old_level, skill.level
    );
    Ok(skill)
}

/// Inserts or updates catalog entries by name, keeping existing ids.
///
/// All-or-nothing: a failure part way through leaves the catalog unchanged.
pub fn import_catalog(conn: &Connection, skills: &[Skill]) -> Result<usize> {
    for skill in skills {
        validate_level(skill)?;
    }

    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO skills (name, category, level) VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET category = excluded.category, level = excluded.level",
        )?;
        for skill in skills {
            stmt.execute(params![skill.name, skill.category, skill.level])?;
        }
    }
    tx.commit()?;

    debug!("[DB] Imported {} skills", skills.len());
    Ok(skills.len())
}

/// Saved regimen, or the default schedule when none has been saved.
pub fn get_regimen(conn: &Connection) -> Result<RegimenConfig> {
    let regimen = conn
        .query_row(
            "SELECT sessions_per_day, session_duration_minutes, days_per_week, concurrent_skills_per_session
             FROM regimen WHERE id = ?",
            [REGIMEN_ROW_ID],
            |row| {
                Ok(RegimenConfig {
                    sessions_per_day: row.get(0)?,
                    session_duration_minutes: row.get(1)?,
                    days_per_week: row.get(2)?,
                    concurrent_skills_per_session: row.get(3)?,
                })
            },
        )
        .optional()?
        .unwrap_or_default();
    Ok(regimen)
}

pub fn save_regimen(conn: &Connection, regimen: &RegimenConfig) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO regimen (id, sessions_per_day, session_duration_minutes, days_per_week, concurrent_skills_per_session) VALUES (?, ?, ?, ?, ?)",
        params![
            REGIMEN_ROW_ID,
            regimen.sessions_per_day,
            regimen.session_duration_minutes,
            regimen.days_per_week,
            regimen.concurrent_skills_per_session
        ],
    )?;
    debug!("[DB] Saved regimen: {:?}", regimen);
    Ok(())
}
