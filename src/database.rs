// src/database.rs

use crate::error::Result;
use crate::models::Skill;
use log::{debug, info};
use rusqlite::{params, Connection};
use serde::Deserialize;
use std::fs;
use std::path::Path;

// Used for seeding
#[derive(Deserialize)]
struct JsonSkill {
    name: String,
    category: String,
}

// Level is read untyped so out-of-range values surface as InvalidLevel.
#[derive(Deserialize)]
struct JsonCatalogSkill {
    id: i64,
    name: String,
    category: String,
    level: i64,
}

pub fn init_db(conn: &Connection) -> Result<()> {
    debug!("init_db: Checking database schema...");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS skills (
            id INTEGER PRIMARY KEY,
            name TEXT UNIQUE NOT NULL COLLATE NOCASE,
            category TEXT NOT NULL,
            level INTEGER NOT NULL DEFAULT 1 CHECK (level BETWEEN 1 AND 5)
        );
        CREATE TABLE IF NOT EXISTS regimen (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            sessions_per_day INTEGER NOT NULL,
            session_duration_minutes INTEGER NOT NULL,
            days_per_week INTEGER NOT NULL,
            concurrent_skills_per_session INTEGER NOT NULL
        );
        ",
    )?;

    let count: i64 = conn.query_row("SELECT count(*) FROM skills", [], |row| row.get(0))?;
    if count == 0 {
        debug!("init_db: Table empty. Seeding default curriculum...");
        seed_data(conn)?;
    }

    Ok(())
}

fn seed_data(conn: &Connection) -> Result<()> {
    let data = include_str!("data/default_catalog.json");
    let skills: Vec<JsonSkill> = serde_json::from_str(data)?;

    let mut stmt =
        conn.prepare("INSERT OR IGNORE INTO skills (name, category, level) VALUES (?, ?, 1)")?;
    for s in &skills {
        stmt.execute(params![s.name, s.category])?;
    }

    info!("Seeded {} skills", skills.len());
    Ok(())
}

/// Reads a catalog snapshot from a JSON array of skills.
pub fn load_catalog_json(path: &Path) -> Result<Vec<Skill>> {
    let raw = fs::read_to_string(path)?;
    let raw_skills: Vec<JsonCatalogSkill> = serde_json::from_str(&raw)?;
    let skills = raw_skills
        .into_iter()
        .map(|s| Skill::from_raw(s.id, s.name, s.category, s.level))
        .collect::<Result<Vec<_>>>()?;
    debug!("Loaded {} skills from {:?}", skills.len(), path);
    Ok(skills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectionError;
    use std::io::Write;

    #[test]
    fn init_seeds_once() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        init_db(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT count(*) FROM skills", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 16);

        let above_one: i64 = conn
            .query_row("SELECT count(*) FROM skills WHERE level <> 1", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(above_one, 0);
    }

    #[test]
    fn schema_rejects_out_of_range_level() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let res = conn.execute("UPDATE skills SET level = 6 WHERE name = 'Sit'", []);
        assert!(res.is_err());
    }

    #[test]
    fn loads_catalog_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 7, "name": "Recall", "category": "Recall", "level": 3}}]"#
        )
        .unwrap();

        let skills = load_catalog_json(file.path()).unwrap();
        assert_eq!(skills, vec![Skill::new(7, "Recall", "Recall", 3)]);
    }

    #[test]
    fn json_level_out_of_range_is_invalid_level() {
        for level in [300_i64, -1, 0] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(
                file,
                r#"[{{"id": 1, "name": "Heel", "category": "Leash Skills", "level": {}}}]"#,
                level
            )
            .unwrap();

            let err = load_catalog_json(file.path()).unwrap_err();
            assert!(matches!(
                err,
                ProjectionError::InvalidLevel { level: l, .. } if l == level
            ));
        }
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_catalog_json(file.path()).is_err());
    }
}
