// src/models.rs

use crate::constants::*;
use crate::error::ProjectionError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// --- Data Models ---

/// One entry of the skill catalog, as snapshotted from the skill store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub level: u8,
}

impl Skill {
    pub fn new(id: i64, name: &str, category: &str, level: u8) -> Self {
        Skill {
            id,
            name: name.to_string(),
            category: category.to_string(),
            level,
        }
    }

    /// Builds a skill from an untyped level (SQLite row, JSON file),
    /// rejecting anything outside 1..=5 instead of clamping.
    pub fn from_raw(
        id: i64,
        name: String,
        category: String,
        level: i64,
    ) -> Result<Self, ProjectionError> {
        match u8::try_from(level) {
            Ok(l) if (LEVEL_MIN..=LEVEL_MASTERED).contains(&l) => Ok(Skill {
                id,
                name,
                category,
                level: l,
            }),
            _ => Err(ProjectionError::InvalidLevel { skill: name, level }),
        }
    }

    pub fn is_mastered(&self) -> bool {
        self.level == LEVEL_MASTERED
    }
}

/// Proficiency stages a skill moves through. `Mastered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Introduce = 1,
    Shape = 2,
    Generalize = 3,
    Proof = 4,
    Mastered = 5,
}

impl Phase {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Phase::Introduce),
            2 => Some(Phase::Shape),
            3 => Some(Phase::Generalize),
            4 => Some(Phase::Proof),
            5 => Some(Phase::Mastered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Introduce => "Introduce",
            Phase::Shape => "Shape",
            Phase::Generalize => "Generalize",
            Phase::Proof => "Proof",
            Phase::Mastered => "Mastered",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minutes of focused practice needed to advance out of each phase.
///
/// Keys are phase indices 1..=4. Missing keys cost nothing; phase 5 never
/// has an entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PhaseCostTable {
    costs: BTreeMap<u8, u32>,
}

impl PhaseCostTable {
    pub fn new(costs: [u32; 4]) -> Self {
        let costs = (LEVEL_MIN..=LAST_COSTED_PHASE).zip(costs).collect();
        PhaseCostTable { costs }
    }

    /// Builds a table from arbitrary `(phase, minutes)` pairs. Entries for
    /// phases outside 1..=4 are dropped.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        let costs = entries
            .into_iter()
            .filter(|(phase, _)| (LEVEL_MIN..=LAST_COSTED_PHASE).contains(phase))
            .collect();
        PhaseCostTable { costs }
    }

    pub fn cost(&self, phase: u8) -> u32 {
        self.costs.get(&phase).copied().unwrap_or(0)
    }
}

impl TryFrom<&[u32]> for PhaseCostTable {
    type Error = String;
    fn try_from(costs: &[u32]) -> Result<Self, Self::Error> {
        let costs: [u32; 4] = costs
            .try_into()
            .map_err(|_| format!("expected 4 phase costs, got {}", costs.len()))?;
        Ok(PhaseCostTable::new(costs))
    }
}

impl Default for PhaseCostTable {
    fn default() -> Self {
        PhaseCostTable::new([
            PHASE_COST_INTRODUCE,
            PHASE_COST_SHAPE,
            PHASE_COST_GENERALIZE,
            PHASE_COST_PROOF,
        ])
    }
}

/// Practice schedule owned by the caller.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegimenConfig {
    pub sessions_per_day: u32,
    pub session_duration_minutes: u32,
    pub days_per_week: u32,
    pub concurrent_skills_per_session: u32,
}

impl RegimenConfig {
    pub fn total_daily_minutes(&self) -> f64 {
        f64::from(self.sessions_per_day) * f64::from(self.session_duration_minutes)
    }

    /// Daily minutes discounted by how many days of the week are trained.
    pub fn effective_daily_minutes(&self) -> f64 {
        let week_share = f64::from(self.days_per_week) / f64::from(DAYS_PER_WEEK);
        self.total_daily_minutes() * week_share
    }

    /// Training minutes in one week, in exact integer arithmetic.
    pub fn weekly_minutes(&self) -> u128 {
        u128::from(self.sessions_per_day)
            * u128::from(self.session_duration_minutes)
            * u128::from(self.days_per_week)
    }

    pub fn concurrency_divisor(&self) -> u32 {
        self.concurrent_skills_per_session.max(1)
    }
}

impl Default for RegimenConfig {
    fn default() -> Self {
        RegimenConfig {
            sessions_per_day: DEFAULT_SESSIONS_PER_DAY,
            session_duration_minutes: DEFAULT_SESSION_DURATION_MINUTES,
            days_per_week: DEFAULT_DAYS_PER_WEEK,
            concurrent_skills_per_session: DEFAULT_CONCURRENT_SKILLS,
        }
    }
}

/// When a skill (or the whole catalog) is expected to be done.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Horizon {
    Reachable {
        days_to_mastery: f64,
        weeks_remaining: u32,
        projected_date: NaiveDate,
    },
    /// No training time is configured, so the date can never arrive.
    Unreachable,
}

impl Horizon {
    pub fn weeks_remaining(&self) -> Option<u32> {
        match self {
            Horizon::Reachable {
                weeks_remaining, ..
            } => Some(*weeks_remaining),
            Horizon::Unreachable => None,
        }
    }

    pub fn days_to_mastery(&self) -> Option<f64> {
        match self {
            Horizon::Reachable {
                days_to_mastery, ..
            } => Some(*days_to_mastery),
            Horizon::Unreachable => None,
        }
    }

    pub fn projected_date(&self) -> Option<NaiveDate> {
        match self {
            Horizon::Reachable { projected_date, .. } => Some(*projected_date),
            Horizon::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Horizon::Reachable { .. })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectionEntry {
    pub skill_id: i64,
    pub skill_name: String,
    pub current_level: u8,
    pub remaining_minutes: u64,
    pub horizon: Horizon,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectionSummary {
    pub projections: Vec<ProjectionEntry>,
    pub total_minutes_remaining: u64,
    pub total_hours_remaining: u64,
    /// `None` when work remains but no training time is configured.
    pub total_days_remaining: Option<u64>,
    pub total_years_remaining: Option<f64>,
}
