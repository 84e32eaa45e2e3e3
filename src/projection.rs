// src/projection.rs

use crate::constants::*;
use crate::error::{ProjectionError, Result};
use crate::models::{
    Horizon, PhaseCostTable, ProjectionEntry, ProjectionSummary, RegimenConfig, Skill,
};
use chrono::{Days, NaiveDate};
use log::{debug, info, warn};

// --- Public Interface ---

/// Projects mastery dates for every unmastered skill in `catalog`.
///
/// Pure: nothing is read from the clock or the store, and the inputs are not
/// modified. Fails only when a skill carries a level outside 1..=5; a regimen
/// with no training time yields `Horizon::Unreachable` entries instead.
pub fn project(
    catalog: &[Skill],
    costs: &PhaseCostTable,
    regimen: &RegimenConfig,
    today: NaiveDate,
) -> Result<ProjectionSummary> {
    for skill in catalog {
        validate_level(skill)?;
    }

    let effective_daily = regimen.effective_daily_minutes();
    debug!(
        "[Projection Input] Skills: {}, Effective: {:.2} min/day, Per skill: {:.2} min/day",
        catalog.len(),
        effective_daily,
        effective_daily / f64::from(regimen.concurrency_divisor())
    );

    if regimen.weekly_minutes() == 0 {
        warn!(
            "Regimen has no training time ({} x {} min, {} days/week). Horizons are unreachable.",
            regimen.sessions_per_day, regimen.session_duration_minutes, regimen.days_per_week
        );
    }

    let mut projections: Vec<ProjectionEntry> = catalog
        .iter()
        .filter(|s| !s.is_mastered())
        .map(|s| {
            let remaining = remaining_effort(s.level, costs);
            ProjectionEntry {
                skill_id: s.id,
                skill_name: s.name.clone(),
                current_level: s.level,
                remaining_minutes: remaining,
                horizon: horizon_for(remaining, regimen, today),
            }
        })
        .collect();

    // Over-allocation still divides by the configured concurrency.
    if regimen.concurrency_divisor() as usize > projections.len() && !projections.is_empty() {
        debug!(
            "[Projection Input] Concurrency {} exceeds {} unmastered skills",
            regimen.concurrency_divisor(),
            projections.len()
        );
    }

    // Stable sort keeps catalog order for equal weeks. Unreachable goes last.
    projections.sort_by_key(|p| (!p.horizon.is_reachable(), p.horizon.weeks_remaining()));

    let total_minutes: u64 = projections.iter().map(|p| p.remaining_minutes).sum();
    // Sequential time at full capacity. Concurrency is not applied here.
    let total_days = DayCount::new(total_minutes, 1, regimen.weekly_minutes());

    let summary = ProjectionSummary {
        total_minutes_remaining: total_minutes,
        total_hours_remaining: (total_minutes + MINUTES_PER_HOUR / 2) / MINUTES_PER_HOUR,
        total_days_remaining: total_days.and_then(|d| u64::try_from(d.rounded_days()).ok()),
        total_years_remaining: total_days.map(|d| d.rounded_tenth_years()),
        projections,
    };

    info!(
        "[Projection Result] {} unmastered skills, {} min remaining, {:?} days total",
        summary.projections.len(),
        summary.total_minutes_remaining,
        summary.total_days_remaining
    );

    Ok(summary)
}

/// Minutes still owed before a skill at `level` is mastered.
pub fn remaining_effort(level: u8, costs: &PhaseCostTable) -> u64 {
    (level..=LAST_COSTED_PHASE)
        .map(|phase| u64::from(costs.cost(phase)))
        .sum()
}

pub fn validate_level(skill: &Skill) -> Result<()> {
    if (LEVEL_MIN..=LEVEL_MASTERED).contains(&skill.level) {
        Ok(())
    } else {
        Err(ProjectionError::InvalidLevel {
            skill: skill.name.clone(),
            level: i64::from(skill.level),
        })
    }
}

// --- Internal Algorithm Logic ---

/// Exact day count `num / den`. Kept as integers so whole-day and
/// whole-week boundaries survive; `f64` is only produced for reporting.
#[derive(Debug, Clone, Copy)]
struct DayCount {
    num: u128,
    den: u128,
}

impl DayCount {
    /// `minutes * 7 * divisor / weekly_minutes`, or `None` when work remains
    /// and no time is scheduled.
    fn new(minutes: u64, divisor: u32, weekly_minutes: u128) -> Option<Self> {
        if minutes == 0 {
            Some(DayCount { num: 0, den: 1 })
        } else if weekly_minutes == 0 {
            None
        } else {
            Some(DayCount {
                num: u128::from(minutes) * u128::from(DAYS_PER_WEEK) * u128::from(divisor),
                den: weekly_minutes,
            })
        }
    }

    fn whole_days(&self) -> u128 {
        self.num / self.den
    }

    fn weeks_ceil(&self) -> u128 {
        let week = self.den * u128::from(DAYS_PER_WEEK);
        (self.num + week - 1) / week
    }

    fn rounded_days(&self) -> u128 {
        (2 * self.num + self.den) / (2 * self.den)
    }

    fn rounded_tenth_years(&self) -> f64 {
        let year = self.den * u128::from(DAYS_PER_YEAR);
        let tenths = (20 * self.num + year) / (2 * year);
        tenths as f64 / 10.0
    }

    fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

fn horizon_for(remaining: u64, regimen: &RegimenConfig, today: NaiveDate) -> Horizon {
    let Some(days) = DayCount::new(
        remaining,
        regimen.concurrency_divisor(),
        regimen.weekly_minutes(),
    ) else {
        return Horizon::Unreachable;
    };

    // Fractional days are dropped for the calendar date only.
    let projected_date = u64::try_from(days.whole_days())
        .ok()
        .and_then(|d| today.checked_add_days(Days::new(d)));
    let weeks_remaining = u32::try_from(days.weeks_ceil()).ok();

    match (projected_date, weeks_remaining) {
        (Some(projected_date), Some(weeks_remaining)) => Horizon::Reachable {
            days_to_mastery: days.as_f64(),
            weeks_remaining,
            projected_date,
        },
        _ => Horizon::Unreachable,
    }
}
