// src/report.rs

use crate::error::Result;
use crate::models::{Horizon, Phase, ProjectionEntry, ProjectionSummary, RegimenConfig};
use chrono::NaiveDate;
use std::fmt::Write;

const UNREACHABLE_LABEL: &str = "unreachable (no training time scheduled)";

/// Plain-text report for terminals.
pub fn render_text(
    summary: &ProjectionSummary,
    regimen: &RegimenConfig,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Mastery projection as of {} ({} x {} min, {} days/week, {} skills per session)",
        today.format("%Y-%m-%d"),
        regimen.sessions_per_day,
        regimen.session_duration_minutes,
        regimen.days_per_week,
        regimen.concurrent_skills_per_session
    );

    if summary.projections.is_empty() {
        let _ = writeln!(out, "Every skill is mastered.");
        return out;
    }

    for entry in &summary.projections {
        let _ = writeln!(out, "  {}", render_entry(entry));
    }

    let _ = writeln!(
        out,
        "Remaining: {} h of practice, {}",
        summary.total_hours_remaining,
        render_total(summary)
    );
    out
}

pub fn render_json(summary: &ProjectionSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

fn render_entry(entry: &ProjectionEntry) -> String {
    let phase = Phase::from_level(entry.current_level)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "?".to_string());
    let when = match entry.horizon {
        Horizon::Reachable {
            weeks_remaining,
            projected_date,
            ..
        } => format!(
            "{} -> {}",
            weeks_label(weeks_remaining),
            projected_date.format("%Y-%m-%d")
        ),
        Horizon::Unreachable => UNREACHABLE_LABEL.to_string(),
    };
    format!(
        "{:<24} L{} {:<10} {}",
        entry.skill_name, entry.current_level, phase, when
    )
}

fn render_total(summary: &ProjectionSummary) -> String {
    match (summary.total_days_remaining, summary.total_years_remaining) {
        (Some(days), Some(years)) => {
            format!("~{} days ({:.1} years) to finish everything", days, years)
        }
        _ => UNREACHABLE_LABEL.to_string(),
    }
}

fn weeks_label(weeks: u32) -> String {
    if weeks == 1 {
        "1 week".to_string()
    } else {
        format!("{} weeks", weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PhaseCostTable, Skill};
    use crate::projection::project;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn text_report_lists_dates_and_totals() {
        let regimen = RegimenConfig {
            sessions_per_day: 2,
            session_duration_minutes: 15,
            days_per_week: 7,
            concurrent_skills_per_session: 3,
        };
        let catalog = vec![Skill::new(1, "Recall", "Recall", 3)];
        let summary = project(&catalog, &PhaseCostTable::default(), &regimen, today()).unwrap();

        let text = render_text(&summary, &regimen, today());
        assert!(text.contains("Recall"));
        assert!(text.contains("Generalize"));
        assert!(text.contains("16 weeks -> 2024-06-17"));
        assert!(text.contains("18 h of practice"));
        assert!(text.contains("~36 days (0.1 years)"));
    }

    #[test]
    fn unreachable_is_not_rendered_as_a_date() {
        let regimen = RegimenConfig {
            days_per_week: 0,
            ..RegimenConfig::default()
        };
        let catalog = vec![Skill::new(1, "Heel", "Leash Skills", 2)];
        let summary = project(&catalog, &PhaseCostTable::default(), &regimen, today()).unwrap();

        let text = render_text(&summary, &regimen, today());
        assert!(text.contains(UNREACHABLE_LABEL));
        assert!(!text.contains("weeks ->"));
    }

    #[test]
    fn all_mastered_message() {
        let regimen = RegimenConfig::default();
        let catalog = vec![Skill::new(1, "Sit", "Foundation", 5)];
        let summary = project(&catalog, &PhaseCostTable::default(), &regimen, today()).unwrap();
        assert!(render_text(&summary, &regimen, today()).contains("Every skill is mastered."));
    }

    #[test]
    fn json_tags_unreachable_horizon() {
        let regimen = RegimenConfig {
            session_duration_minutes: 0,
            ..RegimenConfig::default()
        };
        let catalog = vec![Skill::new(1, "Heel", "Leash Skills", 2)];
        let summary = project(&catalog, &PhaseCostTable::default(), &regimen, today()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&summary).unwrap()).unwrap();
        assert_eq!(json["projections"][0]["horizon"]["status"], "unreachable");
        assert!(json["total_days_remaining"].is_null());
    }
}
