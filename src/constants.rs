// src/constants.rs

// --- Skill Levels ---
pub const LEVEL_MIN: u8 = 1;
pub const LEVEL_MASTERED: u8 = 5;
pub const LAST_COSTED_PHASE: u8 = 4; // Phase 5 is terminal, no cost entry

// --- Phase Costs (minutes to advance out of the phase) ---
pub const PHASE_COST_INTRODUCE: u32 = 90; // 1 -> 2
pub const PHASE_COST_SHAPE: u32 = 180; // 2 -> 3
pub const PHASE_COST_GENERALIZE: u32 = 360; // 3 -> 4
pub const PHASE_COST_PROOF: u32 = 720; // 4 -> 5

// --- Calendar ---
pub const DAYS_PER_WEEK: u32 = 7;
pub const DAYS_PER_YEAR: u32 = 365;
pub const MINUTES_PER_HOUR: u64 = 60;

// --- Default Regimen ---
pub const DEFAULT_SESSIONS_PER_DAY: u32 = 2;
pub const DEFAULT_SESSION_DURATION_MINUTES: u32 = 15;
pub const DEFAULT_DAYS_PER_WEEK: u32 = 7;
pub const DEFAULT_CONCURRENT_SKILLS: u32 = 3;

// --- Store ---
pub const DEFAULT_DB_FILE: &str = "mastery_projector.db";
pub const REGIMEN_ROW_ID: i64 = 1;
