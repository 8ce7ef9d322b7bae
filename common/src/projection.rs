use serde::{Deserialize, Serialize};
use crate::skill::clamp_skill_level;

/// Used only for levels outside 1..=10, which the level calculator never produces.
pub const FALLBACK_SPEED_FACTOR: f64 = 0.1;

pub const PRACTICE_HOURS_DIVISOR: f64 = 10.0;

pub fn improvement_speed_factor(skill_level: i32) -> f64 {
    match skill_level {
        1..=3 => 3.0,
        4..=6 => 2.0,
        7..=10 => 1.0,
        _ => FALLBACK_SPEED_FACTOR,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub projected_skill_level: i32,
    pub projected_improvement: i32,
}

pub fn project_skill_level(current_skill_level: i32, practice_hours_per_week: f64) -> Projection {
    let speed_factor = improvement_speed_factor(current_skill_level);

    let projected_raw = current_skill_level as f64
        + (practice_hours_per_week / PRACTICE_HOURS_DIVISOR) * speed_factor;

    let projected_skill_level = clamp_skill_level(projected_raw);

    Projection {
        projected_skill_level,
        projected_improvement: projected_skill_level - current_skill_level,
    }
}
