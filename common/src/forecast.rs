use serde::{Deserialize, Serialize};
use crate::allocation::{recommend_practice_hours, RecommendedHours};
use crate::narrative::forecast_message;
use crate::projection::project_skill_level;
use crate::skill::current_skill_level;
use crate::stats::PlayerStats;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SkillProjection {
    pub current_skill_level: i32,
    pub projected_skill_level: i32,
    pub projected_improvement: i32,
    pub recommended_hours: RecommendedHours,
    pub message: String,
}

/// Current level, one-year projection and weekly practice split for one player.
pub fn compute_skill_projection(stats: &PlayerStats) -> SkillProjection {
    let current_skill_level = current_skill_level(stats);

    let projection = project_skill_level(current_skill_level, stats.practice_hours_per_week);

    let recommended_hours = recommend_practice_hours(stats);

    let message = forecast_message(
        current_skill_level,
        stats.practice_hours_per_week,
        projection.projected_skill_level,
        projection.projected_improvement,
    );

    SkillProjection {
        current_skill_level,
        projected_skill_level: projection.projected_skill_level,
        projected_improvement: projection.projected_improvement,
        recommended_hours,
        message,
    }
}
