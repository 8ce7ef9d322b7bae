use std::fmt;
use std::fmt::{Display, Formatter};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::stats::{normalize, PlayerStats};

pub const MIN_SKILL_LEVEL: i32 = 1;
pub const MAX_SKILL_LEVEL: i32 = 10;

pub const FARGO_RATE_CEILING: f64 = 1000.0;
pub const BU_TOTAL_CEILING: f64 = 100.0;
pub const YEARS_OF_EXPERIENCE_CEILING: f64 = 35.0;
pub const BU_DRILL_7_CEILING: f64 = 20.0;
pub const BU_DRILL_8_CEILING: f64 = 20.0;

pub const FARGO_BOOST_THRESHOLD: f64 = 650.0;
pub const BU_TOTAL_BOOST_THRESHOLD: f64 = 75.0;
pub const FARGO_BOOST_FACTOR: f64 = 0.006;
pub const BU_TOTAL_BOOST_FACTOR: f64 = 0.06;
pub const MAX_BOOST: f64 = 2.5;

pub const SKILL_LEVEL_SCALE: f64 = 11.5;

/// Rounds half-to-even and clamps into the skill level range.
pub fn clamp_skill_level(raw_level: f64) -> i32 {
    raw_level
        .clamp(MIN_SKILL_LEVEL as f64, MAX_SKILL_LEVEL as f64)
        .round_ties_even() as i32
}

/// Player statistics scaled into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedStats {
    pub fargo_rate: f64,
    pub bu_total: f64,
    pub win_percentage: f64,
    pub years_of_experience: f64,
    pub bu_drill_7: f64,
    pub bu_drill_8: f64,
}

impl From<&PlayerStats> for NormalizedStats {
    fn from(stats: &PlayerStats) -> Self {
        NormalizedStats {
            fargo_rate: normalize(stats.fargo_rate, FARGO_RATE_CEILING),
            bu_total: normalize(stats.bu_total, BU_TOTAL_CEILING),
            win_percentage: stats.win_percentage.clamp(0.0, 1.0),
            years_of_experience: normalize(stats.years_of_experience, YEARS_OF_EXPERIENCE_CEILING),
            bu_drill_7: normalize(stats.bu_drill_7, BU_DRILL_7_CEILING),
            bu_drill_8: normalize(stats.bu_drill_8, BU_DRILL_8_CEILING),
        }
    }
}

impl NormalizedStats {
    pub fn base_score(&self) -> f64 {
        0.45 * self.fargo_rate.powf(1.1)
            + 0.30 * self.bu_total.powf(1.05)
            + 0.10 * self.win_percentage
            + 0.05 * self.years_of_experience
            + 0.05 * self.bu_drill_7
            + 0.05 * self.bu_drill_8
    }
}

/// Bonus for players above both thresholds. Exceeding only one of them yields nothing.
pub fn top_performer_boost(fargo_rate: f64, bu_total: f64) -> f64 {
    if fargo_rate > FARGO_BOOST_THRESHOLD && bu_total > BU_TOTAL_BOOST_THRESHOLD {
        let boost = ((fargo_rate - FARGO_BOOST_THRESHOLD) * FARGO_BOOST_FACTOR
            + (bu_total - BU_TOTAL_BOOST_THRESHOLD) * BU_TOTAL_BOOST_FACTOR)
            .min(MAX_BOOST);

        debug!("top performer boost engaged: {:.3}", boost);

        boost
    } else {
        0.0
    }
}

pub fn raw_skill_level(stats: &PlayerStats) -> f64 {
    let normalized = NormalizedStats::from(stats);

    SKILL_LEVEL_SCALE * normalized.base_score() + top_performer_boost(stats.fargo_rate, stats.bu_total)
}

pub fn current_skill_level(stats: &PlayerStats) -> i32 {
    clamp_skill_level(raw_skill_level(stats))
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum TrainingTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl TrainingTier {
    pub fn from_skill_level(skill_level: i32) -> TrainingTier {
        if skill_level <= 3 {
            TrainingTier::Beginner
        } else if skill_level <= 6 {
            TrainingTier::Intermediate
        } else {
            TrainingTier::Advanced
        }
    }
}

impl Display for TrainingTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TrainingTier::Beginner => write!(f, "Beginner"),
            TrainingTier::Intermediate => write!(f, "Intermediate"),
            TrainingTier::Advanced => write!(f, "Advanced"),
        }
    }
}
