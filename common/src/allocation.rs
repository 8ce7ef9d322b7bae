use std::fmt;
use std::fmt::{Display, Formatter};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::stats::{normalize, PlayerStats};
use crate::FLOAT_EPSILON;

pub const MIN_TIME_SLOT: f64 = 0.5;

pub const CUE_BALL_CONTROL_CEILING: f64 = 20.0;
pub const BALL_POCKETING_CEILING: f64 = 10.0;
pub const STROKE_QUALITY_CEILING: f64 = 30.0;

#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum SkillComponent {
    #[serde(rename = "Cue_Ball_Control")]
    CueBallControl,
    #[serde(rename = "Ball_Pocketing")]
    BallPocketing,
    #[serde(rename = "Pattern_Play")]
    PatternPlay,
    #[serde(rename = "Stroke_Quality")]
    StrokeQuality,
}

/// Fixed component order. Drift correction breaks ties by this order.
pub const COMPONENT_ORDER: [SkillComponent; 4] = [
    SkillComponent::CueBallControl,
    SkillComponent::BallPocketing,
    SkillComponent::PatternPlay,
    SkillComponent::StrokeQuality,
];

impl SkillComponent {
    pub fn key(&self) -> &'static str {
        match self {
            SkillComponent::CueBallControl => "Cue_Ball_Control",
            SkillComponent::BallPocketing => "Ball_Pocketing",
            SkillComponent::PatternPlay => "Pattern_Play",
            SkillComponent::StrokeQuality => "Stroke_Quality",
        }
    }

    fn index(&self) -> usize {
        match self {
            SkillComponent::CueBallControl => 0,
            SkillComponent::BallPocketing => 1,
            SkillComponent::PatternPlay => 2,
            SkillComponent::StrokeQuality => 3,
        }
    }
}

impl Display for SkillComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SkillComponent::CueBallControl => write!(f, "Cue Ball Control"),
            SkillComponent::BallPocketing => write!(f, "Ball Pocketing"),
            SkillComponent::PatternPlay => write!(f, "Pattern Play"),
            SkillComponent::StrokeQuality => write!(f, "Stroke Quality"),
        }
    }
}

impl TryFrom<&str> for SkillComponent {
    type Error = String;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        COMPONENT_ORDER
            .iter()
            .find(|component| component.key() == value)
            .copied()
            .ok_or_else(|| format!("Invalid skill component: {}", value))
    }
}

/// Proficiency in [0, 1] for each component, indexed by `COMPONENT_ORDER`.
pub fn component_proficiency(stats: &PlayerStats) -> [f64; 4] {
    [
        normalize(stats.bu_drill_8, CUE_BALL_CONTROL_CEILING),
        normalize(stats.bu_drill_6, BALL_POCKETING_CEILING),
        stats.win_percentage.clamp(0.0, 1.0),
        normalize(stats.bu_drill_7 + stats.bu_drill_2, STROKE_QUALITY_CEILING),
    ]
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct RecommendedHours {
    #[serde(rename = "Cue_Ball_Control")]
    pub cue_ball_control: f64,
    #[serde(rename = "Ball_Pocketing")]
    pub ball_pocketing: f64,
    #[serde(rename = "Pattern_Play")]
    pub pattern_play: f64,
    #[serde(rename = "Stroke_Quality")]
    pub stroke_quality: f64,
}

impl RecommendedHours {
    pub fn from_array(hours: [f64; 4]) -> Self {
        RecommendedHours {
            cue_ball_control: hours[0],
            ball_pocketing: hours[1],
            pattern_play: hours[2],
            stroke_quality: hours[3],
        }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [
            self.cue_ball_control,
            self.ball_pocketing,
            self.pattern_play,
            self.stroke_quality,
        ]
    }

    pub fn get(&self, component: SkillComponent) -> f64 {
        self.to_array()[component.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillComponent, f64)> {
        COMPONENT_ORDER.into_iter().zip(self.to_array())
    }

    pub fn total(&self) -> f64 {
        self.to_array().iter().sum()
    }
}

fn round_to_half_hour(hours: f64) -> f64 {
    (hours * 2.0).round_ties_even() / 2.0
}

/// First index holding the largest value.
fn largest_component_index(hours: &[f64; 4]) -> usize {
    let mut largest = 0;
    for (idx, value) in hours.iter().enumerate().skip(1) {
        if *value > hours[largest] {
            largest = idx;
        }
    }
    largest
}

/// Splits `practice_hours` proportionally to `lacking`, indexed by `COMPONENT_ORDER`.
///
/// Every share is lifted to `MIN_TIME_SLOT`, shrunk back uniformly when the floors overshoot the
/// budget, and rounded to half hours. Whatever the rounding loses or gains goes to the largest
/// component, so the result sums to `practice_hours`. A player with nothing lacking gets zero
/// hours everywhere.
pub fn allocate_hours(lacking: [f64; 4], practice_hours: f64) -> RecommendedHours {
    let total_lacking: f64 = lacking.iter().sum();

    if total_lacking == 0.0 {
        debug!("no component lacking, allocating zero hours");
        return RecommendedHours::default();
    }

    let mut hours = lacking.map(|value| (value / total_lacking * practice_hours).max(MIN_TIME_SLOT));

    let total_adjusted: f64 = hours.iter().sum();
    if total_adjusted > practice_hours {
        let scale_factor = practice_hours / total_adjusted;
        hours = hours.map(|value| value * scale_factor);
    }

    let mut hours = hours.map(round_to_half_hour);

    let difference = practice_hours - hours.iter().sum::<f64>();
    if difference.abs() > FLOAT_EPSILON {
        let largest = largest_component_index(&hours);
        debug!(
            "rounding drift {:.3}h absorbed by {}",
            difference,
            COMPONENT_ORDER[largest].key()
        );
        hours[largest] += difference;
    }

    RecommendedHours::from_array(hours)
}

pub fn recommend_practice_hours(stats: &PlayerStats) -> RecommendedHours {
    let lacking = component_proficiency(stats).map(|proficiency| 1.0 - proficiency);

    allocate_hours(lacking, stats.practice_hours_per_week)
}
