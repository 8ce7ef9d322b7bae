use serde::{Deserialize, Serialize};

/// Raw statistics submitted for one player.
///
/// Every field is required. Values outside the meaningful range are not rejected:
/// the engine clamps them while normalizing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    #[serde(rename = "fargorate", alias = "fargo_rate")]
    pub fargo_rate: f64,
    pub bu_total: f64,
    pub win_percentage: f64,
    pub years_of_experience: f64,
    pub bu_drill_2: f64,
    pub bu_drill_6: f64,
    pub bu_drill_7: f64,
    pub bu_drill_8: f64,
    pub practice_hours_per_week: f64,
}

impl PlayerStats {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fargo_rate: f64,
        bu_total: f64,
        win_percentage: f64,
        years_of_experience: f64,
        bu_drill_7: f64,
        bu_drill_8: f64,
        practice_hours_per_week: f64,
        bu_drill_2: f64,
        bu_drill_6: f64,
    ) -> Self {
        PlayerStats {
            fargo_rate,
            bu_total,
            win_percentage,
            years_of_experience,
            bu_drill_2,
            bu_drill_6,
            bu_drill_7,
            bu_drill_8,
            practice_hours_per_week,
        }
    }
}

/// Scales `value` by `ceiling` into [0, 1].
pub fn normalize(value: f64, ceiling: f64) -> f64 {
    (value / ceiling).clamp(0.0, 1.0)
}
