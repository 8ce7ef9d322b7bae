use serde::{Deserialize, Serialize};
use common::estimator::RateFeatures;
use common::PlayerStats;
use crate::ClientError;

fn default_table_difficulty() -> f64 {
    1.0
}

/// Raw drill results as a player records them, before `bu_total` and the rating are known.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DrillSheet {
    #[serde(rename = "fargorate", alias = "fargo_rate", default)]
    pub fargo_rate: Option<f64>,
    pub years_of_experience: f64,
    pub years_of_tournament_experience: f64,
    pub win_percentage: f64,
    pub bu_drill_1: f64,
    pub bu_drill_2: f64,
    pub bu_drill_3: f64,
    pub bu_drill_4: f64,
    pub bu_drill_5: f64,
    pub bu_drill_6: f64,
    pub bu_drill_7: f64,
    pub bu_drill_8: f64,
    #[serde(default = "default_table_difficulty")]
    pub table_difficulty_total: f64,
    #[serde(default)]
    pub mental_drills: i64,
    pub practice_hours_per_week: f64,
}

impl DrillSheet {
    pub fn bu_total(&self) -> f64 {
        [
            self.bu_drill_1,
            self.bu_drill_2,
            self.bu_drill_3,
            self.bu_drill_4,
            self.bu_drill_5,
            self.bu_drill_6,
            self.bu_drill_7,
            self.bu_drill_8,
        ]
        .iter()
        .sum()
    }

    /// A rate of 0 counts as unknown.
    pub fn known_fargo_rate(&self) -> Option<f64> {
        self.fargo_rate.filter(|rate| *rate != 0.0)
    }

    pub fn rate_features(&self) -> RateFeatures {
        RateFeatures {
            years_of_experience_playing: self.years_of_experience,
            years_of_tournament_experience: self.years_of_tournament_experience,
            win_pct_tournaments: self.win_percentage,
            bu_drill_1: self.bu_drill_1,
            bu_drill_2: self.bu_drill_2,
            bu_drill_3: self.bu_drill_3,
            bu_drill_4: self.bu_drill_4,
            bu_drill_5: self.bu_drill_5,
            bu_drill_6: self.bu_drill_6,
            bu_drill_7: self.bu_drill_7,
            bu_drill_8: self.bu_drill_8,
            bu_total: self.bu_total(),
            table_difficulty_total: self.table_difficulty_total,
            mental_drills: self.mental_drills,
        }
    }

    /// `predict_rate` is only called when the sheet carries no usable rating.
    pub fn into_player_stats(
        self,
        predict_rate: impl FnOnce(&RateFeatures) -> Result<f64, ClientError>,
    ) -> Result<PlayerStats, ClientError> {
        let fargo_rate = match self.known_fargo_rate() {
            Some(rate) => rate,
            None => predict_rate(&self.rate_features())?,
        };

        Ok(PlayerStats::new(
            fargo_rate,
            self.bu_total(),
            self.win_percentage,
            self.years_of_experience,
            self.bu_drill_7,
            self.bu_drill_8,
            self.practice_hours_per_week,
            self.bu_drill_2,
            self.bu_drill_6,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_json_input;

    const SHEET: &[u8] = br#"{
        "years_of_experience": 6, "years_of_tournament_experience": 2,
        "win_percentage": 0.4, "bu_drill_1": 5, "bu_drill_2": 6, "bu_drill_3": 7,
        "bu_drill_4": 4, "bu_drill_5": 3, "bu_drill_6": 6, "bu_drill_7": 10,
        "bu_drill_8": 9, "mental_drills": 1, "practice_hours_per_week": 8
    }"#;

    #[test]
    fn drills_sum_into_bu_total_and_predicted_rate_is_used() {
        let sheet: DrillSheet = parse_json_input(SHEET).unwrap();
        assert_eq!(sheet.fargo_rate, None);
        assert_eq!(sheet.table_difficulty_total, 1.0);

        let mut seen = None;
        let stats = sheet
            .into_player_stats(|features| {
                seen = Some(*features);
                Ok(512.0)
            })
            .unwrap();

        assert_eq!(stats.bu_total, 50.0);
        assert_eq!(stats.fargo_rate, 512.0);
        assert_eq!(stats.bu_drill_2, 6.0);
        assert_eq!(stats.bu_drill_6, 6.0);
        assert_eq!(stats.bu_drill_7, 10.0);
        assert_eq!(stats.bu_drill_8, 9.0);
        assert_eq!(stats.win_percentage, 0.4);
        assert_eq!(stats.practice_hours_per_week, 8.0);

        let features = seen.unwrap();
        assert_eq!(features.bu_total, 50.0);
        assert_eq!(features.win_pct_tournaments, 0.4);
        assert_eq!(features.years_of_experience_playing, 6.0);
        assert_eq!(features.mental_drills, 1);
    }

    #[test]
    fn zero_rate_is_predicted_and_known_rate_is_kept() {
        let mut sheet: DrillSheet = parse_json_input(SHEET).unwrap();

        sheet.fargo_rate = Some(0.0);
        let stats = sheet.into_player_stats(|_| Ok(431.0)).unwrap();
        assert_eq!(stats.fargo_rate, 431.0);

        sheet.fargo_rate = Some(575.0);
        let stats = sheet
            .into_player_stats(|_| Err(ClientError::NetworkError("unreachable".into())))
            .unwrap();
        assert_eq!(stats.fargo_rate, 575.0);
        assert_eq!(stats.bu_total, 50.0);
    }

    #[test]
    fn prediction_failure_is_returned() {
        let sheet: DrillSheet = parse_json_input(SHEET).unwrap();
        let result = sheet.into_player_stats(|_| Err(ClientError::APIError("500: model exploded".into())));

        assert_eq!(result, Err(ClientError::APIError("500: model exploded".into())));
    }
}
