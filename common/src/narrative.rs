pub fn forecast_message(
    current_skill_level: i32,
    practice_hours_per_week: f64,
    projected_skill_level: i32,
    projected_improvement: i32,
) -> String {
    if projected_improvement > 0 {
        format!(
            "Based on your stats and practice hours, your current skill level is a {}. \
             By practicing for {} hours per week, you are projected to reach \
             a skill level of {} in one year. That's an improvement of \
             {} level(s)! Keep up the great work.",
            current_skill_level, practice_hours_per_week, projected_skill_level, projected_improvement
        )
    } else {
        format!(
            "Based on your stats, your current skill level is a {}. \
             Your current practice schedule is great for maintaining this high level of play!",
            current_skill_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improving_message() {
        assert_eq!(
            forecast_message(5, 10.0, 7, 2),
            "Based on your stats and practice hours, your current skill level is a 5. \
             By practicing for 10 hours per week, you are projected to reach a skill level of 7 \
             in one year. That's an improvement of 2 level(s)! Keep up the great work."
        );
        assert!(forecast_message(3, 7.5, 5, 2).contains("practicing for 7.5 hours per week"));
    }

    #[test]
    fn maintaining_message() {
        let message = forecast_message(10, 12.0, 10, 0);
        assert_eq!(
            message,
            "Based on your stats, your current skill level is a 10. \
             Your current practice schedule is great for maintaining this high level of play!"
        );
        assert!(forecast_message(4, 0.0, 4, 0).starts_with("Based on your stats, your current skill level is a 4."));
    }
}
