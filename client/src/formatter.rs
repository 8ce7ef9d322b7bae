pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0}", hours)
    } else {
        format!("{:.2}", hours)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

pub fn format_improvement(improvement: i32) -> String {
    if improvement > 0 {
        format!("+{}", improvement)
    } else {
        improvement.to_string()
    }
}
