use tabled::{Table, Tabled};
use common::skill::TrainingTier;
use common::SkillProjection;
use crate::formatter::{format_hours, format_improvement};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[derive(Tabled)]
pub struct PracticePlanTableItem {
    pub component: String,
    #[tabled(rename = "drills")]
    pub training_tier: String,
    pub hours: String,
}

pub fn practice_plan(projection: &SkillProjection) -> Vec<PracticePlanTableItem> {
    let training_tier = TrainingTier::from_skill_level(projection.current_skill_level);

    projection
        .recommended_hours
        .iter()
        .map(|(component, hours)| PracticePlanTableItem {
            component: component.to_string(),
            training_tier: format!("{} Level Drills", training_tier),
            hours: format_hours(hours),
        })
        .collect()
}

pub fn print_skill_projection(projection: &SkillProjection) {
    println!("Current skill level: {}", projection.current_skill_level);
    println!(
        "Projected skill level: {} ({})",
        projection.projected_skill_level,
        format_improvement(projection.projected_improvement)
    );
    println!("{}", projection.message);

    println!("{}", Table::new(practice_plan(projection)));
}
