use clap::ValueEnum;
use std::fmt;
use std::ops::RangeInclusive;

use super::exercise_tab::{check_range, InputError};
use super::task::ActionState;
use crate::insight_generator::{meal_plan_prompt, InsightGenerator};

pub const DAILY_CALORIES_RANGE: RangeInclusive<u32> = 1200..=4000;
pub const DEFAULT_DAILY_CALORIES: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DietPreference {
    #[default]
    Balanced,
    Vegetarian,
    Vegan,
    Keto,
    HighProtein,
}

impl DietPreference {
    pub const ALL: [DietPreference; 5] = [
        DietPreference::Balanced,
        DietPreference::Vegetarian,
        DietPreference::Vegan,
        DietPreference::Keto,
        DietPreference::HighProtein,
    ];
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DietPreference::Balanced => "Balanced",
            DietPreference::Vegetarian => "Vegetarian",
            DietPreference::Vegan => "Vegan",
            DietPreference::Keto => "Keto",
            DietPreference::HighProtein => "High-Protein",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealPlannerTab {
    daily_calories: u32,
    diet: DietPreference,
    plan: ActionState<String>,
}

impl Default for MealPlannerTab {
    fn default() -> Self {
        Self {
            daily_calories: DEFAULT_DAILY_CALORIES,
            diet: DietPreference::default(),
            plan: ActionState::Idle,
        }
    }
}

impl MealPlannerTab {
    pub fn daily_calories(&self) -> u32 {
        self.daily_calories
    }

    pub fn diet(&self) -> DietPreference {
        self.diet
    }

    pub fn plan(&self) -> &ActionState<String> {
        &self.plan
    }

    pub fn set_daily_calories(&mut self, calories: u32) -> Result<(), InputError> {
        self.daily_calories = check_range("daily calories", calories, &DAILY_CALORIES_RANGE)?;
        Ok(())
    }

    pub fn set_diet(&mut self, diet: DietPreference) {
        self.diet = diet;
    }

    pub fn prompt(&self) -> String {
        meal_plan_prompt(self.diet, self.daily_calories)
    }

    /// Marks the plan as loading and returns the prompt to send.
    pub fn begin(&mut self) -> String {
        self.plan = ActionState::Loading;
        self.prompt()
    }

    pub fn finish(&mut self, outcome: ActionState<String>) {
        self.plan = outcome;
    }

    pub async fn generate(&mut self, insights: &InsightGenerator) -> &ActionState<String> {
        let prompt = self.begin();
        tracing::info!(diet = %self.diet, calories = self.daily_calories, "generating meal plan");
        let text = insights.generate(&prompt).await;
        self.finish(ActionState::Ready(text));
        &self.plan
    }
}
