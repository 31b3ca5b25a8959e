use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Select};

use super::exercise_tab::{ExerciseTrackerTab, DURATION_RANGE_MIN, WEIGHT_RANGE_KG};
use super::food_tab::{FoodInsightsTab, FoodSelection, FoodTabState, SelectionError};
use super::meal_planner_tab::{DietPreference, MealPlannerTab, DAILY_CALORIES_RANGE};
use super::task::{wait_interruptible, ActionState, PendingAction};
use super::theme::Theme;
use super::view;
use crate::exercise::energy_table;
use crate::food_lookup::FoodSearch;
use crate::insight_generator::InsightGenerator;

const BACK_LABEL: &str = "Back to tabs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    FoodInsights,
    ExerciseTracker,
    MealPlanner,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::FoodInsights, Tab::ExerciseTracker, Tab::MealPlanner];

    pub fn label(self) -> &'static str {
        match self {
            Tab::FoodInsights => "🍎 Food Insights",
            Tab::ExerciseTracker => "🏋️ Exercise Tracker",
            Tab::MealPlanner => "📅 Meal Planner",
        }
    }
}

/// The three tabs plus the services they call. Tabs never read each other.
pub struct Dashboard {
    food_search: Arc<dyn FoodSearch>,
    insights: InsightGenerator,
    theme: Theme,
    pub food: FoodInsightsTab,
    pub exercise: ExerciseTrackerTab,
    pub meal_planner: MealPlannerTab,
}

impl Dashboard {
    pub fn new(food_search: Arc<dyn FoodSearch>, insights: InsightGenerator, theme: Theme) -> Self {
        Self {
            food_search,
            insights,
            theme,
            food: FoodInsightsTab::default(),
            exercise: ExerciseTrackerTab::default(),
            meal_planner: MealPlannerTab::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    pub async fn search_food(&mut self, query: &str) -> &FoodTabState {
        self.food.search(query, self.food_search.as_ref()).await
    }

    pub async fn select_food(&mut self, index: usize) -> Result<&FoodSelection, SelectionError> {
        self.food.select_and_generate(index, &self.insights).await
    }

    pub async fn generate_meal_plan(&mut self) -> &ActionState<String> {
        self.meal_planner.generate(&self.insights).await
    }

    /// Runs the interactive dashboard until the user quits.
    pub async fn run_interactive(&mut self) -> Result<()> {
        let prompts = ColorfulTheme::default();
        loop {
            println!("\n{}", view::header(self.theme));

            let dark_label = if self.theme.is_dark() {
                "☀️ Light Mode"
            } else {
                "🌙 Dark Mode"
            };
            let mut items: Vec<&str> = Tab::ALL.iter().map(|t| t.label()).collect();
            items.push(dark_label);
            items.push("Quit");

            let choice = Select::with_theme(&prompts)
                .with_prompt("Choose a tab")
                .items(&items)
                .default(0)
                .interact()
                .context("failed to read tab choice")?;

            match choice {
                0 => self.food_insights_interactive(&prompts).await?,
                1 => self.exercise_interactive(&prompts)?,
                2 => self.meal_planner_interactive(&prompts).await?,
                3 => self.toggle_theme(),
                _ => return Ok(()),
            }
        }
    }

    async fn food_insights_interactive(&mut self, prompts: &ColorfulTheme) -> Result<()> {
        let query: String = Input::with_theme(prompts)
            .with_prompt("Enter a food item")
            .allow_empty(true)
            .interact_text()
            .context("failed to read food query")?;

        let Some(query) = self.food.enter_query(&query) else {
            println!("{}", view::food_tab(&self.food, self.theme));
            return Ok(());
        };

        let search = Arc::clone(&self.food_search);
        let action = PendingAction::spawn(async move { search.search(&query).await });
        match wait_interruptible(action, "Searching the food database...").await {
            ActionState::Ready(result) => self.food.apply_search_result(result),
            ActionState::Failed(reason) => self.food.fail_lookup(reason),
            ActionState::Idle | ActionState::Loading => {}
        }
        println!("{}", view::food_tab(&self.food, self.theme));

        if !matches!(self.food.state(), FoodTabState::ResultsShown { .. }) {
            return Ok(());
        }

        let mut choices = self.food.choices().into_iter().map(str::to_string).collect::<Vec<_>>();
        choices.push(BACK_LABEL.to_string());
        let mut default = 0;
        loop {
            let index = Select::with_theme(prompts)
                .with_prompt("Select a food")
                .items(&choices)
                .default(default)
                .interact()
                .context("failed to read food selection")?;
            if index + 1 == choices.len() {
                return Ok(());
            }

            let prompt = self.food.select(index)?;
            let insights = self.insights.clone();
            let action = PendingAction::spawn(async move { insights.generate(&prompt).await });
            let outcome = wait_interruptible(action, "Asking the AI for insights...").await;
            self.food.apply_insight(outcome);
            println!("{}", view::food_tab(&self.food, self.theme));
            default = index;
        }
    }

    fn exercise_interactive(&mut self, prompts: &ColorfulTheme) -> Result<()> {
        println!("{}", self.theme.heading().apply_to("Track Your Exercise"));

        let weight: u32 = Input::with_theme(prompts)
            .with_prompt("Enter your weight (kg)")
            .default(self.exercise.weight_kg())
            .validate_with(|v: &u32| in_range(*v, &WEIGHT_RANGE_KG))
            .interact_text()
            .context("failed to read weight")?;
        self.exercise.set_weight(weight)?;

        let names: Vec<&str> = energy_table::exercise_names().collect();
        let current = names.iter().position(|n| *n == self.exercise.exercise()).unwrap_or(0);
        let picked = Select::with_theme(prompts)
            .with_prompt("Select exercise")
            .items(&names)
            .default(current)
            .interact()
            .context("failed to read exercise")?;
        self.exercise.select_exercise(names[picked])?;

        let duration: u32 = Input::with_theme(prompts)
            .with_prompt("Duration (minutes)")
            .default(self.exercise.duration_min())
            .validate_with(|v: &u32| in_range(*v, &DURATION_RANGE_MIN))
            .interact_text()
            .context("failed to read duration")?;
        self.exercise.set_duration(duration)?;

        let estimate = self.exercise.calculate().clone();
        println!("{}", view::exercise_result(&estimate, self.theme));
        Ok(())
    }

    async fn meal_planner_interactive(&mut self, prompts: &ColorfulTheme) -> Result<()> {
        println!("{}", self.theme.heading().apply_to("AI-Powered Meal Planner"));

        let calories: u32 = Input::with_theme(prompts)
            .with_prompt("Target daily calories")
            .default(self.meal_planner.daily_calories())
            .validate_with(|v: &u32| in_range(*v, &DAILY_CALORIES_RANGE))
            .interact_text()
            .context("failed to read daily calories")?;
        self.meal_planner.set_daily_calories(calories)?;

        let diets: Vec<String> = DietPreference::ALL.iter().map(|d| d.to_string()).collect();
        let current = DietPreference::ALL
            .iter()
            .position(|d| *d == self.meal_planner.diet())
            .unwrap_or(0);
        let picked = Select::with_theme(prompts)
            .with_prompt("Diet preference")
            .items(&diets)
            .default(current)
            .interact()
            .context("failed to read diet preference")?;
        self.meal_planner.set_diet(DietPreference::ALL[picked]);

        let prompt = self.meal_planner.begin();
        let insights = self.insights.clone();
        let action = PendingAction::spawn(async move { insights.generate(&prompt).await });
        let outcome = wait_interruptible(action, "Planning your meals...").await;
        self.meal_planner.finish(outcome);
        println!("{}", view::meal_plan(self.meal_planner.plan(), self.theme));
        Ok(())
    }
}

fn in_range(value: u32, range: &std::ops::RangeInclusive<u32>) -> Result<(), String> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(format!("enter a value between {} and {}", range.start(), range.end()))
    }
}
