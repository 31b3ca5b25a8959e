pub mod dashboard;
pub mod exercise_tab;
pub mod food_tab;
pub mod meal_planner_tab;
pub mod task;
pub mod theme;
pub mod view;

pub use dashboard::{Dashboard, Tab};
pub use exercise_tab::ExerciseTrackerTab;
pub use food_tab::{FoodInsightsTab, FoodTabState};
pub use meal_planner_tab::{DietPreference, MealPlannerTab};
pub use task::{ActionState, PendingAction};
pub use theme::Theme;
