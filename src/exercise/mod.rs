pub mod calorie_estimator;
pub mod energy_table;

pub use calorie_estimator::{estimate, CalorieEstimate};
pub use energy_table::{ExerciseEntry, EXERCISE_TABLE};
