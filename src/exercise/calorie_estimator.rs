use serde::Serialize;

use super::energy_table;

/// Resting oxygen uptake in ml/kg/min used by the MET formula.
const RESTING_O2_ML_PER_KG_MIN: f64 = 3.5;
/// Divisor converting ml O2 * kg to kcal per minute.
const KCAL_DIVISOR: f64 = 200.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieEstimate {
    pub exercise: String,
    pub weight_kg: f64,
    pub duration_min: f64,
    pub calories_burned: f64,
}

impl CalorieEstimate {
    pub fn compute(weight_kg: f64, exercise: &str, duration_min: f64) -> Self {
        Self {
            exercise: exercise.to_string(),
            weight_kg,
            duration_min,
            calories_burned: estimate(weight_kg, exercise, duration_min),
        }
    }
}

/// Estimates energy expenditure in kcal with `met * 3.5 * weight / 200 * minutes`.
///
/// Unknown exercise names yield `0.0`. The result is rounded to two decimal
/// places with halves rounded away from zero (`f64::round`).
pub fn estimate(weight_kg: f64, exercise: &str, duration_min: f64) -> f64 {
    let Some(met) = energy_table::lookup(exercise) else {
        return 0.0;
    };
    let calories = met * RESTING_O2_ML_PER_KG_MIN * weight_kg / KCAL_DIVISOR * duration_min;
    round_to_cents(calories)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
