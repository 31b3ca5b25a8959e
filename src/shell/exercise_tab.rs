use std::ops::RangeInclusive;

use crate::exercise::{energy_table, CalorieEstimate, EXERCISE_TABLE};

pub const WEIGHT_RANGE_KG: RangeInclusive<u32> = 30..=200;
pub const DURATION_RANGE_MIN: RangeInclusive<u32> = 5..=300;
pub const DEFAULT_WEIGHT_KG: u32 = 70;
pub const DEFAULT_DURATION_MIN: u32 = 30;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("unknown choice '{0}'")]
    UnknownChoice(String),
}

pub(crate) fn check_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<u32, InputError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseTrackerTab {
    weight_kg: u32,
    exercise: String,
    duration_min: u32,
    last: Option<CalorieEstimate>,
}

impl Default for ExerciseTrackerTab {
    fn default() -> Self {
        Self {
            weight_kg: DEFAULT_WEIGHT_KG,
            exercise: EXERCISE_TABLE[0].name.to_string(),
            duration_min: DEFAULT_DURATION_MIN,
            last: None,
        }
    }
}

impl ExerciseTrackerTab {
    pub fn weight_kg(&self) -> u32 {
        self.weight_kg
    }

    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    pub fn duration_min(&self) -> u32 {
        self.duration_min
    }

    pub fn last_estimate(&self) -> Option<&CalorieEstimate> {
        self.last.as_ref()
    }

    pub fn set_weight(&mut self, weight_kg: u32) -> Result<(), InputError> {
        self.weight_kg = check_range("weight (kg)", weight_kg, &WEIGHT_RANGE_KG)?;
        Ok(())
    }

    pub fn set_duration(&mut self, duration_min: u32) -> Result<(), InputError> {
        self.duration_min = check_range("duration (minutes)", duration_min, &DURATION_RANGE_MIN)?;
        Ok(())
    }

    /// Picks one of the tracked activities.
    pub fn select_exercise(&mut self, name: &str) -> Result<(), InputError> {
        if energy_table::lookup(name).is_none() {
            return Err(InputError::UnknownChoice(name.to_string()));
        }
        self.exercise = name.to_string();
        Ok(())
    }

    /// Sets any activity name; names outside the table estimate to zero.
    pub fn set_exercise_unchecked(&mut self, name: impl Into<String>) {
        self.exercise = name.into();
    }

    pub fn calculate(&mut self) -> &CalorieEstimate {
        let estimate = CalorieEstimate::compute(
            f64::from(self.weight_kg),
            &self.exercise,
            f64::from(self.duration_min),
        );
        tracing::info!(
            exercise = %estimate.exercise,
            calories = estimate.calories_burned,
            "calories estimated"
        );
        self.last.insert(estimate)
    }
}

pub fn burned_message(estimate: &CalorieEstimate) -> String {
    format!(
        "You burned approximately {} calories doing {} for {} minutes.",
        estimate.calories_burned, estimate.exercise, estimate.duration_min
    )
}
