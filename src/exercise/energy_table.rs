use serde::Serialize;

/// One activity and its Metabolic Equivalent of Task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExerciseEntry {
    pub name: &'static str,
    pub met_value: f64,
}

/// Static MET table, in the order the tracker offers the activities.
pub const EXERCISE_TABLE: &[ExerciseEntry] = &[
    ExerciseEntry { name: "Running (6 mph)", met_value: 9.8 },
    ExerciseEntry { name: "Cycling (moderate)", met_value: 7.5 },
    ExerciseEntry { name: "Walking (brisk)", met_value: 3.8 },
    ExerciseEntry { name: "Swimming", met_value: 6.0 },
    ExerciseEntry { name: "Yoga", met_value: 2.5 },
    ExerciseEntry { name: "Weightlifting", met_value: 6.0 },
];

/// Returns the MET value for an exercise name, matched exactly.
pub fn lookup(name: &str) -> Option<f64> {
    EXERCISE_TABLE
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.met_value)
}

pub fn exercise_names() -> impl Iterator<Item = &'static str> {
    EXERCISE_TABLE.iter().map(|entry| entry.name)
}
