use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::food_lookup::FoodRecord;

/// How many raw nutrient lines of a record are shown.
pub const MAX_DISPLAYED_NUTRIENTS: usize = 5;

/// Nutrient name to amount, kept in the order the database reported them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientProfile {
    entries: Vec<(String, f64)>,
}

impl NutrientProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`; an existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, f64)> for NutrientProfile {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut profile = NutrientProfile::new();
        for (name, value) in iter {
            profile.insert(name, value);
        }
        profile
    }
}

/// Renders as `{'Protein': 1.09, 'Energy': 89.0}`.
impl fmt::Display for NutrientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, (name, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {:?}", name, value)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for NutrientProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Takes the first five nutrient lines of `record` that carry a value.
pub fn extract(record: &FoodRecord) -> NutrientProfile {
    record
        .nutrients
        .iter()
        .take(MAX_DISPLAYED_NUTRIENTS)
        .filter_map(|entry| entry.value.map(|value| (entry.nutrient_name.clone(), value)))
        .collect()
}
