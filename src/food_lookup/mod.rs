pub mod client;
pub mod records;

pub use client::{FoodLookupClient, FoodLookupError, FoodSearch};
pub use records::{FoodRecord, NutrientEntry};
