use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One nutrient line of a food record, as reported by the food database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientEntry {
    #[serde(rename = "nutrientName")]
    pub nutrient_name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(rename = "unitName", default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(rename = "fdcId", default, skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
    pub description: String,
    #[serde(rename = "dataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(rename = "brandOwner", default, skip_serializing_if = "Option::is_none")]
    pub brand_owner: Option<String>,
    #[serde(rename = "foodNutrients", default)]
    pub nutrients: Vec<NutrientEntry>,
}

/// Loose envelope of `/foods/search`; records are validated one by one.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(default)]
    pub foods: Option<Vec<Value>>,
}

/// Converts the raw `foods` array into typed records, skipping entries that
/// do not carry the fields a record needs.
pub fn parse_food_records(foods: Vec<Value>) -> Vec<FoodRecord> {
    let total = foods.len();
    let records: Vec<FoodRecord> = foods
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| match serde_json::from_value::<FoodRecord>(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index = idx, error = %e, "skipping malformed food record");
                None
            }
        })
        .collect();
    if records.len() < total {
        tracing::debug!(kept = records.len(), total, "partial food search result");
    }
    records
}
