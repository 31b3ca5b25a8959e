//! Food Insights tab.
//!
//! `Idle -> QueryEntered -> ResultsShown -> FoodSelected`, with `NoResults`
//! and `LookupFailed` as terminal states for a query. A new query restarts
//! the machine from any state.

use crate::chart::NutritionTable;
use crate::food_lookup::{FoodLookupError, FoodRecord, FoodSearch};
use crate::insight_generator::{food_insight_prompt, InsightGenerator};
use crate::nutrient_extractor::{self, NutrientProfile};

use super::task::ActionState;

#[derive(Debug, Clone, PartialEq)]
pub struct FoodSelection {
    pub record: FoodRecord,
    pub nutrients: NutrientProfile,
    pub insight: ActionState<String>,
    pub table: NutritionTable,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FoodTabState {
    #[default]
    Idle,
    QueryEntered {
        query: String,
    },
    ResultsShown {
        query: String,
        results: Vec<FoodRecord>,
    },
    FoodSelected {
        query: String,
        results: Vec<FoodRecord>,
        selection: Box<FoodSelection>,
    },
    NoResults {
        query: String,
    },
    LookupFailed {
        query: String,
        reason: String,
    },
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SelectionError {
    #[error("there are no results to select from")]
    NothingToSelect,
    #[error("selection {index} is out of range ({available} results)")]
    OutOfRange { index: usize, available: usize },
    #[error("result numbers start at 1")]
    ZeroNumber,
}

/// Converts a 1-based result number into an index into the results.
pub fn index_from_number(number: usize) -> Result<usize, SelectionError> {
    number.checked_sub(1).ok_or(SelectionError::ZeroNumber)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodInsightsTab {
    state: FoodTabState,
}

impl FoodInsightsTab {
    pub fn state(&self) -> &FoodTabState {
        &self.state
    }

    /// Records a query. Returns the trimmed query if a search should run.
    pub fn enter_query(&mut self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            self.state = FoodTabState::Idle;
            return None;
        }
        self.state = FoodTabState::QueryEntered { query: query.to_string() };
        Some(query.to_string())
    }

    pub fn apply_search_result(&mut self, result: Result<Vec<FoodRecord>, FoodLookupError>) {
        match result {
            Ok(records) => self.apply_records(records),
            Err(e) => self.fail_lookup(e.to_string()),
        }
    }

    pub fn fail_lookup(&mut self, reason: String) {
        let FoodTabState::QueryEntered { query } = &self.state else {
            return;
        };
        let query = query.clone();
        tracing::warn!(query = %query, %reason, "food lookup failed");
        self.state = FoodTabState::LookupFailed { query, reason };
    }

    fn apply_records(&mut self, records: Vec<FoodRecord>) {
        let FoodTabState::QueryEntered { query } = &self.state else {
            return;
        };
        let query = query.clone();
        let results = dedupe_by_description(records);
        self.state = if results.is_empty() {
            FoodTabState::NoResults { query }
        } else {
            FoodTabState::ResultsShown { query, results }
        };
    }

    pub async fn search(&mut self, query: &str, food_search: &dyn FoodSearch) -> &FoodTabState {
        if let Some(query) = self.enter_query(query) {
            tracing::info!(query = %query, "searching foods");
            let result = food_search.search(&query).await;
            self.apply_search_result(result);
        }
        &self.state
    }

    pub fn results(&self) -> &[FoodRecord] {
        match &self.state {
            FoodTabState::ResultsShown { results, .. } | FoodTabState::FoodSelected { results, .. } => {
                results.as_slice()
            }
            _ => &[],
        }
    }

    pub fn choices(&self) -> Vec<&str> {
        self.results().iter().map(|r| r.description.as_str()).collect()
    }

    pub fn selection(&self) -> Option<&FoodSelection> {
        match &self.state {
            FoodTabState::FoodSelected { selection, .. } => Some(selection.as_ref()),
            _ => None,
        }
    }

    /// Selects a result, extracts its nutrients and returns the insight prompt.
    /// The insight itself stays `Loading` until [`Self::apply_insight`].
    pub fn select(&mut self, index: usize) -> Result<String, SelectionError> {
        let (query, results) = match std::mem::take(&mut self.state) {
            FoodTabState::ResultsShown { query, results }
            | FoodTabState::FoodSelected { query, results, .. } => (query, results),
            other => {
                self.state = other;
                return Err(SelectionError::NothingToSelect);
            }
        };

        let Some(record) = results.get(index).cloned() else {
            let available = results.len();
            self.state = FoodTabState::ResultsShown { query, results };
            return Err(SelectionError::OutOfRange { index, available });
        };

        let nutrients = nutrient_extractor::extract(&record);
        let prompt = food_insight_prompt(&record.description, &nutrients);
        let table = NutritionTable::single(record.description.clone(), nutrients.clone());
        self.state = FoodTabState::FoodSelected {
            query,
            results,
            selection: Box::new(FoodSelection {
                record,
                nutrients,
                insight: ActionState::Loading,
                table,
            }),
        };
        Ok(prompt)
    }

    pub fn apply_insight(&mut self, outcome: ActionState<String>) {
        if let FoodTabState::FoodSelected { selection, .. } = &mut self.state {
            selection.insight = outcome;
        }
    }

    pub async fn select_and_generate(
        &mut self,
        index: usize,
        insights: &InsightGenerator,
    ) -> Result<&FoodSelection, SelectionError> {
        let prompt = self.select(index)?;
        let text = insights.generate(&prompt).await;
        self.apply_insight(ActionState::Ready(text));
        self.selection().ok_or(SelectionError::NothingToSelect)
    }
}

/// Keeps the first record for each description, as a description-keyed
/// selection control would.
fn dedupe_by_description(records: Vec<FoodRecord>) -> Vec<FoodRecord> {
    let mut unique: Vec<FoodRecord> = Vec::with_capacity(records.len());
    for record in records {
        if !unique.iter().any(|r| r.description == record.description) {
            unique.push(record);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food_lookup::NutrientEntry;

    fn food(description: &str, nutrients: &[(&str, f64)]) -> FoodRecord {
        FoodRecord {
            fdc_id: None,
            description: description.to_string(),
            data_type: None,
            brand_owner: None,
            nutrients: nutrients
                .iter()
                .map(|(n, v)| NutrientEntry {
                    nutrient_name: n.to_string(),
                    value: Some(*v),
                    unit_name: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_blank_query_stays_idle() {
        let mut tab = FoodInsightsTab::default();
        assert_eq!(tab.enter_query("  "), None);
        assert_eq!(tab.state(), &FoodTabState::Idle);
    }

    #[test]
    fn test_results_then_selection() {
        let mut tab = FoodInsightsTab::default();
        assert_eq!(tab.enter_query(" banana "), Some("banana".to_string()));
        tab.apply_search_result(Ok(vec![
            food("Bananas, raw", &[("Protein", 1.09), ("Energy", 89.0)]),
            food("Banana chips", &[("Energy", 519.0)]),
        ]));
        assert_eq!(tab.choices(), vec!["Bananas, raw", "Banana chips"]);

        let prompt = tab.select(0).unwrap();
        assert_eq!(
            prompt,
            "Give me a quick analysis of Bananas, raw with these nutrients: {'Protein': 1.09, 'Energy': 89.0}"
        );
        let selection = tab.selection().unwrap();
        assert!(selection.insight.is_loading());
        assert_eq!(selection.nutrients.len(), 2);

        tab.apply_insight(ActionState::Ready("Good potassium source.".to_string()));
        assert_eq!(
            tab.selection().unwrap().insight.ready().map(String::as_str),
            Some("Good potassium source.")
        );

        // Re-selecting from FoodSelected keeps the result list.
        tab.select(1).unwrap();
        assert_eq!(tab.selection().unwrap().record.description, "Banana chips");
        assert_eq!(tab.results().len(), 2);
    }

    #[test]
    fn test_empty_results_are_terminal() {
        let mut tab = FoodInsightsTab::default();
        tab.enter_query("xyzzy");
        tab.apply_search_result(Ok(Vec::new()));
        assert_eq!(tab.state(), &FoodTabState::NoResults { query: "xyzzy".to_string() });
        assert_eq!(tab.select(0), Err(SelectionError::NothingToSelect));
    }

    #[test]
    fn test_lookup_failure_state() {
        let mut tab = FoodInsightsTab::default();
        tab.enter_query("apple");
        tab.fail_lookup("cancelled".to_string());
        assert!(matches!(
            tab.state(),
            FoodTabState::LookupFailed { query, reason } if query == "apple" && reason == "cancelled"
        ));
    }

    #[test]
    fn test_out_of_range_selection_keeps_results() {
        let mut tab = FoodInsightsTab::default();
        tab.enter_query("apple");
        tab.apply_search_result(Ok(vec![food("Apple, raw", &[])]));
        assert_eq!(tab.select(3), Err(SelectionError::OutOfRange { index: 3, available: 1 }));
        assert_eq!(tab.choices(), vec!["Apple, raw"]);
    }

    #[test]
    fn test_result_numbers_are_one_based() {
        assert_eq!(index_from_number(1), Ok(0));
        assert_eq!(index_from_number(4), Ok(3));
        assert_eq!(index_from_number(0), Err(SelectionError::ZeroNumber));
    }

    #[test]
    fn test_duplicate_descriptions_keep_first() {
        let mut tab = FoodInsightsTab::default();
        tab.enter_query("milk");
        tab.apply_search_result(Ok(vec![
            food("Milk, whole", &[("Protein", 3.2)]),
            food("Milk, whole", &[("Protein", 9.9)]),
            food("Milk, skim", &[("Protein", 3.4)]),
        ]));
        assert_eq!(tab.choices(), vec!["Milk, whole", "Milk, skim"]);
        tab.select(0).unwrap();
        assert_eq!(tab.selection().unwrap().nutrients.get("Protein"), Some(3.2));
    }

    #[test]
    fn test_results_ignored_without_pending_query() {
        let mut tab = FoodInsightsTab::default();
        tab.apply_search_result(Ok(vec![food("Apple, raw", &[])]));
        assert_eq!(tab.state(), &FoodTabState::Idle);
    }
}
