//! Text rendering of each tab's state.

use serde_json::{json, Value};

use crate::chart::{to_long_form, ChartRenderer};
use crate::exercise::CalorieEstimate;

use super::exercise_tab::burned_message;
use super::food_tab::{FoodInsightsTab, FoodTabState, SelectionError};
use super::task::ActionState;
use super::theme::Theme;

pub const TITLE: &str = "🥗 NutriNova";
pub const SUBTITLE: &str = "Smarter Food & Fitness Insights";
pub const NO_RESULTS_MESSAGE: &str = "No results found. Try another food name.";

pub fn header(theme: Theme) -> String {
    format!(
        "{}\n{}\n",
        theme.title().apply_to(TITLE),
        theme.muted().apply_to(SUBTITLE)
    )
}

pub fn food_tab(tab: &FoodInsightsTab, theme: Theme) -> String {
    match tab.state() {
        FoodTabState::Idle => theme.muted().apply_to("Enter a food item to search.").to_string(),
        FoodTabState::QueryEntered { query } => format!("Searching for {}...", query),
        FoodTabState::ResultsShown { query, results } => results_found(query, results.len(), theme),
        FoodTabState::FoodSelected { query, results, selection } => {
            let mut out = results_found(query, results.len(), theme);
            out.push_str("\n\n");
            out.push_str(&theme.heading().apply_to("Nutrition Info").to_string());
            out.push('\n');
            let nutrients = serde_json::to_string_pretty(&selection.nutrients)
                .unwrap_or_else(|_| selection.nutrients.to_string());
            out.push_str(&theme.body().apply_to(nutrients).to_string());
            out.push_str("\n\n");
            out.push_str(&theme.heading().apply_to("🤖 AI Insights").to_string());
            out.push('\n');
            out.push_str(&narrative(&selection.insight, theme));
            out.push_str("\n\n");
            out.push_str(&ChartRenderer::new(theme).render(&selection.table));
            out
        }
        FoodTabState::NoResults { .. } => theme.error().apply_to(NO_RESULTS_MESSAGE).to_string(),
        FoodTabState::LookupFailed { reason, .. } => theme
            .error()
            .apply_to(format!("Food lookup failed: {}. Try again in a moment.", reason))
            .to_string(),
    }
}

/// Machine-readable form of the Food Insights tab. A failed lookup carries
/// an `error` field instead of an empty result list.
pub fn food_report(tab: &FoodInsightsTab) -> Value {
    match tab.state() {
        FoodTabState::Idle => json!({ "query": "", "results": [] }),
        FoodTabState::QueryEntered { query } | FoodTabState::NoResults { query } => {
            json!({ "query": query, "results": [] })
        }
        FoodTabState::ResultsShown { query, results } => json!({
            "query": query,
            "results": results.iter().map(|r| r.description.as_str()).collect::<Vec<_>>(),
        }),
        FoodTabState::FoodSelected { query, selection, .. } => json!({
            "query": query,
            "food": selection.record.description,
            "nutrients": selection.nutrients,
            "insight": selection.insight.ready(),
            "samples": to_long_form(&selection.table),
        }),
        FoodTabState::LookupFailed { query, reason } => json!({ "query": query, "error": reason }),
    }
}

pub fn selection_error(err: &SelectionError, theme: Theme) -> String {
    theme
        .error()
        .apply_to(format!("Cannot select that food: {}.", err))
        .to_string()
}

fn results_found(query: &str, count: usize, theme: Theme) -> String {
    format!(
        "{} {}",
        theme.success().apply_to(format!("Found {} results for", count)),
        theme.success().bold().apply_to(query)
    )
}

pub fn exercise_result(estimate: &CalorieEstimate, theme: Theme) -> String {
    format!("🔥 {}", theme.success().apply_to(burned_message(estimate)))
}

pub fn meal_plan(plan: &ActionState<String>, theme: Theme) -> String {
    match plan {
        ActionState::Idle => String::new(),
        _ => format!(
            "{}\n{}",
            theme.heading().apply_to("🍽️ Your AI Meal Plan"),
            narrative(plan, theme)
        ),
    }
}

fn narrative(state: &ActionState<String>, theme: Theme) -> String {
    match state {
        ActionState::Idle => String::new(),
        ActionState::Loading => theme.muted().apply_to("Thinking...").to_string(),
        ActionState::Ready(text) => theme.body().apply_to(text).to_string(),
        ActionState::Failed(reason) => theme.error().apply_to(format!("Request {}.", reason)).to_string(),
    }
}
