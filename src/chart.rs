use console::{pad_str, Alignment};
use serde::Serialize;

use crate::nutrient_extractor::NutrientProfile;
use crate::shell::theme::Theme;

const DEFAULT_BAR_WIDTH: usize = 40;
const MAX_LABEL_WIDTH: usize = 28;

/// One (food, nutrient, amount) row of the long-form table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientSample {
    pub food: String,
    pub nutrient: String,
    pub amount: f64,
}

/// Wide table: one row per food, one column per nutrient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutritionTable {
    rows: Vec<(String, NutrientProfile)>,
}

impl NutritionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(food: impl Into<String>, profile: NutrientProfile) -> Self {
        let mut table = Self::new();
        table.add_row(food, profile);
        table
    }

    pub fn add_row(&mut self, food: impl Into<String>, profile: NutrientProfile) {
        self.rows.push((food.into(), profile));
    }

    pub fn foods(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(food, _)| food.as_str())
    }

    /// Ordered union of nutrient names across all rows.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for (_, profile) in &self.rows {
            for name in profile.names() {
                if !columns.contains(&name) {
                    columns.push(name);
                }
            }
        }
        columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Melts the wide table into food x nutrient samples; absent cells become 0.0.
pub fn to_long_form(table: &NutritionTable) -> Vec<NutrientSample> {
    let columns = table.columns();
    let mut samples = Vec::with_capacity(table.rows.len() * columns.len());
    for (food, profile) in &table.rows {
        for nutrient in &columns {
            samples.push(NutrientSample {
                food: food.clone(),
                nutrient: nutrient.to_string(),
                amount: profile.get(nutrient).unwrap_or(0.0),
            });
        }
    }
    samples
}

/// Grouped horizontal bar chart for the terminal.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    theme: Theme,
    bar_width: usize,
}

impl ChartRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme, bar_width: DEFAULT_BAR_WIDTH }
    }

    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width.max(1);
        self
    }

    /// Groups bars by nutrient; each food is one coloured bar inside a group.
    pub fn render(&self, table: &NutritionTable) -> String {
        let samples = to_long_form(table);
        if samples.is_empty() {
            return self.theme.muted().apply_to("(no nutrient data to chart)").to_string();
        }

        let foods: Vec<&str> = table.foods().collect();
        let label_width = foods
            .iter()
            .map(|f| console::measure_text_width(f))
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH);
        let max_amount = samples.iter().map(|s| s.amount).fold(0.0_f64, f64::max);

        let mut out = String::new();
        for nutrient in table.columns() {
            out.push_str(&self.theme.heading().apply_to(nutrient).to_string());
            out.push('\n');
            for sample in samples.iter().filter(|s| s.nutrient == nutrient) {
                let series = foods.iter().position(|f| *f == sample.food).unwrap_or(0);
                let bar = "█".repeat(self.bar_length(sample.amount, max_amount));
                out.push_str(&format!(
                    "  {} {} {:?}\n",
                    pad_str(&sample.food, label_width, Alignment::Left, Some("…")),
                    self.theme.series(series).apply_to(bar),
                    sample.amount
                ));
            }
        }

        out.push_str(&self.theme.muted().apply_to("Legend:").to_string());
        for (idx, food) in foods.iter().enumerate() {
            out.push_str(&format!(" {} {}", self.theme.series(idx).apply_to("■"), food));
        }
        out.push('\n');
        out
    }

    fn bar_length(&self, amount: f64, max_amount: f64) -> usize {
        if max_amount <= 0.0 || amount <= 0.0 {
            return 0;
        }
        ((amount / max_amount) * self.bar_width as f64).round() as usize
    }
}
