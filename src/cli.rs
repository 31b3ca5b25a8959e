use clap::{Parser, Subcommand};

use crate::shell::exercise_tab::{DEFAULT_DURATION_MIN, DEFAULT_WEIGHT_KG};
use crate::shell::meal_planner_tab::{DietPreference, DEFAULT_DAILY_CALORIES};

#[derive(Parser, Debug)]
#[command(author, version, about = "NutriNova: smarter food & fitness insights", long_about = None)]
pub struct Cli {
    /// Start with the dark colour scheme
    #[arg(long, global = true)]
    pub dark: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive dashboard with the three tabs (default)
    Shell,

    /// Search the food database and analyse one result
    Food {
        /// Food to search for, e.g. "banana"
        query: String,

        /// 1-based index of the result to analyse
        #[arg(short, long, default_value_t = 1)]
        select: usize,

        /// Print nutrients and chart samples as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Estimate calories burned for an activity
    Exercise {
        /// Body weight in kilograms
        #[arg(short, long, default_value_t = DEFAULT_WEIGHT_KG, value_parser = clap::value_parser!(u32).range(30..=200))]
        weight: u32,

        /// Activity name, as listed by --list
        #[arg(short, long, default_value = "Running (6 mph)")]
        exercise: String,

        /// Duration in minutes
        #[arg(short, long, default_value_t = DEFAULT_DURATION_MIN, value_parser = clap::value_parser!(u32).range(5..=300))]
        duration: u32,

        /// List the known activities and their MET values
        #[arg(long)]
        list: bool,
    },

    /// Generate a one-day meal plan
    MealPlan {
        /// Target daily calories
        #[arg(short, long, default_value_t = DEFAULT_DAILY_CALORIES, value_parser = clap::value_parser!(u32).range(1200..=4000))]
        calories: u32,

        /// Diet preference
        #[arg(short, long, value_enum, default_value_t = DietPreference::Balanced)]
        diet: DietPreference,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
