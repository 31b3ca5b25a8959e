pub mod api_connection;
pub mod chart;
pub mod cli;
pub mod config;
pub mod exercise;
pub mod food_lookup;
pub mod insight_generator;
pub mod logging;
pub mod nutrient_extractor;
pub mod shell;
