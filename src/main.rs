use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;

use nutrinova::api_connection::Provider;
use nutrinova::cli::{parse_args, Command};
use nutrinova::config::AppConfig;
use nutrinova::exercise::EXERCISE_TABLE;
use nutrinova::food_lookup::FoodLookupClient;
use nutrinova::insight_generator::InsightGenerator;
use nutrinova::logging;
use nutrinova::shell::food_tab::{index_from_number, FoodTabState};
use nutrinova::shell::{view, Dashboard, Theme};

fn build_dashboard(config: AppConfig, theme: Theme) -> Result<Dashboard> {
    let model = config.completion.model.clone();
    let provider = Provider::new(config.completion).context("Failed to build completion client")?;
    let food_client = FoodLookupClient::new(config.food).context("Failed to build food database client")?;
    let insights = InsightGenerator::new(Arc::new(provider), model);
    Ok(Dashboard::new(Arc::new(food_client), insights, theme))
}

async fn run_food(dashboard: &mut Dashboard, query: &str, number: usize, as_json: bool) -> Result<()> {
    let theme = dashboard.theme();
    dashboard.search_food(query).await;

    if matches!(dashboard.food.state(), FoodTabState::ResultsShown { .. }) {
        let selected = match index_from_number(number) {
            Ok(index) => dashboard.select_food(index).await.map(|_| ()),
            Err(e) => Err(e),
        };
        if let Err(e) = selected {
            eprintln!("{}", view::selection_error(&e, theme));
            return Ok(());
        }
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view::food_report(&dashboard.food))?);
    } else {
        println!("{}", view::food_tab(&dashboard.food, theme));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = parse_args();
    logging::init(cli.verbose);

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let theme = Theme::from_dark_flag(cli.dark);
    let mut dashboard = build_dashboard(config, theme)?;

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => dashboard.run_interactive().await?,
        Command::Food { query, select, json } => {
            run_food(&mut dashboard, &query, select, json).await?;
        }
        Command::Exercise { weight, exercise, duration, list } => {
            if list {
                for entry in EXERCISE_TABLE {
                    println!("{:<20} MET {}", entry.name, entry.met_value);
                }
                return Ok(());
            }
            dashboard.exercise.set_weight(weight)?;
            dashboard.exercise.set_duration(duration)?;
            dashboard.exercise.set_exercise_unchecked(exercise);
            let estimate = dashboard.exercise.calculate().clone();
            println!("{}", view::exercise_result(&estimate, theme));
        }
        Command::MealPlan { calories, diet } => {
            dashboard.meal_planner.set_daily_calories(calories)?;
            dashboard.meal_planner.set_diet(diet);
            let plan = dashboard.generate_meal_plan().await;
            println!("{}", view::meal_plan(plan, theme));
        }
    }

    Ok(())
}
