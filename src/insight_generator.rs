//! Free-text nutrition commentary from a chat-completion service.
//!
//! [`InsightGenerator::generate`] never fails: any error from the backend is
//! turned into an `AI API Error: <cause>` string and shown like a normal answer.

use std::sync::Arc;

use crate::api_connection::{
    ApiConnectionError, ChatCompletionRequest, ChatMessage, CompletionBackend,
};
use crate::nutrient_extractor::NutrientProfile;
use crate::shell::meal_planner_tab::DietPreference;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful nutrition and fitness assistant.";
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 500;
pub const ERROR_PREFIX: &str = "AI API Error:";

#[derive(Clone)]
pub struct InsightGenerator {
    backend: Arc<dyn CompletionBackend>,
    model: String,
}

impl InsightGenerator {
    pub fn new(backend: Arc<dyn CompletionBackend>, model: impl Into<String>) -> Self {
        Self { backend, model: model.into() }
    }

    pub fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_INSTRUCTION), ChatMessage::user(prompt)],
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_OUTPUT_TOKENS),
        }
    }

    pub async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "insight generation failed");
                format!("{} {}", ERROR_PREFIX, e)
            }
        }
    }

    async fn try_generate(&self, prompt: &str) -> Result<String, ApiConnectionError> {
        let response = self.backend.call_chat_completion(self.build_request(prompt)).await?;
        response
            .first_text()
            .map(str::to_string)
            .ok_or(ApiConnectionError::EmptyResponse)
    }
}

pub fn food_insight_prompt(food: &str, nutrients: &NutrientProfile) -> String {
    format!(
        "Give me a quick analysis of {} with these nutrients: {}",
        food, nutrients
    )
}

pub fn meal_plan_prompt(diet: DietPreference, daily_calories: u32) -> String {
    format!(
        "Create a {} meal plan for 1 day with around {} calories. Show breakfast, lunch, dinner, and snacks.",
        diet, daily_calories
    )
}
