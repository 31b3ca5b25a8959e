use std::sync::Arc;
use std::time::Duration;

use dotenv::dotenv;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nutrinova::api_connection::{
    ApiConnectionError, ChatCompletionRequest, ChatMessage, CompletionBackend, CompletionProviderKind,
    Provider,
};
use nutrinova::config::{AppConfig, CompletionConfig, FoodLookupConfig, COMPLETION_API_KEY_ENV_VAR, FOOD_API_KEY_ENV_VAR};
use nutrinova::food_lookup::{FoodLookupClient, FoodLookupError, FoodSearch};
use nutrinova::insight_generator::InsightGenerator;
use nutrinova::nutrient_extractor;

fn food_config(server: &MockServer) -> FoodLookupConfig {
    FoodLookupConfig {
        api_key: "test-usda-key".to_string(),
        base_url: format!("{}/fdc/v1", server.uri()),
        page_size: 25,
        timeout: Duration::from_secs(5),
    }
}

fn completion_config(server: &MockServer) -> CompletionConfig {
    CompletionConfig {
        api_key: "sk-test".to_string(),
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

fn banana_search_body() -> serde_json::Value {
    json!({
        "totalHits": 2,
        "foods": [
            {
                "fdcId": 1105314,
                "description": "Bananas, ripe and slightly ripe, raw",
                "dataType": "Foundation",
                "foodNutrients": [
                    {"nutrientName": "Protein", "unitName": "G", "value": 0.74},
                    {"nutrientName": "Total lipid (fat)", "unitName": "G", "value": 0.29},
                    {"nutrientName": "Carbohydrate, by difference", "unitName": "G", "value": 23.0},
                    {"nutrientName": "Energy", "unitName": "KCAL", "value": 98.0},
                    {"nutrientName": "Water", "unitName": "G", "value": 75.3},
                    {"nutrientName": "Sugars, total", "unitName": "G", "value": 15.8},
                    {"nutrientName": "Potassium, K", "unitName": "MG", "value": 326.0}
                ]
            },
            {
                "fdcId": 173944,
                "description": "Bananas, raw",
                "dataType": "SR Legacy",
                "foodNutrients": []
            }
        ]
    })
}

#[tokio::test]
async fn test_food_search_parses_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fdc/v1/foods/search"))
        .and(query_param("query", "banana"))
        .and(query_param("api_key", "test-usda-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banana_search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = FoodLookupClient::new(food_config(&server)).unwrap();
    let foods = client.search("banana").await.unwrap();

    assert_eq!(foods.len(), 2);
    assert!(foods.iter().all(|f| f.description.contains("Banana")));

    let nutrients = nutrient_extractor::extract(&foods[0]);
    assert!(nutrients.len() <= 5);
    assert_eq!(nutrients.len(), 5);
    assert_eq!(nutrients.get("Energy"), Some(98.0));
    assert_eq!(nutrients.get("Sugars, total"), None);
}

#[tokio::test]
async fn test_food_search_query_is_url_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fdc/v1/foods/search"))
        .and(query_param("query", "mac & cheese"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foods": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = FoodLookupClient::new(food_config(&server)).unwrap();
    assert!(client.search("mac & cheese").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_food_search_degrades_to_empty() {
    let cases = vec![
        ResponseTemplate::new(403).set_body_string("API_KEY_INVALID"),
        ResponseTemplate::new(500),
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
        ResponseTemplate::new(200).set_body_json(json!({"totalHits": 0})),
        ResponseTemplate::new(200).set_body_json(json!({"foods": []})),
    ];

    for response in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fdc/v1/foods/search"))
            .respond_with(response)
            .mount(&server)
            .await;

        let client = FoodLookupClient::new(food_config(&server)).unwrap();
        let foods = client.search("banana").await.unwrap();
        assert!(foods.is_empty());
    }
}

#[tokio::test]
async fn test_empty_query_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banana_search_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = FoodLookupClient::new(food_config(&server)).unwrap();
    assert!(client.search("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_food_search_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(banana_search_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = FoodLookupConfig {
        timeout: Duration::from_millis(200),
        ..food_config(&server)
    };
    let client = FoodLookupClient::new(config).unwrap();
    let result = client.search("banana").await;
    assert!(matches!(result, Err(FoodLookupError::Timeout(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_food_search_unreachable_host_is_reported() {
    let client = FoodLookupClient::new(FoodLookupConfig {
        base_url: "http://127.0.0.1:1/fdc/v1".to_string(),
        ..Default::default()
    })
    .unwrap();
    let result = client.search("banana").await;
    assert!(matches!(result, Err(FoodLookupError::Network(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_completion_sends_fixed_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.7,
            "max_tokens": 500,
            "messages": [
                {"role": "system", "content": "You are a helpful nutrition and fitness assistant."},
                {"role": "user", "content": "Is a banana a good snack?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Yes, bananas are a great quick snack."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 20, "completion_tokens": 9, "total_tokens": 29}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Provider::new(completion_config(&server)).unwrap();
    let generator = InsightGenerator::new(Arc::new(provider), "gpt-4o-mini");
    let text = generator.generate("Is a banana a good snack?").await;
    assert_eq!(text, "Yes, bananas are a great quick snack.");
}

#[tokio::test]
async fn test_completion_unauthorized_becomes_error_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "code": "invalid_api_key"}
        })))
        .mount(&server)
        .await;

    let provider = Provider::new(completion_config(&server)).unwrap();
    let request = ChatCompletionRequest {
        model: "gpt-4o-mini".to_string(),
        messages: vec![ChatMessage::user("hello")],
        temperature: None,
        max_tokens: None,
    };
    let result = provider.call_chat_completion(request).await;
    assert!(matches!(
        result,
        Err(ApiConnectionError::ApiError { status, .. }) if status == reqwest::StatusCode::UNAUTHORIZED
    ));

    let generator = InsightGenerator::new(Arc::new(provider), "gpt-4o-mini");
    let text = generator.generate("hello").await;
    assert!(text.starts_with("AI API Error: "), "got {}", text);
    assert!(text.contains("invalid_api_key"));
}

#[tokio::test]
async fn test_completion_timeout_becomes_error_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = CompletionConfig {
        timeout: Duration::from_millis(200),
        ..completion_config(&server)
    };
    let generator = InsightGenerator::new(Arc::new(Provider::new(config).unwrap()), "gpt-4o-mini");
    let text = generator.generate("hello").await;
    assert!(text.starts_with("AI API Error: request timed out"), "got {}", text);
}

#[tokio::test]
async fn test_openrouter_sends_attribution_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-title", "NutriNova"))
        .and(header("http-referer", "http://localhost:3000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = CompletionConfig {
        provider: CompletionProviderKind::OpenRouter,
        ..completion_config(&server)
    };
    let generator = InsightGenerator::new(Arc::new(Provider::new(config).unwrap()), "m");
    assert_eq!(generator.generate("ping").await, "ok");
}

#[tokio::test]
#[ignore]
async fn test_live_food_search() {
    dotenv().ok();
    if std::env::var(FOOD_API_KEY_ENV_VAR).is_err() {
        println!("Skipping test_live_food_search: {} not set.", FOOD_API_KEY_ENV_VAR);
        return;
    }
    let config = AppConfig::from_env().unwrap();
    let client = FoodLookupClient::new(config.food).unwrap();
    let foods = client.search("banana").await.unwrap();
    assert!(!foods.is_empty());
    assert!(foods.iter().any(|f| f.description.to_lowercase().contains("banana")));
}

#[tokio::test]
#[ignore]
async fn test_live_insight() {
    dotenv().ok();
    if std::env::var(COMPLETION_API_KEY_ENV_VAR).is_err() {
        println!("Skipping test_live_insight: {} not set.", COMPLETION_API_KEY_ENV_VAR);
        return;
    }
    let config = AppConfig::from_env().unwrap();
    let model = config.completion.model.clone();
    let generator = InsightGenerator::new(Arc::new(Provider::new(config.completion).unwrap()), model);
    let text = generator.generate("What is the capital of France? Respond concisely.").await;
    assert!(text.to_lowercase().contains("paris"), "got {}", text);
}
