use std::sync::{Arc, Mutex};
use std::time::Duration;

use recipe_core::Ingredient;
use recipe_engine::{EngineEvent, EngineHandle, RecipeError, RecipeService, ResponseNormalizer};
use serde_json::{json, Value};

const WAIT: Duration = Duration::from_secs(5);

const EGG_TOAST: &str = r#"{"id":"e1","name":"Egg Toast","ingredients":[{"name":"egg"},{"name":"bread","quantity":"2 slices"}],"instructions":["Fry egg","Toast bread"],"cookingTime":"10 minutes","servings":1,"imageUrl":"http://img/egg.png"}"#;

/// Answers with a fixed body and records every message it receives.
struct CannedService {
    body: Value,
    messages: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl RecipeService for CannedService {
    async fn generate(&self, message: &str) -> Result<Value, RecipeError> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(self.body.clone())
    }
}

/// Never answers.
struct StalledService;

#[async_trait::async_trait]
impl RecipeService for StalledService {
    async fn generate(&self, _message: &str) -> Result<Value, RecipeError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Value::Null)
    }
}

fn egg() -> Vec<Ingredient> {
    vec![Ingredient::from_user("egg").unwrap()]
}

#[test]
fn engine_reports_normalized_recipe() {
    recipe_logging::initialize_for_tests();
    let messages = Arc::new(Mutex::new(Vec::new()));
    let service = CannedService {
        body: json!({ "response": format!("```json\n{EGG_TOAST}\n```") }),
        messages: messages.clone(),
    };
    let engine =
        EngineHandle::with_service(Arc::new(service), Arc::new(ResponseNormalizer)).unwrap();

    engine.generate(4, egg());
    let event = engine.recv_timeout(WAIT).expect("event");

    match event {
        EngineEvent::GenerationCompleted { request_id, result } => {
            assert_eq!(request_id, 4);
            let recipe = result.expect("recipe");
            assert_eq!(recipe.name, "Egg Toast");
            assert_eq!(recipe.ingredients[0].quantity, None);
            assert_eq!(recipe.ingredients[1].display_line(), "2 slices bread");
        }
        other => panic!("unexpected event {other:?}"),
    }
    let sent = messages.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("ingredients: egg."));
}

#[test]
fn engine_reports_failures_as_results() {
    let service = CannedService {
        body: json!({ "error": "No message provided" }),
        messages: Arc::new(Mutex::new(Vec::new())),
    };
    let engine =
        EngineHandle::with_service(Arc::new(service), Arc::new(ResponseNormalizer)).unwrap();

    engine.generate(1, egg());

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::GenerationCompleted { request_id: 1, result: Err(err) }) => {
            assert_eq!(err.to_string(), "No message provided");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn cancel_stops_in_flight_request() {
    let engine =
        EngineHandle::with_service(Arc::new(StalledService), Arc::new(ResponseNormalizer))
            .unwrap();

    engine.generate(9, egg());
    engine.cancel(9);

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::Cancelled { request_id: 9 })
    );
    assert_eq!(engine.try_recv(), None);
}

#[test]
fn cancel_for_unknown_request_is_ignored() {
    let engine =
        EngineHandle::with_service(Arc::new(StalledService), Arc::new(ResponseNormalizer))
            .unwrap();

    engine.cancel(42);

    assert_eq!(engine.recv_timeout(Duration::from_millis(100)), None);
}
