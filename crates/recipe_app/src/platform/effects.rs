use recipe_core::{Effect, GenerationOutcome, Msg};
use recipe_engine::{EngineEvent, EngineHandle};
use recipe_logging::{recipe_info, recipe_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestRecipe {
                    request_id,
                    ingredients,
                } => {
                    recipe_info!(
                        "RequestRecipe request_id={} ingredients={}",
                        request_id,
                        ingredients.len()
                    );
                    self.engine.generate(request_id, ingredients);
                }
                Effect::CancelRequest { request_id } => {
                    recipe_info!("CancelRequest request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    /// Drain finished engine work as messages for the state machine.
    pub fn pending_messages(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(event_to_msg(event));
        }
        msgs
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::GenerationCompleted { request_id, result } => {
            let outcome = match result {
                Ok(recipe) => GenerationOutcome::Recipe(recipe),
                Err(err) => {
                    recipe_warn!("request {} failed: {}", request_id, err);
                    GenerationOutcome::Failed(err.to_string())
                }
            };
            Msg::GenerationFinished {
                request_id,
                outcome,
            }
        }
        EngineEvent::Cancelled { request_id } => Msg::GenerationFinished {
            request_id,
            outcome: GenerationOutcome::Cancelled,
        },
    }
}

#[cfg(test)]
mod tests {
    use recipe_engine::{FailureKind, RecipeError, ServiceFailure};

    use super::*;

    #[test]
    fn failed_generation_carries_error_text() {
        let event = EngineEvent::GenerationCompleted {
            request_id: 3,
            result: Err(RecipeError::Service(ServiceFailure {
                kind: FailureKind::Backend,
                message: "quota exceeded".to_string(),
            })),
        };

        assert_eq!(
            event_to_msg(event),
            Msg::GenerationFinished {
                request_id: 3,
                outcome: GenerationOutcome::Failed("quota exceeded".to_string()),
            }
        );
    }

    #[test]
    fn cancellation_maps_to_cancelled_outcome() {
        assert_eq!(
            event_to_msg(EngineEvent::Cancelled { request_id: 8 }),
            Msg::GenerationFinished {
                request_id: 8,
                outcome: GenerationOutcome::Cancelled,
            }
        );
    }
}
