use crate::{AppState, Effect, GenerationOutcome, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::IngredientEdited { index, text } => {
            state.set_row(index, text);
            Vec::new()
        }
        Msg::IngredientAdded => {
            state.add_row();
            Vec::new()
        }
        Msg::IngredientRemoved { index } => {
            state.remove_row(index);
            Vec::new()
        }
        Msg::Submitted => {
            let ingredients = state.valid_ingredients();
            if ingredients.is_empty() {
                return (state, Vec::new());
            }
            // A newer submission supersedes whatever is still in flight.
            let (request_id, superseded) = state.begin_request();
            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = superseded {
                effects.push(Effect::CancelRequest {
                    request_id: previous,
                });
            }
            effects.push(Effect::RequestRecipe {
                request_id,
                ingredients,
            });
            effects
        }
        Msg::GenerationFinished {
            request_id,
            outcome,
        } => {
            if !state.is_current(request_id) {
                return (state, Vec::new());
            }
            match outcome {
                GenerationOutcome::Recipe(recipe) => state.finish_with_recipe(recipe),
                GenerationOutcome::Failed(reason) => state.finish_with_error(reason),
                GenerationOutcome::Cancelled => state.finish_cancelled(),
            }
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
