use recipe_core::Recipe;

use crate::error::RecipeError;

pub use recipe_core::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted {
        request_id: RequestId,
        result: Result<Recipe, RecipeError>,
    },
    /// The request was cancelled before it finished; no result follows.
    Cancelled { request_id: RequestId },
}
