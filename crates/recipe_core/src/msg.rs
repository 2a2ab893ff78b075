use crate::{Recipe, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the text of one ingredient row.
    IngredientEdited { index: usize, text: String },
    /// User asked for another ingredient row.
    IngredientAdded,
    /// User removed an ingredient row.
    IngredientRemoved { index: usize },
    /// User submitted the form.
    Submitted,
    /// Engine finished (or dropped) a generation request.
    GenerationFinished {
        request_id: RequestId,
        outcome: GenerationOutcome,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Recipe(Recipe),
    /// Human-readable failure reason.
    Failed(String),
    Cancelled,
}
