use crate::{Ingredient, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one generation request for these ingredients.
    RequestRecipe {
        request_id: RequestId,
        ingredients: Vec<Ingredient>,
    },
    /// Abort a request that has been superseded by a newer submission.
    CancelRequest { request_id: RequestId },
}
