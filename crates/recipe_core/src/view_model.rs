use crate::{Phase, Recipe};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub rows: Vec<String>,
    pub phase: Phase,
    pub recipes: Vec<Recipe>,
    /// Failure reason of the last submission, if it failed.
    pub error: Option<String>,
    pub can_submit: bool,
    pub can_remove_rows: bool,
    pub dirty: bool,
}
