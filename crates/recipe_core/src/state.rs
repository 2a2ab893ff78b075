use crate::view_model::AppViewModel;
use crate::{Ingredient, Recipe};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    rows: Vec<String>,
    phase: Phase,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    recipes: Vec<Recipe>,
    error: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            rows: vec![String::new()],
            phase: Phase::Idle,
            in_flight: None,
            next_request_id: 1,
            recipes: Vec::new(),
            error: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            rows: self.rows.clone(),
            phase: self.phase,
            recipes: self.recipes.clone(),
            error: self.error.clone(),
            can_submit: !self.valid_ingredients().is_empty(),
            can_remove_rows: self.rows.len() > 1,
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_row(&mut self, index: usize, text: String) -> bool {
        match self.rows.get_mut(index) {
            Some(row) if *row != text => {
                *row = text;
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn add_row(&mut self) {
        self.rows.push(String::new());
        self.mark_dirty();
    }

    pub(crate) fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        self.mark_dirty();
        true
    }

    pub(crate) fn valid_ingredients(&self) -> Vec<Ingredient> {
        self.rows
            .iter()
            .filter_map(|row| Ingredient::from_user(row))
            .collect()
    }

    /// Enter `Loading` for a new request; returns the new id and the one it replaces.
    pub(crate) fn begin_request(&mut self) -> (RequestId, Option<RequestId>) {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        let superseded = self.in_flight.replace(request_id);
        self.phase = Phase::Loading;
        self.error = None;
        self.recipes.clear();
        self.mark_dirty();
        (request_id, superseded)
    }

    pub(crate) fn is_current(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }

    pub(crate) fn finish_with_recipe(&mut self, recipe: Recipe) {
        self.in_flight = None;
        self.phase = Phase::Ready;
        self.recipes = vec![recipe];
        self.mark_dirty();
    }

    pub(crate) fn finish_with_error(&mut self, reason: String) {
        self.in_flight = None;
        self.phase = Phase::Failed;
        self.error = Some(reason);
        self.mark_dirty();
    }

    pub(crate) fn finish_cancelled(&mut self) {
        self.in_flight = None;
        self.phase = Phase::Idle;
        self.mark_dirty();
    }
}
