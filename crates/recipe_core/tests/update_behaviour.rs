use std::sync::Once;

use pretty_assertions::assert_eq;
use recipe_core::{update, AppState, Effect, Ingredient, Msg, Phase};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(recipe_logging::initialize_for_tests);
}

fn fill_rows(mut state: AppState, names: &[&str]) -> AppState {
    for (index, name) in names.iter().enumerate() {
        if index > 0 {
            state = update(state, Msg::IngredientAdded).0;
        }
        state = update(
            state,
            Msg::IngredientEdited {
                index,
                text: name.to_string(),
            },
        )
        .0;
    }
    state
}

fn ingredient(name: &str) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        quantity: None,
    }
}

#[test]
fn new_state_has_one_empty_row() {
    init_logging();
    let view = AppState::new().view();

    assert_eq!(view.rows, vec![String::new()]);
    assert_eq!(view.phase, Phase::Idle);
    assert!(!view.can_submit);
    assert!(!view.can_remove_rows);
}

#[test]
fn submit_trims_and_skips_blank_rows() {
    init_logging();
    let state = fill_rows(AppState::new(), &["  chicken ", "   ", "rice"]);

    let (mut next, effects) = update(state, Msg::Submitted);

    assert_eq!(
        effects,
        vec![Effect::RequestRecipe {
            request_id: 1,
            ingredients: vec![ingredient("chicken"), ingredient("rice")],
        }]
    );
    assert_eq!(next.view().phase, Phase::Loading);
    assert_eq!(next.in_flight(), Some(1));
    assert!(next.consume_dirty());
}

#[test]
fn submit_with_only_blank_rows_does_nothing() {
    init_logging();
    let state = fill_rows(AppState::new(), &["  ", ""]);
    let before = state.clone();

    let (next, effects) = update(state, Msg::Submitted);

    assert!(effects.is_empty());
    assert_eq!(next, before);
}

#[test]
fn last_row_cannot_be_removed() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::IngredientRemoved { index: 0 });
    assert_eq!(state.view().rows.len(), 1);
    assert!(!state.consume_dirty());

    let state = fill_rows(state, &["a", "b"]);
    let (state, _) = update(state, Msg::IngredientRemoved { index: 0 });
    assert_eq!(state.view().rows, vec!["b".to_string()]);

    let (state, _) = update(state, Msg::IngredientRemoved { index: 5 });
    assert_eq!(state.view().rows, vec!["b".to_string()]);
}

#[test]
fn editing_out_of_range_row_is_ignored() {
    init_logging();
    let (mut state, effects) = update(
        AppState::new(),
        Msg::IngredientEdited {
            index: 3,
            text: "egg".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().rows, vec![String::new()]);
    assert!(!state.consume_dirty());
}

#[test]
fn resubmitting_while_loading_cancels_previous_request() {
    init_logging();
    let state = fill_rows(AppState::new(), &["egg"]);
    let (state, _) = update(state, Msg::Submitted);

    let (state, effects) = update(state, Msg::Submitted);

    assert_eq!(
        effects,
        vec![
            Effect::CancelRequest { request_id: 1 },
            Effect::RequestRecipe {
                request_id: 2,
                ingredients: vec![ingredient("egg")],
            },
        ]
    );
    assert_eq!(state.in_flight(), Some(2));
}
