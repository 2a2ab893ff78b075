use recipe_core::{update, AppState, GenerationOutcome, Msg};

#[test]
fn tick_leaves_state_unchanged() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_does_not_mark_dirty() {
    let (mut next, effects) = update(AppState::new(), Msg::Tick);

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn result_without_request_is_ignored() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::GenerationFinished {
            request_id: 7,
            outcome: GenerationOutcome::Failed("late".to_string()),
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
