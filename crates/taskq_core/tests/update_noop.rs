use taskq_core::{update, ControllerState, Msg, TaskKind};

#[test]
fn unchanged_form_input_is_noop() {
    let state = ControllerState::new();
    let (next, effects) = update(state.clone(), Msg::TaskKindSelected(TaskKind::ScanUrl));

    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (mut next, effects) = update(next, Msg::ParameterChanged(String::new()));
    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
