use super::*;

#[test]
fn push_appends_with_monotonic_ids() {
    let mut state = ToastsState::default();
    let first = state.push(ToastKind::Success, "created");
    let second = state.push(ToastKind::Error, "failed");

    assert!(second > first);
    assert_eq!(state.toasts.len(), 2);
    assert_eq!(state.toasts[0].message, "created");
    assert_eq!(state.toasts[1].kind, ToastKind::Error);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastsState::default();
    let first = state.push(ToastKind::Info, "a");
    let _second = state.push(ToastKind::Info, "b");

    state.dismiss(first);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].message, "b");
}

#[test]
fn dismiss_unknown_id_is_noop() {
    let mut state = ToastsState::default();
    state.push(ToastKind::Info, "a");
    state.dismiss(99);
    assert_eq!(state.toasts.len(), 1);
}
