use super::*;

fn session(user_id: &str) -> Session {
    Session {
        user_id: user_id.to_owned(),
        access_token: format!("tok-{user_id}"),
        expires_at: None,
    }
}

fn profile(id: &str, username: &str) -> Profile {
    Profile {
        id: id.to_owned(),
        username: username.to_owned(),
        email: format!("{username}@vincere.com"),
        name_color: Some("#B45309".to_owned()),
        avatar_url: None,
        created_at: String::new(),
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_state_is_absent_and_loading() {
    let state = SessionState::default();
    assert!(state.session.is_none());
    assert!(state.profile.is_none());
    assert!(state.loading);
}

// =============================================================
// Session changes
// =============================================================

#[test]
fn session_change_to_none_clears_profile() {
    let mut state = SessionState::default();
    let generation = state.apply_session(Some(session("u-1")));
    assert!(state.apply_profile(generation, profile("u-1", "rex")));

    state.apply_session(None);
    assert!(state.profile.is_none());
    assert!(state.session.is_none());
    assert!(!state.loading);
}

#[test]
fn sequence_ending_absent_leaves_profile_absent() {
    let mut state = SessionState::default();
    for step in [Some(session("u-1")), Some(session("u-2")), None] {
        let generation = state.apply_session(step.clone());
        if let Some(s) = step {
            state.apply_profile(generation, profile(&s.user_id, "rex"));
            state.set_loaded();
        }
    }
    assert!(state.profile.is_none());
}

// =============================================================
// Generation guard
// =============================================================

#[test]
fn stale_profile_fetch_is_discarded() {
    let mut state = SessionState::default();
    let stale = state.apply_session(Some(session("u-1")));
    let fresh = state.apply_session(Some(session("u-2")));

    assert!(state.apply_profile(fresh, profile("u-2", "fresh")));
    assert!(!state.apply_profile(stale, profile("u-1", "stale")));
    assert_eq!(
        state.profile.as_ref().map(|p| p.username.as_str()),
        Some("fresh")
    );
}

#[test]
fn sign_out_invalidates_pending_fetch() {
    let mut state = SessionState::default();
    let pending = state.apply_session(Some(session("u-1")));
    state.apply_session(None);

    assert!(!state.apply_profile(pending, profile("u-1", "late")));
    assert!(state.profile.is_none());
}

// =============================================================
// Mock identity
// =============================================================

#[test]
fn mock_profile_has_no_session() {
    let mut state = SessionState::default();
    state.set_mock_profile(profile("dev123", "DevUser"));

    assert!(state.is_mock());
    assert!(state.session.is_none());
    assert_eq!(state.identity().as_deref(), Some("dev123"));
    assert!(!state.loading);
}

#[test]
fn authenticated_state_is_not_mock() {
    let mut state = SessionState::default();
    let generation = state.apply_session(Some(session("u-1")));
    state.apply_profile(generation, profile("u-1", "rex"));
    assert!(!state.is_mock());
}

// =============================================================
// Profile merge
// =============================================================

#[test]
fn merge_applies_only_set_fields() {
    let mut state = SessionState::default();
    let generation = state.apply_session(Some(session("u-1")));
    state.apply_profile(generation, profile("u-1", "rex"));

    state.merge_profile(&ProfileUpdate {
        name_color: Some("#FF5733".to_owned()),
        ..ProfileUpdate::default()
    });

    let merged = state.profile.as_ref().expect("profile");
    assert_eq!(merged.name_color.as_deref(), Some("#FF5733"));
    assert_eq!(merged.username, "rex");
    assert_eq!(merged.email, "rex@vincere.com");
}

#[test]
fn merge_without_profile_is_noop() {
    let mut state = SessionState::default();
    state.merge_profile(&ProfileUpdate {
        username: Some("ghost".to_owned()),
        ..ProfileUpdate::default()
    });
    assert!(state.profile.is_none());
}
