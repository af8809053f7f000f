use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn session(user_id: &str) -> Session {
    Session {
        user_id: user_id.to_owned(),
        access_token: "tok-1".to_owned(),
        expires_at: None,
    }
}

// =============================================================
// SessionChangeHub
// =============================================================

#[test]
fn hub_delivers_to_subscriber() {
    let hub = SessionChangeHub::default();
    let seen: Rc<RefCell<Vec<Option<Session>>>> = Rc::default();

    let seen_clone = Rc::clone(&seen);
    let _sub = hub.subscribe(Rc::new(move |s| seen_clone.borrow_mut().push(s)));

    hub.emit(Some(session("u-1")));
    hub.emit(None);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].as_ref().map(|s| s.user_id.as_str()), Some("u-1"));
    assert!(seen[1].is_none());
}

#[test]
fn dropping_subscription_releases_listener() {
    let hub = SessionChangeHub::default();
    let seen: Rc<RefCell<Vec<Option<Session>>>> = Rc::default();

    let seen_clone = Rc::clone(&seen);
    let sub = hub.subscribe(Rc::new(move |s| seen_clone.borrow_mut().push(s)));
    assert_eq!(hub.listener_count(), 1);

    drop(sub);
    assert_eq!(hub.listener_count(), 0);

    hub.emit(None);
    assert!(seen.borrow().is_empty());
}

#[test]
fn hub_keeps_other_listeners_after_release() {
    let hub = SessionChangeHub::default();
    let first: Rc<RefCell<u32>> = Rc::default();
    let second: Rc<RefCell<u32>> = Rc::default();

    let first_clone = Rc::clone(&first);
    let sub_a = hub.subscribe(Rc::new(move |_| *first_clone.borrow_mut() += 1));
    let second_clone = Rc::clone(&second);
    let _sub_b = hub.subscribe(Rc::new(move |_| *second_clone.borrow_mut() += 1));

    hub.emit(None);
    drop(sub_a);
    hub.emit(None);

    assert_eq!(*first.borrow(), 1);
    assert_eq!(*second.borrow(), 2);
}

// =============================================================
// ProfileUpdate
// =============================================================

#[test]
fn profile_update_default_is_empty() {
    assert!(ProfileUpdate::default().is_empty());
}

#[test]
fn profile_update_with_field_is_not_empty() {
    let update = ProfileUpdate {
        name_color: Some("#FF5733".to_owned()),
        ..ProfileUpdate::default()
    };
    assert!(!update.is_empty());
}

#[test]
fn profile_update_serializes_only_set_fields() {
    let update = ProfileUpdate {
        username: Some("rex".to_owned()),
        ..ProfileUpdate::default()
    };
    let json = serde_json::to_value(&update).expect("serialize");
    assert_eq!(json, serde_json::json!({ "username": "rex" }));
}

// =============================================================
// AuthError
// =============================================================

#[test]
fn profile_creation_error_is_distinct_from_backend_error() {
    let creation = AuthError::ProfileCreation("insert rejected".to_owned());
    let backend = AuthError::Backend("insert rejected".to_owned());
    assert_ne!(creation, backend);
    assert!(creation.to_string().contains("profile creation failed"));
}
