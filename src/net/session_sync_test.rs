use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;

use futures::executor::block_on;
use leptos::prelude::WithUntracked;

use super::*;
use crate::net::backend::{NewWikiArticle, SessionChangeHandler, SessionChangeHub, WikiArticle};
use crate::state::toasts::ToastKind;

// =============================================================
// Scripted fake backend
// =============================================================

#[derive(Default)]
struct FakeBackend {
    calls: RefCell<Vec<String>>,
    accounts: RefCell<HashMap<String, String>>,
    profiles: RefCell<HashMap<String, Profile>>,
    taken_usernames: RefCell<HashSet<String>>,
    inserted: RefCell<Vec<NewProfile>>,
    fail_insert_profile: Cell<bool>,
    fail_fetch_profile: Cell<bool>,
    current: RefCell<Option<Session>>,
    hub: SessionChangeHub,
}

impl FakeBackend {
    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_owned());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn session_for(email: &str) -> Session {
        Session {
            user_id: format!("id-{email}"),
            access_token: format!("tok-{email}"),
            expires_at: None,
        }
    }

    fn seed_account(&self, email: &str, password: &str, username: &str) {
        self.accounts
            .borrow_mut()
            .insert(email.to_owned(), password.to_owned());
        let session = Self::session_for(email);
        self.profiles.borrow_mut().insert(
            session.user_id.clone(),
            Profile {
                id: session.user_id.clone(),
                username: username.to_owned(),
                email: email.to_owned(),
                name_color: Some("#B45309".to_owned()),
                avatar_url: None,
                created_at: String::new(),
            },
        );
    }
}

#[async_trait::async_trait(?Send)]
impl AuthBackend for FakeBackend {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        self.record("current_session");
        Ok(self.current.borrow().clone())
    }

    fn subscribe_session_changes(&self, handler: SessionChangeHandler) -> SessionSubscription {
        self.hub.subscribe(handler)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.record("sign_in");
        let ok = self.accounts.borrow().get(email).map(String::as_str) == Some(password);
        if ok {
            Ok(Self::session_for(email))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _username: &str,
    ) -> Result<Session, AuthError> {
        self.record("sign_up");
        if self.accounts.borrow().contains_key(email) {
            return Err(AuthError::EmailTaken);
        }
        self.accounts
            .borrow_mut()
            .insert(email.to_owned(), password.to_owned());
        Ok(Self::session_for(email))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.record("sign_out");
        Ok(())
    }

    async fn send_password_reset(
        &self,
        email: &str,
        redirect_path: &str,
    ) -> Result<(), AuthError> {
        self.record(&format!("send_password_reset:{email}:{redirect_path}"));
        Ok(())
    }

    async fn change_password(&self, _new_password: &str) -> Result<(), AuthError> {
        self.record("change_password");
        Ok(())
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, AuthError> {
        self.record("fetch_profile");
        if self.fail_fetch_profile.get() {
            return Err(AuthError::Backend("fetch rejected".to_owned()));
        }
        Ok(self.profiles.borrow().get(user_id).cloned())
    }

    async fn username_taken(
        &self,
        username: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, AuthError> {
        self.record("username_taken");
        if self.taken_usernames.borrow().contains(username) {
            return Ok(true);
        }
        Ok(self
            .profiles
            .borrow()
            .values()
            .any(|p| p.username == username && Some(p.id.as_str()) != exclude_id))
    }

    async fn insert_profile(&self, profile: &NewProfile) -> Result<(), AuthError> {
        self.record("insert_profile");
        if self.fail_insert_profile.get() {
            return Err(AuthError::Backend("insert rejected".to_owned()));
        }
        self.inserted.borrow_mut().push(profile.clone());
        self.profiles.borrow_mut().insert(
            profile.id.clone(),
            Profile {
                id: profile.id.clone(),
                username: profile.username.clone(),
                email: profile.email.clone(),
                name_color: Some(profile.name_color.clone()),
                avatar_url: None,
                created_at: String::new(),
            },
        );
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), AuthError> {
        self.record("update_profile");
        if let Some(profile) = self.profiles.borrow_mut().get_mut(user_id) {
            if let Some(username) = &update.username {
                profile.username = username.clone();
            }
            if let Some(email) = &update.email {
                profile.email = email.clone();
            }
            if let Some(name_color) = &update.name_color {
                profile.name_color = Some(name_color.clone());
            }
            if let Some(avatar_url) = &update.avatar_url {
                profile.avatar_url = Some(avatar_url.clone());
            }
        }
        Ok(())
    }

    async fn upload_avatar(&self, file_name: &str, _bytes: Vec<u8>) -> Result<String, AuthError> {
        self.record("upload_avatar");
        Ok(format!("https://cdn.test/avatars/{file_name}"))
    }

    async fn create_wiki_article(
        &self,
        article: &NewWikiArticle,
    ) -> Result<WikiArticle, AuthError> {
        self.record("create_wiki_article");
        Ok(WikiArticle {
            id: "a-1".to_owned(),
            title: article.title.clone(),
            content: article.content.clone(),
            category: article.category.clone(),
            author_id: article.author_id.clone(),
            created_at: String::new(),
        })
    }
}

fn harness() -> (Rc<FakeBackend>, SessionSync) {
    let backend = Rc::new(FakeBackend::default());
    let sync = SessionSync::new(backend.clone());
    (backend, sync)
}

fn toast_kinds(sync: &SessionSync) -> Vec<ToastKind> {
    sync.toasts
        .with_untracked(|t| t.toasts.iter().map(|toast| toast.kind).collect())
}

fn current_profile(sync: &SessionSync) -> Option<Profile> {
    sync.state.with_untracked(|s| s.profile.clone())
}

fn signed_in(sync: &SessionSync, email: &str) {
    block_on(sync.handle_session_change(Some(FakeBackend::session_for(email))));
}

// =============================================================
// Context storage bounds
// =============================================================

// Leptos context and view closures require `Send + Sync`; the handles
// must keep satisfying those bounds even though the backend is an `Rc`.
#[test]
fn handles_satisfy_context_storage_bounds() {
    fn assert_context_storable<T: Clone + Send + Sync + 'static>() {}
    assert_context_storable::<SessionSync>();
    assert_context_storable::<crate::net::backend::BackendHandle>();
}

// =============================================================
// Validation happens before any backend call
// =============================================================

#[test]
fn sign_in_short_password_never_reaches_backend() {
    let (backend, sync) = harness();

    let result = block_on(sync.sign_in("a@b.com", "abc"));

    assert!(matches!(result, Err(AuthError::Validation(_))));
    assert!(backend.calls().is_empty());
    assert!(toast_kinds(&sync).is_empty());
}

#[test]
fn sign_in_malformed_email_never_reaches_backend() {
    let (backend, sync) = harness();

    let result = block_on(sync.sign_in("not-an-email", "abcdef"));

    assert!(matches!(result, Err(AuthError::Validation(_))));
    assert!(backend.calls().is_empty());
}

#[test]
fn sign_up_short_password_never_reaches_backend() {
    let (backend, sync) = harness();

    let result = block_on(sync.sign_up("a@b.com", "abc", "rex"));

    assert!(matches!(result, Err(AuthError::Validation(_))));
    assert!(backend.calls().is_empty());
}

// =============================================================
// Sign-in
// =============================================================

#[test]
fn sign_in_wrong_password_reports_invalid_credentials() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");
    signed_in(&sync, "a@b.com");
    let before = current_profile(&sync);

    let result = block_on(sync.sign_in("a@b.com", "wrong-pass"));

    assert_eq!(result, Err(AuthError::InvalidCredentials));
    assert_eq!(current_profile(&sync), before);
    assert_eq!(toast_kinds(&sync).last(), Some(&ToastKind::Error));
}

#[test]
fn sign_in_success_defers_profile_to_notification() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");

    block_on(sync.sign_in("a@b.com", "abcdef")).expect("sign in");

    // No profile yet: population happens via the session-change handler.
    assert!(current_profile(&sync).is_none());

    signed_in(&sync, "a@b.com");
    assert_eq!(
        current_profile(&sync).map(|p| p.username),
        Some("rex".to_owned())
    );
}

// =============================================================
// Sign-up
// =============================================================

#[test]
fn sign_up_creates_profile_row_with_default_color() {
    let (backend, sync) = harness();

    block_on(sync.sign_up("a@b.com", "abcdef", "rex")).expect("sign up");

    let inserted = backend.inserted.borrow();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].username, "rex");
    assert_eq!(inserted[0].email, "a@b.com");
    assert_eq!(inserted[0].name_color, "#B45309");
    assert_eq!(toast_kinds(&sync), vec![ToastKind::Success]);
}

#[test]
fn sign_up_profile_insert_failure_is_a_distinct_error() {
    let (backend, sync) = harness();
    backend.fail_insert_profile.set(true);

    let result = block_on(sync.sign_up("a@b.com", "abcdef", "rex"));

    // Identity creation went through; the failure must still surface.
    assert!(backend.calls().contains(&"sign_up".to_owned()));
    assert!(matches!(result, Err(AuthError::ProfileCreation(_))));
    assert_eq!(toast_kinds(&sync), vec![ToastKind::Error]);
}

#[test]
fn sign_up_duplicate_username_blocks_before_identity_creation() {
    let (backend, sync) = harness();
    backend.taken_usernames.borrow_mut().insert("rex".to_owned());

    let result = block_on(sync.sign_up("a@b.com", "abcdef", "rex"));

    assert_eq!(result, Err(AuthError::UsernameTaken));
    assert!(!backend.calls().contains(&"sign_up".to_owned()));
}

// =============================================================
// Session-change handling
// =============================================================

#[test]
fn notification_sequence_ending_absent_clears_profile() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");

    signed_in(&sync, "a@b.com");
    assert!(current_profile(&sync).is_some());

    block_on(sync.handle_session_change(None));
    assert!(current_profile(&sync).is_none());
    assert!(sync.state.with_untracked(|s| s.session.is_none()));
    assert!(!sync.state.with_untracked(|s| s.loading));
}

#[test]
fn profile_fetch_failure_reports_and_leaves_profile_absent() {
    let (backend, sync) = harness();
    backend.fail_fetch_profile.set(true);

    signed_in(&sync, "a@b.com");

    assert!(current_profile(&sync).is_none());
    assert!(!sync.state.with_untracked(|s| s.loading));
    assert_eq!(toast_kinds(&sync), vec![ToastKind::Error]);
}

#[test]
fn missing_profile_behind_valid_session_is_reported_not_fatal() {
    let (_backend, sync) = harness();

    // Session for an account that never completed profile creation.
    signed_in(&sync, "ghost@b.com");

    assert!(current_profile(&sync).is_none());
    assert_eq!(toast_kinds(&sync), vec![ToastKind::Error]);
}

#[test]
fn init_without_session_just_finishes_loading() {
    let (backend, sync) = harness();

    block_on(sync.init());

    assert!(!sync.state.with_untracked(|s| s.loading));
    assert!(current_profile(&sync).is_none());
    assert_eq!(backend.calls(), vec!["current_session".to_owned()]);
}

#[test]
fn init_with_stored_session_fetches_profile() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");
    *backend.current.borrow_mut() = Some(FakeBackend::session_for("a@b.com"));

    block_on(sync.init());

    assert_eq!(
        current_profile(&sync).map(|p| p.username),
        Some("rex".to_owned())
    );
    assert!(!sync.state.with_untracked(|s| s.loading));
}

// =============================================================
// Sign-out
// =============================================================

#[test]
fn sign_out_does_not_clear_state_synchronously() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");
    signed_in(&sync, "a@b.com");

    block_on(sync.sign_out()).expect("sign out");

    // Clearing is the notification's job.
    assert!(current_profile(&sync).is_some());
    assert_eq!(toast_kinds(&sync).last(), Some(&ToastKind::Success));
}

// =============================================================
// Password reset
// =============================================================

#[test]
fn reset_password_issues_call_even_for_unknown_email() {
    let (backend, sync) = harness();

    block_on(sync.reset_password("nobody@b.com")).expect("reset");

    assert_eq!(
        backend.calls(),
        vec!["send_password_reset:nobody@b.com:/reset-password".to_owned()]
    );
    assert_eq!(toast_kinds(&sync), vec![ToastKind::Success]);
}

// =============================================================
// Profile updates
// =============================================================

#[test]
fn update_profile_without_identity_is_rejected_locally() {
    let (backend, sync) = harness();

    let result = block_on(sync.update_profile(ProfileUpdate {
        name_color: Some("#FF5733".to_owned()),
        ..ProfileUpdate::default()
    }));

    assert_eq!(result, Err(AuthError::NotAuthenticated));
    assert!(backend.calls().is_empty());
}

#[test]
fn update_profile_merges_fields_locally() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");
    signed_in(&sync, "a@b.com");

    block_on(sync.update_profile(ProfileUpdate {
        name_color: Some("#FF5733".to_owned()),
        ..ProfileUpdate::default()
    }))
    .expect("update");

    let profile = current_profile(&sync).expect("profile");
    assert_eq!(profile.name_color.as_deref(), Some("#FF5733"));
    assert_eq!(profile.username, "rex");
}

#[test]
fn update_profile_same_fields_twice_is_idempotent() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");
    signed_in(&sync, "a@b.com");

    let update = ProfileUpdate {
        name_color: Some("#FF5733".to_owned()),
        ..ProfileUpdate::default()
    };
    block_on(sync.update_profile(update.clone())).expect("first update");
    let after_first = current_profile(&sync);
    block_on(sync.update_profile(update)).expect("second update");

    assert_eq!(current_profile(&sync), after_first);
    let successes = toast_kinds(&sync)
        .iter()
        .filter(|kind| **kind == ToastKind::Success)
        .count();
    assert_eq!(successes, 2);
}

#[test]
fn update_profile_with_no_fields_skips_the_backend() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");
    signed_in(&sync, "a@b.com");
    backend.clear_calls();

    block_on(sync.update_profile(ProfileUpdate::default())).expect("empty update");

    assert!(backend.calls().is_empty());
}

#[test]
fn update_profile_duplicate_username_precheck_blocks_write() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");
    backend.seed_account("c@d.com", "abcdef", "lupa");
    signed_in(&sync, "a@b.com");

    let result = block_on(sync.update_profile(ProfileUpdate {
        username: Some("lupa".to_owned()),
        ..ProfileUpdate::default()
    }));

    assert_eq!(result, Err(AuthError::UsernameTaken));
    assert!(!backend.calls().contains(&"update_profile".to_owned()));
}

#[test]
fn update_profile_keeping_own_username_is_allowed() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");
    signed_in(&sync, "a@b.com");

    block_on(sync.update_profile(ProfileUpdate {
        username: Some("rex".to_owned()),
        email: Some("rex@b.com".to_owned()),
        ..ProfileUpdate::default()
    }))
    .expect("update keeping username");

    assert_eq!(
        current_profile(&sync).map(|p| p.email),
        Some("rex@b.com".to_owned())
    );
}

// =============================================================
// Mock identity
// =============================================================

#[test]
fn set_mock_profile_is_immediate_and_sessionless() {
    let (backend, sync) = harness();
    let mock = Profile {
        id: "dev123".to_owned(),
        username: "DevUser".to_owned(),
        email: "dev@vincere.com".to_owned(),
        name_color: Some("#FF5733".to_owned()),
        avatar_url: None,
        created_at: String::new(),
    };

    sync.set_mock_profile(mock.clone());

    assert_eq!(current_profile(&sync), Some(mock));
    assert!(sync.state.with_untracked(|s| s.is_mock()));
    assert!(backend.calls().is_empty());
    assert_eq!(toast_kinds(&sync), vec![ToastKind::Success]);
}

// =============================================================
// Avatar upload
// =============================================================

#[test]
fn upload_avatar_requires_identity() {
    let (backend, sync) = harness();

    let result = block_on(sync.upload_avatar("me.png", vec![1, 2, 3]));

    assert_eq!(result, Err(AuthError::NotAuthenticated));
    assert!(backend.calls().is_empty());
}

#[test]
fn upload_avatar_returns_public_url() {
    let (backend, sync) = harness();
    backend.seed_account("a@b.com", "abcdef", "rex");
    signed_in(&sync, "a@b.com");

    let url = block_on(sync.upload_avatar("me.png", vec![1, 2, 3])).expect("upload");

    assert!(url.starts_with("https://cdn.test/avatars/id-a@b.com-"));
    assert!(url.ends_with(".png"));
}
