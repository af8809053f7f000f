//! Backend-as-a-service contract: auth sessions, profile rows, file
//! storage, and wiki articles.
//!
//! The session synchronizer only ever talks to [`AuthBackend`], never to a
//! concrete client, so the whole auth lifecycle can be exercised against a
//! scripted fake in tests. The production implementation lives in
//! [`crate::net::supabase`].

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::cell::RefCell;
use std::rc::Rc;

/// Default display color written into freshly created profiles.
pub const DEFAULT_NAME_COLOR: &str = "#B45309";

/// An authenticated session: the backend-issued identity plus the bearer
/// credential bound to it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    /// Unix seconds; `None` when the backend did not report an expiry.
    #[serde(default)]
    pub expires_at: Option<u64>,
}

/// A user-facing profile row, keyed by the backend identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub name_color: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Row inserted at sign-up time, right after identity creation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NewProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name_color: String,
}

/// Partial profile write. Unset fields are left untouched by the backend
/// and by the local merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.name_color.is_none()
            && self.avatar_url.is_none()
    }
}

/// A community wiki article as stored by the backend.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WikiArticle {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author_id: String,
    #[serde(default)]
    pub created_at: String,
}

/// Article insert payload; the backend assigns id and timestamps.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NewWikiArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    pub author_id: String,
}

/// Error taxonomy for every backend-facing operation. Validation failures
/// are raised before any network call; the rest map backend rejections and
/// faults. Nothing is retried automatically.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailTaken,
    #[error("username already taken")]
    UsernameTaken,
    #[error("not signed in")]
    NotAuthenticated,
    /// Identity creation succeeded but the profile row could not be
    /// written; distinct from a plain backend failure so sign-up callers
    /// can tell the half-created state apart.
    #[error("profile creation failed: {0}")]
    ProfileCreation(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("not available outside the browser")]
    Unsupported,
}

/// Callback invoked with the new session (or `None` on sign-out/expiry)
/// whenever the backend's session changes.
pub type SessionChangeHandler = Rc<dyn Fn(Option<Session>)>;

/// RAII handle for a session-change subscription; dropping it releases the
/// registration so a torn-down context is never called back.
pub struct SessionSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl SessionSubscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Fan-out point for session-change notifications. Shared by backend
/// implementations: they emit after every call that changes the session,
/// subscribers are invoked in registration order.
#[derive(Clone, Default)]
pub struct SessionChangeHub {
    inner: Rc<RefCell<HubInner>>,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(u64, SessionChangeHandler)>,
}

impl SessionChangeHub {
    pub fn subscribe(&self, handler: SessionChangeHandler) -> SessionSubscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, handler));
            id
        };

        let inner = Rc::clone(&self.inner);
        SessionSubscription::new(move || {
            inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
        })
    }

    /// Notify every live subscriber. Listeners are snapshotted first so a
    /// handler that subscribes or unsubscribes does not deadlock the hub.
    pub fn emit(&self, session: Option<Session>) {
        let listeners: Vec<SessionChangeHandler> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in listeners {
            handler(session.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// The backend-as-a-service surface the site depends on.
///
/// Auth calls that change the session (`sign_in`, `sign_up`, `sign_out`)
/// also emit a session-change notification; the synchronizer relies on
/// that emission rather than mutating its own state inline.
#[async_trait::async_trait(?Send)]
pub trait AuthBackend {
    /// Session restored from a previous page load, if any.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Register for session-change notifications for the lifetime of the
    /// returned subscription.
    fn subscribe_session_changes(&self, handler: SessionChangeHandler) -> SessionSubscription;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Create a backend identity carrying the username as metadata. Does
    /// not create the profile row; that is the caller's second step.
    async fn sign_up(&self, email: &str, password: &str, username: &str)
    -> Result<Session, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Ask the backend to mail a recovery link resolving to
    /// `redirect_path` on this site's origin.
    async fn send_password_reset(&self, email: &str, redirect_path: &str)
    -> Result<(), AuthError>;

    async fn change_password(&self, new_password: &str) -> Result<(), AuthError>;

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, AuthError>;

    /// Best-effort uniqueness pre-check; not transactional, a concurrent
    /// writer can still win the race.
    async fn username_taken(
        &self,
        username: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, AuthError>;

    async fn insert_profile(&self, profile: &NewProfile) -> Result<(), AuthError>;

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), AuthError>;

    /// Store an avatar in the public bucket, returning its public URL.
    async fn upload_avatar(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, AuthError>;

    async fn create_wiki_article(
        &self,
        article: &NewWikiArticle,
    ) -> Result<WikiArticle, AuthError>;
}

/// Shared handle to the backend, provided via Leptos context so pages that
/// need non-session calls (wiki creation) can reach it. Context storage
/// demands `Send + Sync`; the wrapper satisfies that for the
/// single-threaded `Rc`, which is only ever touched from the UI thread.
#[derive(Clone)]
pub struct BackendHandle(send_wrapper::SendWrapper<Rc<dyn AuthBackend>>);

impl BackendHandle {
    pub fn new(backend: Rc<dyn AuthBackend>) -> Self {
        Self(send_wrapper::SendWrapper::new(backend))
    }
}

impl std::ops::Deref for BackendHandle {
    type Target = Rc<dyn AuthBackend>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
