//! The session synchronizer: owner of the page-wide
//! `{session, profile, loading}` view and of every auth operation.
//!
//! LIFECYCLE
//! =========
//! Constructed once at the application root. `init` restores the previous
//! session; `subscribe` registers for backend session-change notifications
//! for the rest of the page lifetime (released via the returned RAII
//! guard). Operations that change the session (`sign_in`, `sign_out`,
//! `sign_up`) never mutate local state themselves; they rely on the
//! resulting notification, so callers must not assume the profile is
//! populated (or cleared) synchronously after the call returns.
//!
//! ERROR HANDLING
//! ==============
//! Every operation returns `Result<_, AuthError>`. Pre-flight validation
//! failures surface inline on the calling form; backend rejections and
//! faults additionally raise an error toast. Nothing escapes as a panic
//! and nothing is retried.

#[cfg(test)]
#[path = "session_sync_test.rs"]
mod session_sync_test;

use std::rc::Rc;

use leptos::prelude::{RwSignal, Update, WithUntracked};

use crate::net::backend::{
    AuthBackend, AuthError, NewProfile, Profile, ProfileUpdate, SessionSubscription,
    DEFAULT_NAME_COLOR, Session,
};
use crate::state::session::SessionState;
use crate::state::toasts::{ToastKind, ToastsState};
use crate::util::validate;

/// Fixed origin-relative path the recovery mail links back to. Must match
/// the route serving the password-entry page.
pub const RESET_PASSWORD_PATH: &str = "/reset-password";

/// Shared handle to the synchronizer; cheap to clone, provided via
/// context from the application root. The backend `Rc` sits behind a
/// `SendWrapper` so the handle meets the `Send + Sync` bound that context
/// storage and view closures require; everything runs on the UI thread.
#[derive(Clone)]
pub struct SessionSync {
    backend: send_wrapper::SendWrapper<Rc<dyn AuthBackend>>,
    pub state: RwSignal<SessionState>,
    pub toasts: RwSignal<ToastsState>,
}

impl SessionSync {
    pub fn new(backend: Rc<dyn AuthBackend>) -> Self {
        Self {
            backend: send_wrapper::SendWrapper::new(backend),
            state: RwSignal::new(SessionState::default()),
            toasts: RwSignal::new(ToastsState::default()),
        }
    }

    /// One-shot initialization: restore the backend's current session and
    /// fetch its profile. Always ends with `loading == false`.
    pub async fn init(&self) {
        match self.backend.current_session().await {
            Ok(session) => self.handle_session_change(session).await,
            Err(err) => {
                log::warn!("session restore failed: {err}");
                self.state.update(SessionState::set_loaded);
            }
        }
    }

    /// Register for backend session-change notifications. Each
    /// notification is handled as a local task; the generation guard in
    /// `SessionState` keeps a stale profile fetch from overwriting the
    /// result of a newer change.
    pub fn subscribe(&self) -> SessionSubscription {
        let sync = self.clone();
        self.backend
            .subscribe_session_changes(Rc::new(move |session| {
                let sync = sync.clone();
                leptos::task::spawn_local(async move {
                    sync.handle_session_change(session).await;
                });
            }))
    }

    /// Apply one session-change notification: store the session, then
    /// fetch-or-report the profile behind it.
    pub async fn handle_session_change(&self, session: Option<Session>) {
        let generation = self
            .state
            .try_update(|s| s.apply_session(session.clone()))
            .unwrap_or_default();

        let Some(session) = session else {
            // apply_session already cleared the profile and loading flag.
            return;
        };

        match self.backend.fetch_profile(&session.user_id).await {
            Ok(Some(profile)) => self.state.update(|s| {
                s.apply_profile(generation, profile);
                s.set_loaded();
            }),
            Ok(None) => {
                log::warn!("no profile row for user {}", session.user_id);
                self.toast_error("Error al cargar el perfil");
                self.state.update(SessionState::set_loaded);
            }
            Err(err) => {
                log::error!("profile fetch failed: {err}");
                self.toast_error("Error al cargar el perfil");
                self.state.update(SessionState::set_loaded);
            }
        }
    }

    /// Authenticate with email and password. On success the profile is
    /// populated by the follow-up session-change notification, not here.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        validate::email(email)?;
        validate::password(password)?;

        match self.backend.sign_in(email, password).await {
            Ok(_session) => Ok(()),
            Err(err) => {
                self.toast_error("Error al iniciar sesión");
                Err(err)
            }
        }
    }

    /// Create the backend identity, then the profile row. An identity that
    /// exists without a profile row is reported as
    /// [`AuthError::ProfileCreation`], never folded into success.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<(), AuthError> {
        validate::email(email)?;
        validate::password(password)?;
        validate::username(username)?;

        match self.backend.username_taken(username, None).await {
            Ok(false) => {}
            Ok(true) => {
                self.toast_error("El nombre de usuario ya está en uso");
                return Err(AuthError::UsernameTaken);
            }
            Err(err) => {
                self.toast_error("Error al crear la cuenta");
                return Err(err);
            }
        }

        let session = match self.backend.sign_up(email, password, username).await {
            Ok(session) => session,
            Err(err) => {
                self.toast_error("Error al crear la cuenta");
                return Err(err);
            }
        };

        let profile = NewProfile {
            id: session.user_id.clone(),
            username: username.to_owned(),
            email: email.to_owned(),
            name_color: DEFAULT_NAME_COLOR.to_owned(),
        };
        if let Err(err) = self.backend.insert_profile(&profile).await {
            log::error!("profile insert failed after sign-up: {err}");
            self.toast_error("Error al crear el perfil");
            return Err(AuthError::ProfileCreation(err.to_string()));
        }

        self.toast_success("¡Cuenta creada exitosamente!");
        Ok(())
    }

    /// Request backend sign-out. Local state is cleared by the subsequent
    /// session-change notification; there is a brief window where readers
    /// still see the old session.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        match self.backend.sign_out().await {
            Ok(()) => {
                self.toast_success("Sesión cerrada exitosamente");
                Ok(())
            }
            Err(err) => {
                self.toast_error("Error al cerrar sesión");
                Err(err)
            }
        }
    }

    /// Ask for a recovery mail pointing at [`RESET_PASSWORD_PATH`]. The
    /// call is issued for unregistered addresses too; whether a mail goes
    /// out is the backend's business, so the address book never leaks.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        validate::email(email)?;

        match self
            .backend
            .send_password_reset(email, RESET_PASSWORD_PATH)
            .await
        {
            Ok(()) => {
                self.toast_success("Instrucciones enviadas al correo");
                Ok(())
            }
            Err(err) => {
                self.toast_error("Error al enviar las instrucciones");
                Err(err)
            }
        }
    }

    /// Replace the password of the currently authenticated identity; used
    /// by the recovery page and the profile security tab.
    pub async fn change_password(&self, new_password: &str) -> Result<(), AuthError> {
        validate::password(new_password)?;

        match self.backend.change_password(new_password).await {
            Ok(()) => {
                self.toast_success("Contraseña actualizada exitosamente");
                Ok(())
            }
            Err(err) => {
                self.toast_error("Error al cambiar la contraseña");
                Err(err)
            }
        }
    }

    /// Write partial fields to the current identity's profile row, then
    /// merge them into local state without a round trip.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<(), AuthError> {
        let Some(user_id) = self.state.with_untracked(SessionState::identity) else {
            self.toast_error("No has iniciado sesión");
            return Err(AuthError::NotAuthenticated);
        };

        if update.is_empty() {
            return Ok(());
        }

        if let Some(username) = &update.username {
            match self.backend.username_taken(username, Some(&user_id)).await {
                Ok(false) => {}
                Ok(true) => {
                    self.toast_error("El nombre de usuario ya está en uso");
                    return Err(AuthError::UsernameTaken);
                }
                Err(err) => {
                    self.toast_error("Error al actualizar el perfil");
                    return Err(err);
                }
            }
        }

        match self.backend.update_profile(&user_id, &update).await {
            Ok(()) => {
                self.state.update(|s| s.merge_profile(&update));
                self.toast_success("Perfil actualizado exitosamente");
                Ok(())
            }
            Err(err) => {
                self.toast_error("Error al actualizar el perfil");
                Err(err)
            }
        }
    }

    /// Store an avatar image and return its public URL. The caller writes
    /// the URL through [`Self::update_profile`].
    pub async fn upload_avatar(
        &self,
        original_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AuthError> {
        let Some(user_id) = self.state.with_untracked(SessionState::identity) else {
            self.toast_error("No has iniciado sesión");
            return Err(AuthError::NotAuthenticated);
        };

        let file_name = avatar_file_name(&user_id, original_name);
        match self.backend.upload_avatar(&file_name, bytes).await {
            Ok(url) => Ok(url),
            Err(err) => {
                self.toast_error("Error al subir el avatar");
                Err(err)
            }
        }
    }

    /// Development bypass: overwrite the local profile, no backend call,
    /// no session. `SessionState::is_mock` stays `true` so code paths that
    /// need a real session can reject it.
    pub fn set_mock_profile(&self, profile: Profile) {
        self.state.update(|s| s.set_mock_profile(profile));
        self.toast_success("Modo Dev habilitado");
    }

    fn toast_success(&self, message: &str) {
        self.toasts.update(|t| {
            t.push(ToastKind::Success, message);
        });
    }

    fn toast_error(&self, message: &str) {
        self.toasts.update(|t| {
            t.push(ToastKind::Error, message);
        });
    }
}

/// Bucket object name for an uploaded avatar: identity-prefixed with a
/// random component so re-uploads never collide.
fn avatar_file_name(user_id: &str, original_name: &str) -> String {
    let ext = original_name.rsplit_once('.').map_or("png", |(_, ext)| ext);
    format!("{user_id}-{}.{ext}", uuid::Uuid::new_v4())
}
