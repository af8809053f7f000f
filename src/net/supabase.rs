//! Supabase implementation of the backend contract.
//!
//! Talks straight to the project's REST surface: GoTrue under `/auth/v1`
//! for identities and sessions, PostgREST under `/rest/v1` for the
//! `profiles` and `wiki_articles` tables, and storage under `/storage/v1`
//! for avatars. The session is persisted in `localStorage` between page
//! loads, and recovery links (`#access_token=...` fragments) are adopted
//! on restore, the way the vendor SDK does it.
//!
//! Network calls only exist in the browser build; the native build keeps
//! the pure response-mapping helpers compilable and tested.

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SupabaseConfig;
use crate::net::backend::{
    AuthBackend, AuthError, NewProfile, NewWikiArticle, Profile, ProfileUpdate,
    SessionChangeHandler, SessionChangeHub, SessionSubscription, Session, WikiArticle,
};

#[cfg(feature = "csr")]
const SESSION_STORAGE_KEY: &str = "vincere.session";

/// Bucket holding publicly readable avatar images.
#[cfg(feature = "csr")]
const AVATAR_BUCKET: &str = "avatars";

pub struct SupabaseBackend {
    pub config: SupabaseConfig,
    session: Rc<RefCell<Option<Session>>>,
    hub: SessionChangeHub,
}

impl SupabaseBackend {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            session: Rc::default(),
            hub: SessionChangeHub::default(),
        }
    }
}

#[cfg(feature = "csr")]
impl SupabaseBackend {
    /// Bearer credential for data calls: the user token when signed in,
    /// the anon key otherwise.
    fn bearer(&self) -> String {
        self.session
            .borrow()
            .as_ref()
            .filter(|s| !s.access_token.is_empty())
            .map_or_else(|| self.config.anon_key.clone(), |s| s.access_token.clone())
    }

    /// Cache a restored session without notifying subscribers; used on
    /// page load where the caller already handles the returned value.
    fn remember_session(&self, session: &Session) {
        *self.session.borrow_mut() = Some(session.clone());
        write_stored_session(Some(session));
    }

    /// Replace the session and notify every subscriber. `None` means
    /// signed out.
    fn store_session(&self, session: Option<Session>) {
        *self.session.borrow_mut() = session.clone();
        write_stored_session(session.as_ref());
        self.hub.emit(session);
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.config.url)
    }

    fn rest_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{table}?{query}", self.config.url)
    }

    async fn fetch_user_id(&self, access_token: &str) -> Result<String, AuthError> {
        #[derive(serde::Deserialize)]
        struct AuthUser {
            id: String,
        }

        let resp = gloo_net::http::Request::get(&self.auth_url("/user"))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        if !resp.ok() {
            let body = resp.text().await.unwrap_or_default();
            return Err(map_auth_failure(resp.status(), &body));
        }
        let user: AuthUser = resp
            .json()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        Ok(user.id)
    }

    async fn token_session(&self, resp: gloo_net::http::Response) -> Result<Session, AuthError> {
        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        Ok(token.into_session(now_secs()))
    }
}

/// `/auth/v1/token` and autoconfirmed `/auth/v1/signup` response shape.
#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_at: Option<u64>,
    #[serde(default)]
    expires_in: Option<u64>,
    user: TokenUser,
}

#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct TokenUser {
    id: String,
}

#[cfg(feature = "csr")]
impl TokenResponse {
    fn into_session(self, now: u64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|ttl| now + ttl));
        Session {
            user_id: self.user.id,
            access_token: self.access_token,
            expires_at,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl AuthBackend for SupabaseBackend {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        #[cfg(feature = "csr")]
        {
            if let Some(session) = self.session.borrow().clone() {
                return Ok(Some(session));
            }

            // Recovery links arrive with the token in the URL fragment.
            if let Some((access_token, expires_at)) = take_recovery_fragment() {
                let user_id = self.fetch_user_id(&access_token).await?;
                let session = Session {
                    user_id,
                    access_token,
                    expires_at,
                };
                self.remember_session(&session);
                return Ok(Some(session));
            }

            if let Some(stored) = read_stored_session() {
                if session_expired(&stored, now_secs()) {
                    write_stored_session(None);
                    return Ok(None);
                }
                self.remember_session(&stored);
                return Ok(Some(stored));
            }
            Ok(None)
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(self.session.borrow().clone())
        }
    }

    fn subscribe_session_changes(&self, handler: SessionChangeHandler) -> SessionSubscription {
        self.hub.subscribe(handler)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(
                &self.auth_url("/token?grant_type=password"),
            )
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .map_err(|e| AuthError::Backend(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_auth_failure(resp.status(), &body));
            }

            let session = self.token_session(resp).await?;
            self.store_session(Some(session.clone()));
            Ok(session)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password);
            Err(AuthError::Unsupported)
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<Session, AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.auth_url("/signup"))
                .header("apikey", &self.config.anon_key)
                .json(&serde_json::json!({
                    "email": email,
                    "password": password,
                    "data": { "username": username, "display_name": username },
                }))
                .map_err(|e| AuthError::Backend(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_auth_failure(resp.status(), &body));
            }

            // Autoconfirmed projects return a full session; projects with
            // mail confirmation return only the created user. Either way
            // an identity now exists.
            let body = resp.text().await.map_err(|e| AuthError::Backend(e.to_string()))?;
            if let Ok(token) = serde_json::from_str::<TokenResponse>(&body) {
                let session = token.into_session(now_secs());
                self.store_session(Some(session.clone()));
                return Ok(session);
            }

            #[derive(serde::Deserialize)]
            struct CreatedUser {
                id: String,
            }
            let user: CreatedUser = serde_json::from_str(&body)
                .map_err(|e| AuthError::Backend(e.to_string()))?;
            Ok(Session {
                user_id: user.id,
                access_token: String::new(),
                expires_at: None,
            })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password, username);
            Err(AuthError::Unsupported)
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.auth_url("/logout"))
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", self.bearer()))
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() && resp.status() != 401 {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_auth_failure(resp.status(), &body));
            }

            // A 401 means the token was already dead; treat it as signed
            // out rather than failing the user's explicit request.
            self.store_session(None);
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(AuthError::Unsupported)
        }
    }

    async fn send_password_reset(
        &self,
        email: &str,
        redirect_path: &str,
    ) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            let origin = web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_default();
            let url = format!(
                "{}?redirect_to={origin}{redirect_path}",
                self.auth_url("/recover")
            );
            let resp = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .json(&serde_json::json!({ "email": email }))
                .map_err(|e| AuthError::Backend(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_auth_failure(resp.status(), &body));
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, redirect_path);
            Err(AuthError::Unsupported)
        }
    }

    async fn change_password(&self, new_password: &str) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            if self.session.borrow().is_none() {
                return Err(AuthError::NotAuthenticated);
            }
            let resp = gloo_net::http::Request::put(&self.auth_url("/user"))
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", self.bearer()))
                .json(&serde_json::json!({ "password": new_password }))
                .map_err(|e| AuthError::Backend(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_auth_failure(resp.status(), &body));
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = new_password;
            Err(AuthError::Unsupported)
        }
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, AuthError> {
        #[cfg(feature = "csr")]
        {
            let url = self.rest_url(
                "profiles",
                &format!("{}&select=*", filter_param("id", "eq", user_id)),
            );
            let resp = gloo_net::http::Request::get(&url)
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", self.bearer()))
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_rest_failure(resp.status(), &body));
            }
            let mut rows: Vec<Profile> = resp
                .json()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;
            Ok(if rows.is_empty() {
                None
            } else {
                Some(rows.swap_remove(0))
            })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = user_id;
            Err(AuthError::Unsupported)
        }
    }

    async fn username_taken(
        &self,
        username: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, AuthError> {
        #[cfg(feature = "csr")]
        {
            let mut query = format!("{}&select=id", filter_param("username", "eq", username));
            if let Some(id) = exclude_id {
                query.push_str(&format!("&{}", filter_param("id", "neq", id)));
            }
            let resp = gloo_net::http::Request::get(&self.rest_url("profiles", &query))
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", self.bearer()))
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_rest_failure(resp.status(), &body));
            }
            let rows: Vec<serde_json::Value> = resp
                .json()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;
            Ok(!rows.is_empty())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (username, exclude_id);
            Err(AuthError::Unsupported)
        }
    }

    async fn insert_profile(&self, profile: &NewProfile) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.rest_url("profiles", "select=id"))
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", self.bearer()))
                .header("Prefer", "return=minimal")
                .json(profile)
                .map_err(|e| AuthError::Backend(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_rest_failure(resp.status(), &body));
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = profile;
            Err(AuthError::Unsupported)
        }
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            let url = self.rest_url("profiles", &filter_param("id", "eq", user_id));
            let resp = gloo_net::http::Request::patch(&url)
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", self.bearer()))
                .header("Prefer", "return=minimal")
                .json(update)
                .map_err(|e| AuthError::Backend(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_rest_failure(resp.status(), &body));
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (user_id, update);
            Err(AuthError::Unsupported)
        }
    }

    async fn upload_avatar(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, AuthError> {
        #[cfg(feature = "csr")]
        {
            let url = format!(
                "{}/storage/v1/object/{AVATAR_BUCKET}/{file_name}",
                self.config.url
            );
            let body = js_sys::Uint8Array::from(bytes.as_slice());
            let resp = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", self.bearer()))
                .header("Content-Type", "application/octet-stream")
                .header("x-upsert", "true")
                .body(body)
                .map_err(|e| AuthError::Backend(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_rest_failure(resp.status(), &body));
            }
            Ok(public_object_url(&self.config.url, AVATAR_BUCKET, file_name))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (file_name, bytes);
            Err(AuthError::Unsupported)
        }
    }

    async fn create_wiki_article(
        &self,
        article: &NewWikiArticle,
    ) -> Result<WikiArticle, AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.rest_url("wiki_articles", "select=*"))
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", self.bearer()))
                .header("Prefer", "return=representation")
                .json(article)
                .map_err(|e| AuthError::Backend(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;

            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(map_rest_failure(resp.status(), &body));
            }
            let mut rows: Vec<WikiArticle> = resp
                .json()
                .await
                .map_err(|e| AuthError::Backend(e.to_string()))?;
            if rows.is_empty() {
                return Err(AuthError::Backend("empty insert response".to_owned()));
            }
            Ok(rows.swap_remove(0))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = article;
            Err(AuthError::Unsupported)
        }
    }
}

// =============================================================================
// BROWSER HELPERS
// =============================================================================

#[cfg(feature = "csr")]
fn now_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

#[cfg(feature = "csr")]
fn read_stored_session() -> Option<Session> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let raw = storage.get_item(SESSION_STORAGE_KEY).ok()??;
    serde_json::from_str(&raw).ok()
}

#[cfg(feature = "csr")]
fn write_stored_session(session: Option<&Session>) {
    let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };
    match session.and_then(|s| serde_json::to_string(s).ok()) {
        Some(raw) => {
            let _ = storage.set_item(SESSION_STORAGE_KEY, &raw);
        }
        None => {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

/// Pull a recovery token out of the URL fragment, clearing the fragment so
/// a reload does not re-adopt it.
#[cfg(feature = "csr")]
fn take_recovery_fragment() -> Option<(String, Option<u64>)> {
    let location = web_sys::window()?.location();
    let fragment = location.hash().ok()?;
    let parsed = recovery_from_fragment(&fragment)?;
    let _ = location.set_hash("");
    Some(parsed)
}

// =============================================================================
// PURE HELPERS (native-testable)
// =============================================================================

/// PostgREST filter pair with the value percent-encoded, so user-supplied
/// content containing `&`, `=`, or spaces cannot escape into the query
/// string.
pub(crate) fn filter_param(column: &str, op: &str, value: &str) -> String {
    format!("{column}={op}.{}", urlencoding::encode(value))
}

pub(crate) fn parse_fragment_param(fragment: &str, key: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then(|| v.to_owned())
        })
}

/// Extract `(access_token, expires_at)` from a GoTrue redirect fragment.
pub(crate) fn recovery_from_fragment(fragment: &str) -> Option<(String, Option<u64>)> {
    let access_token = parse_fragment_param(fragment, "access_token")?;
    if access_token.is_empty() {
        return None;
    }
    let expires_at = parse_fragment_param(fragment, "expires_at").and_then(|v| v.parse().ok());
    Some((access_token, expires_at))
}

pub(crate) fn session_expired(session: &Session, now_secs: u64) -> bool {
    session.expires_at.is_some_and(|t| t <= now_secs)
}

pub(crate) fn public_object_url(base_url: &str, bucket: &str, name: &str) -> String {
    format!("{base_url}/storage/v1/object/public/{bucket}/{name}")
}

fn body_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|m| m.as_str()).map(str::to_owned))
}

/// Classify a GoTrue rejection into the error taxonomy.
pub(crate) fn map_auth_failure(status: u16, body: &str) -> AuthError {
    let message = body_message(body).unwrap_or_else(|| format!("auth request failed ({status})"));
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("invalid login credentials") || lowered.contains("invalid_grant") {
        AuthError::InvalidCredentials
    } else if lowered.contains("already registered") || lowered.contains("already been registered")
    {
        AuthError::EmailTaken
    } else {
        AuthError::Backend(message)
    }
}

/// Classify a PostgREST rejection into the error taxonomy.
pub(crate) fn map_rest_failure(status: u16, body: &str) -> AuthError {
    let message = body_message(body).unwrap_or_else(|| format!("request failed ({status})"));
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("duplicate key") && lowered.contains("username") {
        AuthError::UsernameTaken
    } else {
        AuthError::Backend(message)
    }
}
