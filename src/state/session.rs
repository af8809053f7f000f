//! Session state: the `{session, profile, loading}` triple owned by the
//! session synchronizer, plus its pure transitions.
//!
//! Profile fetches are guarded by a generation counter: every accepted
//! session change bumps the generation, and a fetch result is only applied
//! if no newer change arrived while it was in flight. A stale fetch
//! completing late can therefore never overwrite fresher state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::backend::{Profile, ProfileUpdate, Session};

/// Current authenticated identity view. `loading` starts `true` and drops
/// to `false` once the initial session restore has been handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub profile: Option<Profile>,
    pub loading: bool,
    generation: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            profile: None,
            loading: true,
            generation: 0,
        }
    }
}

impl SessionState {
    /// Accept a session change and return the generation token the caller
    /// must present when applying the follow-up profile fetch. A change to
    /// "no session" clears the profile and finishes loading immediately;
    /// there is nothing left to fetch.
    pub fn apply_session(&mut self, session: Option<Session>) -> u64 {
        self.generation += 1;
        let signed_out = session.is_none();
        self.session = session;
        if signed_out {
            self.profile = None;
            self.loading = false;
        }
        self.generation
    }

    /// Apply a completed profile fetch. Returns `false` (and changes
    /// nothing) when a newer session change superseded the fetch.
    pub fn apply_profile(&mut self, generation: u64, profile: Profile) -> bool {
        if generation != self.generation {
            return false;
        }
        self.profile = Some(profile);
        true
    }

    pub fn set_loaded(&mut self) {
        self.loading = false;
    }

    /// Development bypass: overwrite the profile with a fabricated value.
    /// No session is created, which is what distinguishes mock state from
    /// authenticated state.
    pub fn set_mock_profile(&mut self, profile: Profile) {
        self.session = None;
        self.profile = Some(profile);
        self.loading = false;
    }

    /// Merge an acknowledged partial write into the local profile without
    /// a round trip. No-op when no profile is present.
    pub fn merge_profile(&mut self, update: &ProfileUpdate) {
        let Some(profile) = self.profile.as_mut() else {
            return;
        };
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

    /// Identity the profile-row operations act on.
    pub fn identity(&self) -> Option<String> {
        self.profile.as_ref().map(|p| p.id.clone())
    }

    /// A profile with no backing session is a development mock.
    pub fn is_mock(&self) -> bool {
        self.profile.is_some() && self.session.is_none()
    }
}
