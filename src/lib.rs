//! # vincere-site
//!
//! Leptos + WASM frontend for the Vincere Colors marketing and community
//! site: static game/store pages, a community wiki, and email/password
//! account management against a Supabase backend.
//!
//! This crate contains pages, components, application state, and the
//! backend client. The session synchronizer in [`net::session_sync`] owns
//! the authenticated-session lifecycle; every page is a leaf consumer of
//! its state.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
