//! Build-time backend configuration.
//!
//! The WASM bundle has no runtime environment, so the Supabase project URL
//! and anon key are baked in at compile time via `option_env!`, with local
//! development defaults when unset.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Supabase project endpoint and public (anon) API key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Build a config, normalizing away a trailing slash on the URL so
    /// request paths can be appended directly.
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            anon_key: anon_key.to_owned(),
        }
    }

    /// Read the config baked in at compile time.
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("VINCERE_SUPABASE_URL").unwrap_or("http://localhost:54321"),
            option_env!("VINCERE_SUPABASE_ANON_KEY").unwrap_or("dev-anon-key"),
        )
    }
}
