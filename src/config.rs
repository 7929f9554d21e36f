//! Client configuration baked in at build time.
//!
//! A static WASM bundle has no process environment, so values come from
//! `option_env!` during compilation:
//! - `LOGIN_API_BASE_URL`: default `http://localhost:5000/api`
//! - `LOGIN_REDIRECT_URL`: default `http://localhost:3000/`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:3000/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base of the auth REST resource, without trailing `/`.
    pub api_base_url: String,
    /// Destination after a login that returned a token.
    pub redirect_url: String,
}

impl ClientConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("LOGIN_API_BASE_URL"), option_env!("LOGIN_REDIRECT_URL"))
    }

    /// Build from optional raw values; blank values fall back to defaults.
    pub fn from_values(api_base_url: Option<&str>, redirect_url: Option<&str>) -> Self {
        let api_base_url = non_blank(api_base_url)
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let redirect_url = non_blank(redirect_url).unwrap_or(DEFAULT_REDIRECT_URL).to_owned();
        Self { api_base_url, redirect_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
