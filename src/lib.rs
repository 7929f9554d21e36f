//! # budget-login
//!
//! Leptos + WASM login page for BUDGET - ESP.
//!
//! The form controller (`state::login_form`) validates input and drives the
//! submission lifecycle; the auth client (`net::api`) exchanges credentials
//! for a session token, keeps it in durable storage, and signs later
//! requests with it. On success the browser is handed off to the
//! destination application with the token in the query string.

pub mod app;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entry point: install logging and mount [`app::App`] on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("mounting login page");
    leptos::mount::mount_to_body(app::App);
}
