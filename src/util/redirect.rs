//! Post-login hand-off to the destination application.
//!
//! The token travels raw; the user record is compact JSON, percent-encoded.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use crate::net::types::User;

/// Build `<base>?token=<token>&user=<percent-encoded JSON>`.
pub fn redirect_url(base: &str, token: &str, user: &User) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    let user_json = user.to_string();
    format!("{base}{separator}token={token}&user={}", urlencoding::encode(&user_json))
}

/// Navigate the current tab to `url`.
pub fn navigate(url: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                log::warn!("redirect failed: {e:?}");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::debug!("redirect to {url} skipped outside the browser");
    }
}
