//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth` for identity, `login_form` for the form
//! controller) so the page component stays a thin binding layer.

pub mod auth;
pub mod login_form;
