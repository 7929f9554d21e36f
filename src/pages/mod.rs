//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page binds DOM events to a controller in `state` and renders its
//! state; no decision logic lives here.

pub mod login;
