//! Networking modules for the authentication REST resource.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the four auth operations, `transport` abstracts the HTTP send,
//! `middleware` holds the request transforms applied before every send, and
//! `types` defines the wire schema.

pub mod api;
pub mod middleware;
pub mod transport;
pub mod types;
