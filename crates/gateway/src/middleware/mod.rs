//! HTTP middleware for the gateway.
//!
//! The only custom piece is the auth boundary: identity arrives as a bearer
//! token minted by the external identity provider, and the `RequireUser`
//! extractor turns it into an explicit [`crate::models::CurrentUser`] before
//! any handler logic runs. Tracing and CORS come from tower-http layers wired
//! in `main`.

pub mod auth;

pub use auth::{OptionalUser, RequireUser};
