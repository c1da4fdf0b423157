//! Forkful Core - Shared types library.
//!
//! This crate provides common types used across all Forkful components:
//! - `gateway` - API gateway between the browser front end, `PostgreSQL`, and
//!   the recipe intelligence service
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, ingredient keys, and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
