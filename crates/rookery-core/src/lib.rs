//! Domain models and client-side state for the Rookery social client.
//!
//! This crate is deliberately free of I/O: it holds the entity models,
//! the session state with its pure transitions, and the reducer-style
//! entity slices. Everything that talks to the network or the file
//! system lives in the `rookery-api` and `rookery-infrastructure`
//! crates.

pub mod config;
pub mod error;
pub mod id;
pub mod identity;
pub mod notification;
pub mod post;
pub mod session;
pub mod state;

// Re-export common error type
pub use error::{Result, RookeryError};
