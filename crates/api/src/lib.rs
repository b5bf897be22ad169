//! Netmon monitoring service library.
//!
//! Exposes configuration, application bootstrap, and the HTTP router so
//! integration tests and the binary entrypoint can both access them.

pub mod bootstrap;
pub mod config;
pub mod router;
pub mod routes;
pub mod state;
