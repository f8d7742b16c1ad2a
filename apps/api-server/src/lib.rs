//! Quill API server - library surface shared by the binary and the
//! integration tests.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
