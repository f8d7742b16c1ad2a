//! # Quill Core
//!
//! The domain layer of the Quill publishing backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the access policy, and the ports infrastructure must implement.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;

pub use error::DomainError;
