//! # Quill Shared
//!
//! Wire types shared between the server and its clients: request DTOs
//! with field constraints, response DTOs, and the envelope formats.

pub mod dto;
pub mod response;

pub use response::{AuthEnvelope, DataEnvelope, ErrorBody, MessageEnvelope, Pagination};
