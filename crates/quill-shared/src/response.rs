//! Response envelopes. Every body leaving the API wears one of these:
//! `{status: "success", ...}` on the happy path, `{status: "error",
//! message}` otherwise.

use serde::{Deserialize, Serialize};

const SUCCESS: &str = "success";
const ERROR: &str = "error";

/// `{status: "success", data: ...}`
#[derive(Debug, Clone, Serialize)]
pub struct DataEnvelope<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: SUCCESS,
            data,
        }
    }
}

/// `{status: "success", token, data: ...}` - returned by register/login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthEnvelope<T> {
    pub status: &'static str,
    pub token: String,
    pub data: T,
}

impl<T> AuthEnvelope<T> {
    pub fn new(token: String, data: T) -> Self {
        Self {
            status: SUCCESS,
            token,
            data,
        }
    }
}

/// `{status: "success", message}` - returned by deletes.
#[derive(Debug, Clone, Serialize)]
pub struct MessageEnvelope {
    pub status: &'static str,
    pub message: String,
}

impl MessageEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            message: message.into(),
        }
    }
}

/// `{status: "error", message}` - the single error shape.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
        }
    }
}

/// Pagination block attached to listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}
