//! Response envelope printed by the `inplay` CLI.
//!
//! ```json
//! { "meta": { "request_id": "...", "trace_id": "...", "schema_version": "v1.0.0",
//!             "generated_at": "...", "latency_ms": 3, "warnings": [] },
//!   "data": { ... },
//!   "errors": [ { "code": "invalid_symbol_key", "message": "...", "symbol": null } ] }
//! ```
//!
//! Warnings describe data the engine worked around (skipped symbols, dropped
//! rows); errors describe input it had to throw away.

use serde::{Deserialize, Serialize};

use crate::{RejectReason, RejectedKey, Symbol, UtcDateTime};

/// Version of the envelope and signal report layout.
pub const SCHEMA_VERSION: &str = "v1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn new(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// No warnings and no errors.
    pub fn is_clean(&self) -> bool {
        self.meta.warnings.is_empty() && self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub trace_id: String,
    pub schema_version: String,
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    /// Meta stamped now with the current schema version.
    pub fn new(request_id: impl Into<String>, trace_id: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            request_id: request_id.into(),
            trace_id: trace_id.into(),
            schema_version: String::from(SCHEMA_VERSION),
            generated_at: UtcDateTime::now(),
            latency_ms,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

/// Why a piece of input was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A map key that is not a valid symbol.
    InvalidSymbolKey,
    /// A map key that normalizes onto a symbol already read from the file.
    DuplicateSymbolKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Symbol>,
}

impl EnvelopeError {
    /// Error for a key rejected while reading `file` (`prices`, `fundamentals`).
    pub fn rejected_key(file: &str, rejection: &RejectedKey) -> Self {
        let (code, symbol) = match &rejection.reason {
            RejectReason::Invalid(_) => (ErrorCode::InvalidSymbolKey, None),
            RejectReason::Duplicate(symbol) => (ErrorCode::DuplicateSymbolKey, Some(symbol.clone())),
        };

        Self {
            code,
            message: format!("{file}: {rejection}"),
            symbol,
        }
    }
}
