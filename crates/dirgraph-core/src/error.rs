//! Error types for dirgraph.
//!
//! This module provides a unified error type with explicit variants for
//! configuration, authentication, request, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for dirgraph operations.
///
/// Callers match on the variant to decide whether to skip a listing,
/// re-authenticate, or abort.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration or credential material is missing.
    ///
    /// Always detected before any network I/O.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Token acquisition failed.
    #[error("authentication error: {0}")]
    Authentication(#[from] AuthError),

    /// A directory request failed.
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// Input validation errors (tenant id, client id, URL format).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if the error signals that the caller should re-authenticate.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Request(e) if e.is_unauthorized())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The client secret is not set or empty.
    #[error("client secret is not set")]
    MissingClientSecret,

    /// A required setting is absent.
    #[error("missing required setting '{name}'")]
    Missing { name: &'static str },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

/// Token acquisition errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the request.
    #[error("token endpoint returned HTTP {status}{}", describe(.error, .description))]
    Rejected {
        status: u16,
        error: Option<String>,
        description: Option<String>,
    },

    /// The token endpoint could not be reached.
    #[error("token request failed: {message}")]
    Transport { message: String },

    /// The token endpoint answered with a body we could not use.
    #[error("invalid token response: {message}")]
    InvalidResponse { message: String },

    /// No delegated token is available and interactive consent is not possible.
    #[error("no delegated user token available; user consent is required")]
    ConsentRequired,

    /// The delegated token has expired.
    #[error("delegated user token has expired")]
    TokenExpired,
}

fn describe(error: &Option<String>, description: &Option<String>) -> String {
    match (error, description) {
        (Some(e), Some(d)) => format!(" [{}]: {}", e, d),
        (Some(e), None) => format!(" [{}]", e),
        (None, Some(d)) => format!(": {}", d),
        (None, None) => String::new(),
    }
}

/// Classification of a failed directory request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    /// Connection, DNS, TLS, or timeout failure. No status is available.
    Transport,
    /// HTTP 401; the token is likely expired and the caller should re-authenticate.
    Unauthorized,
    /// Any other non-success response, or a body that could not be decoded.
    Server,
}

impl fmt::Display for RequestErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestErrorKind::Transport => "transport",
            RequestErrorKind::Unauthorized => "unauthorized",
            RequestErrorKind::Server => "server error",
        };
        f.write_str(s)
    }
}

/// A failed directory request.
#[derive(Debug)]
pub struct RequestError {
    /// What went wrong.
    pub kind: RequestErrorKind,
    /// HTTP status code, when a response was received.
    pub status: Option<u16>,
    /// Error code reported by the service (if present).
    pub code: Option<String>,
    /// Error message from the service or transport.
    pub message: Option<String>,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    /// A transport failure with no response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: RequestErrorKind::Transport,
            status: None,
            code: None,
            message: Some(message.into()),
        }
    }

    /// Build an error from an HTTP status and the service's error details.
    pub fn from_status(status: u16, code: Option<String>, message: Option<String>) -> Self {
        let kind = if status == 401 {
            RequestErrorKind::Unauthorized
        } else {
            RequestErrorKind::Server
        };
        Self {
            kind,
            status: Some(status),
            code,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_unauthorized(&self) -> bool {
        self.kind == RequestErrorKind::Unauthorized
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid tenant identifier.
    #[error("invalid tenant id '{value}': {reason}")]
    TenantId { value: String, reason: String },

    /// Invalid client (application) identifier.
    #[error("invalid client id '{value}': {reason}")]
    ClientId { value: String, reason: String },

    /// Invalid endpoint URL.
    #[error("invalid endpoint URL '{value}': {reason}")]
    EndpointUrl { value: String, reason: String },

    /// Invalid continuation link returned by the service.
    #[error("invalid continuation link '{value}': {reason}")]
    Continuation { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
