//! Ports and Adapters Infrastructure
//!
//! Foundational types for the hexagonal split between the web layer and the
//! record store it fronts.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          Route Handlers (web)            │
//! └──────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────┐
//! │   Port Traits (DoctorPort, ...)          │
//! │   depend only on core_kernel             │
//! └──────────────────────────────────────────┘
//!                      ▲
//!                      │
//!          ┌───────────┴───────────┐
//!          │   External Adapter    │
//!          │  (CRM REST API)       │
//!          └───────────────────────┘
//! ```
//!
//! Each domain defines its own port trait extending [`DomainPort`]. Adapters
//! report every failure through [`PortError`], so handlers can decide how to
//! surface a failure without knowing which store produced it.

use thiserror::Error;

/// Error type for port operations
///
/// Adapters never retry; each variant describes a single failed attempt.
#[derive(Debug, Error)]
pub enum PortError {
    /// The store could not be reached (DNS, connect, TLS, broken body stream)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store answered with a non-success status
    #[error("Upstream returned {status_code}: {body}")]
    Upstream {
        status_code: u16,
        body: String,
    },

    /// A success response whose body did not match the expected shape
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// The adapter itself is misconfigured (bad base URL, unusable client)
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
    },
}

impl PortError {
    /// Creates a Transport error keeping the underlying cause
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PortError::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Creates an Upstream error from a status code and the raw response body
    pub fn upstream(status_code: u16, body: impl Into<String>) -> Self {
        PortError::Upstream {
            status_code,
            body: body.into(),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        PortError::Configuration {
            message: message.into(),
        }
    }

    /// Returns the upstream status code, if the store answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PortError::Upstream { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns true if the store reported the requested record as unknown
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Returns true if the store could not be reached
    pub fn is_transport(&self) -> bool {
        matches!(self, PortError::Transport { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared between concurrently running request handlers, so they
/// must be thread-safe and usable behind `Arc<dyn ...>`.
pub trait DomainPort: Send + Sync + 'static {}
