//! Error types for port operations.

/// Remote location-store errors with context for debugging.
///
/// Repository operations never retry on their own; every failure is surfaced
/// to the initiating action and no partial state change is assumed committed
/// unless explicitly confirmed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepoError {
    /// Record not found - includes the ID for actionable error messages.
    #[error("SavedLocation not found: {id}")]
    NotFound { id: String },

    /// Transport-level failure (connection refused, timeout, TLS).
    #[error("Transport error in {operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The store accepted the request but reported a failure.
    #[error("Store error in {operation}: {message}")]
    Store {
        operation: &'static str,
        message: String,
    },

    /// The store returned a document this engine refuses to trust.
    #[error("Malformed document: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a NotFound error with the record ID.
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound {
            id: id.to_string(),
        }
    }

    /// Create a Transport error with operation context.
    pub fn transport(operation: &'static str, message: impl ToString) -> Self {
        Self::Transport {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Store error with operation context.
    pub fn store(operation: &'static str, message: impl ToString) -> Self {
        Self::Store {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the device GPS provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeoError {
    /// The user refused location permission. Recoverable by re-prompting.
    #[error("Location permission denied")]
    PermissionDenied,
    /// The provider could not produce a fix.
    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the reverse-geocoding provider.
///
/// These never escape the enrichment layer; they degrade to a placeholder
/// address on the affected location only.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Transport(String),
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}
