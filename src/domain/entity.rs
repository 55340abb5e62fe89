//! Domain Layer - Core Entity Trait and Fetch Errors
//!
//! Every record pulled from a remote endpoint has a stable identifier, and
//! every way a fetch can go wrong collapses into one `FetchError`.

use std::fmt::Debug;
use std::hash::Hash;

/// Core trait for all fetched entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + Hash + Debug + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Fetch-level errors
///
/// The rendering side only ever sees the `Display` text; the variants exist
/// so the fetch boundary can log and test what actually happened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Request could not be sent, timed out, or the body could not be read
    #[error("{0}")]
    Network(String),
    /// Server answered with a non-2xx status
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },
    /// Body is not JSON or does not have the expected shape
    #[error("Malformed response: {0}")]
    Parse(String),
    /// A specific entity was requested and the server had none
    #[error("{0} not found")]
    NotFound(String),
}

impl FetchError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        let http = FetchError::Http {
            status: 404,
            message: "Failed to fetch products".to_string(),
        };
        assert_eq!(http.to_string(), "Failed to fetch products (HTTP 404)");
        assert_eq!(http.status_code(), Some(404));

        let missing = FetchError::NotFound("Product 99".to_string());
        assert_eq!(missing.to_string(), "Product 99 not found");
        assert_eq!(missing.status_code(), None);
    }

    #[test]
    fn test_json_errors_become_parse_errors() {
        let err = serde_json::from_str::<Vec<u32>>("{not json").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::Parse(_)));
    }
}
