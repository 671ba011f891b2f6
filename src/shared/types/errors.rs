use thiserror::Error;

use crate::domain::PostId;

/// Failure talking to the remote posts resource
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Remote unavailable: {0}")]
    Unavailable(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Which write a `StoreError::RemoteWrite` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Initial (or repeated) load failed
    #[error("Failed to fetch posts: {0}")]
    RemoteFetch(#[source] RemoteError),

    /// Create, update or delete failed
    #[error("Failed to {op} post{}: {source}", .id.map(|id| format!(" {}", id)).unwrap_or_default())]
    RemoteWrite {
        op: WriteOp,
        id: Option<PostId>,
        #[source]
        source: RemoteError,
    },

    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    #[error("Validation: {0}")]
    Validation(String),

    /// Lookup of a post that is not in the local collection
    #[error("Post {0} is not in the list")]
    NotListed(PostId),
}

impl StoreError {
    pub fn write(op: WriteOp, id: Option<PostId>, source: RemoteError) -> Self {
        Self::RemoteWrite { op, id, source }
    }
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, msg)
                })
            })
            .collect();

        if fields.is_empty() {
            Self::Validation("validation failed".to_string())
        } else {
            Self::Validation(fields.join("; "))
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_mentions_operation_and_id() {
        let err = StoreError::write(
            WriteOp::Delete,
            Some(2),
            RemoteError::Status {
                status: 500,
                message: "boom".into(),
            },
        );

        assert_eq!(err.to_string(), "Failed to delete post 2: Remote returned 500: boom");
    }

    #[test]
    fn create_error_has_no_id() {
        let err = StoreError::write(WriteOp::Create, None, RemoteError::Unavailable("down".into()));
        assert_eq!(err.to_string(), "Failed to create post: Remote unavailable: down");
    }

    #[test]
    fn not_listed_names_the_post() {
        assert_eq!(StoreError::NotListed(9).to_string(), "Post 9 is not in the list");
    }
}
