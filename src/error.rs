//! Error Types
//!
//! One enum per concern. None of these are fatal: views turn them into toasts
//! or per-field messages and keep going.

use crate::models::Bucket;

/// Camera session failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureError {
    #[error("camera access denied: {0}")]
    PermissionDenied(String),
    #[error("no camera available")]
    Unavailable,
    #[error("a capture session is already open")]
    AlreadyOpen,
    #[error("camera is not streaming")]
    NotStreaming,
    #[error("could not encode frame: {0}")]
    Encode(String),
}

/// Attachment intake failures, reported per file
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttachmentError {
    #[error("{name} is {size} bytes, larger than the {max} byte limit")]
    TooLarge { name: String, size: u64, max: u64 },
    #[error("could not read {name}: {reason}")]
    Read { name: String, reason: String },
}

/// Kanban transfer failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransferError {
    #[error("task {task_id} is not in bucket {bucket:?}")]
    NotInBucket { task_id: u64, bucket: Bucket },
}

/// Collection identity violations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectionError {
    #[error("duplicate id {0}")]
    DuplicateId(String),
}

/// Form and modal input validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("an account with {0} already exists")]
    EmailTaken(String),
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Browser-local storage failures; logged and swallowed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("local storage write failed: {0}")]
    Write(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(String),
    #[error("invalid log level {0}")]
    InvalidLevel(String),
}
