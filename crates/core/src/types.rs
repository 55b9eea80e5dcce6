//! Primitive type aliases shared across the workspace.

/// Opaque stable record identifier assigned by the hosted database.
pub type RecordId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
