//! Stored object types
//!
//! Everything the repository persists in its object store is an object identified by a
//! SHA-1 based digest. There are two kinds:
//!
//! - **Blob**: a named file snapshot (content plus the path it was taken from)
//! - **Commit**: a full path → blob snapshot plus history metadata
//!
//! All objects serialize to `<type> <size>\0<body>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const DIGEST_LENGTH: usize = 40;

/// Commit ids are a single digest of the serialized commit
pub const COMMIT_ID_LENGTH: usize = DIGEST_LENGTH;

/// Blob ids are the digest of the content followed by the digest of the name
pub const BLOB_ID_LENGTH: usize = 2 * DIGEST_LENGTH;
