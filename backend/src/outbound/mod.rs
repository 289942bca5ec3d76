//! Outbound adapters implementing domain ports for local infrastructure.
//!
//! - **persistence**: whole-collection JSON documents on disk
//! - **media**: uploaded image files
//! - **security**: Argon2 password hashing
//! - **sessions**: in-memory session registry
//! - **matcher**: the stub student matcher
//!
//! Adapters translate between domain types and storage representations. They
//! contain no business logic.

pub mod matcher;
pub mod media;
pub mod persistence;
pub mod security;
pub mod sessions;
