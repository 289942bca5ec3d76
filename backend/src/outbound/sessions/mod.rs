//! Server-side session storage.

mod in_memory_session_registry;

pub use in_memory_session_registry::{DEFAULT_SESSION_TTL, InMemorySessionRegistry};
