//! Server-side session tracking and the flows built on it.

pub mod manager;
pub mod registry;

pub use manager::{SessionManager, SignInOutcome};
pub use registry::SessionRegistry;
