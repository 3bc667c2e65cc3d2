//! # taskhub-core
//!
//! Core crate for TaskHub. Contains the configuration schema, the
//! collaborator traits (key-value session store, password hashing),
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other TaskHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
