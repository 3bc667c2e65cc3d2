//! Concrete record store implementations.

pub mod memory;
pub mod user;

/// Message reported when sign-up hits the unique email constraint.
pub const DUPLICATE_EMAIL: &str = "You have already signed up with that email";
