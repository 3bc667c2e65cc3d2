//! # taskhub-entity
//!
//! Domain entity models for TaskHub. Database entities derive
//! `sqlx::FromRow` in addition to the serde traits.

pub mod user;
