//! Collaborator traits defined in `taskhub-core` and implemented by other crates.

pub mod hashing;
pub mod kv;

pub use hashing::PasswordHashing;
pub use kv::KeyValueStore;
