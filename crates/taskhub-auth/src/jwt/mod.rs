//! Token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, TokenKind};
pub use decoder::{JwtDecoder, TokenRejection, Validity, VerifiedToken};
pub use encoder::{JwtEncoder, TokenPair};
