//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the stateless security utilities of the
//! identity core:
//! - Cryptographic helpers (SHA-256, MD5 fingerprints, references, Base64)
//! - Password salting, derivation and verification (Argon2id)
//! - Input classification and sanitization
//! - Request-source normalization from HTTP metadata

pub mod client;
pub mod crypto;
pub mod password;
pub mod validate;
