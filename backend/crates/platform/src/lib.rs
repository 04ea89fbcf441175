//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the gate:
//! - Password hashing and verification (Argon2id)
//! - Cookie header building and parsing
//! - Client address extraction

pub mod client;
pub mod cookie;
pub mod password;
