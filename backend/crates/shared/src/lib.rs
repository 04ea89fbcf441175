//! Shared Kernel
//!
//! The small vocabulary every gate crate agrees on:
//! - Unified error type and error classification
//! - Typed identifiers (session ids)
//!
//! Nothing here knows about HTTP routing, password hashing or storage.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
