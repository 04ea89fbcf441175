//! Common ID Types
//!
//! Type-safe UUID wrappers. Session ids are drawn from UUID v4, which gives
//! 122 random bits out of the 128-bit value.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type SessionId = Id<markers::Session>;
/// let id = SessionId::new();
/// let parsed: SessionId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    fn from_uuid(value: Uuid) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The text could not be parsed as a UUID
#[derive(Debug, thiserror::Error)]
#[error("malformed identifier")]
pub struct IdParseError(#[from] uuid::Error);

impl<T> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for authentication session IDs
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Session;
}

pub type SessionId = Id<markers::Session>;
