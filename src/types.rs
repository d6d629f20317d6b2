//! Core type definitions for compile-time safety.
//!
//! Newtype wrappers around the backend's numeric identifiers so a room id can
//! never be passed where a club id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Get the inner value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Backend user identifier.
    UserId
);
numeric_id!(
    /// Backend club identifier.
    ClubId
);
numeric_id!(
    /// Training session identifier.
    TrainingId
);
numeric_id!(
    /// Training room identifier.
    RoomId
);
numeric_id!(
    /// News item identifier.
    NewsId
);

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn ids_are_transparent_on_the_wire() {
        let id: RoomId = serde_json::from_str("3").unwrap();
        assert_eq!(id, RoomId(3));
        assert_eq!(serde_json::to_string(&TrainingId(42)).unwrap(), "42");
        assert_eq!(ClubId::from(2).to_string(), "2");
    }
}
