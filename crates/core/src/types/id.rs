//! Newtype IDs for type-safe record references.
//!
//! Record IDs are millisecond timestamps taken when the record is created.
//! Use the `define_id!` macro to create wrappers that prevent mixing IDs
//! from different record lists.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`, `from_timestamp()`, `offset()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use deer_hub_core::define_id;
/// define_id!(TicketId);
/// define_id!(BadgeId);
///
/// let ticket = TicketId::new(1);
/// let badge = BadgeId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: TicketId = badge;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Create an ID from a point in time (milliseconds since the epoch).
            #[must_use]
            pub fn from_timestamp(at: ::chrono::DateTime<::chrono::Utc>) -> Self {
                Self(at.timestamp_millis())
            }

            /// Return this ID shifted by `index`.
            ///
            /// Used when a single submission creates several records that
            /// share one base timestamp.
            #[must_use]
            pub const fn offset(self, index: i64) -> Self {
                Self(self.0 + index)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(LeaveRequestId);
define_id!(DocumentId);
