//! Newtype IDs for type-safe identifiers.
//!
//! Each ID kind carries its own prefix (`prd_`, `cmb_`, ...) when generated,
//! so an ID that leaks into a log or a payload is recognizable at a glance.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[doc = concat!("Identifier generated with the `", $prefix, "_` prefix.")]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh identifier.
            pub fn generate() -> Self {
                Self(generate_id($prefix))
            }

            /// The prefix used by [`Self::generate`].
            pub const fn prefix() -> &'static str {
                $prefix
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId, "prd");
define_id!(StoreId, "str");
define_id!(CategoryId, "cat");
define_id!(VariantTypeId, "vty");
define_id!(VariantValueId, "vvl");
define_id!(CombinationId, "cmb");
define_id!(CartId, "crt");
define_id!(LineItemId, "lin");
define_id!(UserId, "usr");

/// Build `<prefix>_<hex>` from the wall clock and a process-wide counter.
fn generate_id(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{prefix}_{nanos:x}{counter:04x}")
}
