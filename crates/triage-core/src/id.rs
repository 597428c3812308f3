//! Strongly-typed identifiers used across the compiler.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! new_id {
    ($name:ident, $counter:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        static $counter: AtomicU64 = AtomicU64::new(0);

        impl $name {
            pub const fn new(v: u64) -> Self {
                Self(v)
            }

            /// Next id from a process-wide counter. Compilation happens during
            /// single-threaded program initialization, but the counter is
            /// atomic so ids stay unique regardless.
            pub fn fresh() -> Self {
                Self($counter.fetch_add(1, Ordering::Relaxed))
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

new_id!(PipelineId, PIPELINE_ID_COUNTER);
