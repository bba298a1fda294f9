use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Get the inner u64 value.
            pub fn inner(self) -> u64 {
                self.0
            }

            /// Create an ID from a u64 value.
            pub fn new(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

define_id_type!(ModelId);

impl ModelId {
    /// Mint a process-unique identity tag.
    ///
    /// Two models created independently always get distinct tags; the tag is
    /// what binds expressions, constraints, and objectives to "their" model.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}
