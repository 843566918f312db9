//! # Todos Testing
//!
//! Testing utilities and helpers for the todos workspace.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todos_testing::{ReducerTest, assertions, test_clock, SequentialIds};
//!
//! ReducerTest::new(TodoListReducer::new())
//!     .with_env(TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new())))
//!     .given_state(TodoListState::new())
//!     .when_action(TodoListAction::Add { title: "Buy milk".into() })
//!     .then_state(|state| assert_eq!(state.len(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use todos_core::environment::{Clock, IdGenerator};


pub use reducer_test::{assertions, ReducerTest};

/// Deterministic implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todos_testing::mocks::FixedClock;
    /// use todos_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Id generator handing out `1, 2, 3, ...` as UUIDs
    ///
    /// Lets tests predict the id of the next created item.
    ///
    /// ```
    /// use todos_testing::mocks::SequentialIds;
    /// use todos_core::environment::IdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIds::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        issued: AtomicU64,
    }

    impl SequentialIds {
        /// Start a sequence whose first id is `1`
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_after(0)
        }

        /// Start a sequence whose first id is `last + 1`
        #[must_use]
        pub const fn starting_after(last: u64) -> Self {
            Self {
                issued: AtomicU64::new(last),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> Uuid {
            let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
            Uuid::from_u128(u128::from(n))
        }
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, SequentialIds};
