//! # Coachline Testing
//!
//! Testing utilities and helpers for the Coachline booking wizard.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits (clock, seeds)
//! - A Given-When-Then builder for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use coachline_testing::{test_clock, FixedSeed, ReducerTest};
//!
//! ReducerTest::new(WizardReducer::new())
//!     .with_env(WizardEnvironment::new(
//!         Arc::new(test_clock()),
//!         Arc::new(FixedSeed(7)),
//!         Arc::new(StaticCatalog::new()),
//!         Arc::new(RecordingNotifier::new()),
//!         BookingConfig::default(),
//!     ))
//!     .given_state(WizardState::new())
//!     .when_action(WizardAction::SwapCities)
//!     .then_state(|state| assert_eq!(state.step_kind(), StepKind::Search))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use coachline_core::environment::{Clock, SeedSource};


/// Deterministic implementations of the Environment traits
pub mod mocks {
    use super::{Clock, DateTime, SeedSource, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use coachline_testing::mocks::FixedClock;
    /// use coachline_core::environment::Clock;
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
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }

    /// Seed source that always hands out the same seed
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixedSeed(pub u64);

    impl SeedSource for FixedSeed {
        fn next_seed(&self) -> u64 {
            self.0
        }
    }

    /// Seed source counting up from a starting value
    ///
    /// Useful when a test needs successive generations to differ while
    /// staying reproducible.
    #[derive(Debug)]
    pub struct SequentialSeeds {
        next: AtomicU64,
    }

    impl SequentialSeeds {
        /// Start counting at `start`
        #[must_use]
        pub const fn starting_at(start: u64) -> Self {
            Self {
                next: AtomicU64::new(start),
            }
        }
    }

    impl SeedSource for SequentialSeeds {
        fn next_seed(&self) -> u64 {
            self.next.fetch_add(1, Ordering::Relaxed)
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs anything.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{FixedClock, FixedSeed, SequentialSeeds, test_clock};
pub use reducer_test::{ReducerTest, assertions};
