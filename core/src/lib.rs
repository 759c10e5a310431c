//! # Coachline Core
//!
//! Core traits and types for the Coachline booking wizard.
//!
//! The wizard is written as a reducer: every user input is an action, the
//! reducer applies it to state and describes any follow-up work as effects,
//! and a runtime (`coachline-runtime`) executes those effects.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature (the wizard step and its payload)
//! - **Action**: All possible inputs to a reducer (user input, timer callbacks)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies (clock, randomness, catalog)
//!
//! ## Example
//!
//! ```
//! use coachline_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct StepState {
//!     step: u8,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum StepAction {
//!     Next,
//!     Back,
//! }
//!
//! struct StepReducer;
//!
//! impl Reducer for StepReducer {
//!     type State = StepState;
//!     type Action = StepAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut StepState,
//!         action: StepAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<StepAction>; 4]> {
//!         match action {
//!             StepAction::Next => state.step = state.step.saturating_add(1),
//!             StepAction::Back => state.step = state.step.saturating_sub(1),
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = StepState::default();
//! StepReducer.reduce(&mut state, StepAction::Next, &());
//! assert_eq!(state.step, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, Utc};
pub use smallvec::{smallvec, SmallVec};

/// Declarative macros for building effects
pub mod effect_macros;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most actions produce zero or one effect, so effects are returned
        /// inline in a `SmallVec` to avoid allocating.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timers such as the post-booking reset)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns true for `Effect::None`
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of nondeterminism (wall-clock time, randomness) are abstracted
/// behind traits and injected via the Environment parameter, so reducers stay
/// deterministic under test.
pub mod environment {
    use chrono::{DateTime, NaiveDate, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;

        /// Current calendar date (UTC)
        fn today(&self) -> NaiveDate {
            self.now().date_naive()
        }
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of seeds for pseudo-random generators
    ///
    /// Reducers never hold a random generator themselves. They ask the
    /// environment for a seed and build a seeded generator from it, which
    /// keeps every generated value reproducible from the seed alone.
    pub trait SeedSource: Send + Sync {
        /// Produce the seed for the next generator
        fn next_seed(&self) -> u64;
    }

    /// Production seed source drawing from the operating system's entropy
    #[derive(Debug, Clone, Copy, Default)]
    pub struct EntropySeeds;

    impl SeedSource for EntropySeeds {
        fn next_seed(&self) -> u64 {
            rand::random()
        }
    }
}
