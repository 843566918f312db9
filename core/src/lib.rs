//! # Todos Core
//!
//! Core traits and types for the todos workspace.
//!
//! Business logic is expressed as reducers: pure functions that take the
//! current state, an action and an environment of injected dependencies, mutate
//! the state in place and return descriptions of follow-up work.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature (the todo list, the view state)
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up work described as data, executed by the runtime
//! - **Environment**: Injected dependencies (clock, id generation)
//!
//! ## Example
//!
//! ```
//! use todos_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Tally {
//!     count: usize,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum TallyAction {
//!     Bump,
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = Tally;
//!     type Action = TallyAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Tally,
//!         action: TallyAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<TallyAction>; 4]> {
//!         match action {
//!             TallyAction::Bump => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = Tally::default();
//! let _ = TallyReducer.reduce(&mut state, TallyAction::Bump, &());
//! assert_eq!(state.count, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
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
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Follow-up work descriptions
///
/// Effects are values, not execution. A reducer returns them and the runtime
/// decides when to run them.
pub mod effect {
    /// Effect type - describes follow-up work to be executed by the runtime
    ///
    /// A reducer returns its effects in the order they should run.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer.
        ///
        /// The runtime processes dispatched actions before the `send` that
        /// produced them returns.
        Dispatch(Box<Action>),
    }

    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Dispatch(action) => {
                    f.debug_tuple("Effect::Dispatch").field(action).finish()
                },
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Dispatch a follow-up action
        #[must_use]
        pub fn dispatch(action: Action) -> Self {
            Effect::Dispatch(Box::new(action))
        }

        /// Returns true if this effect does no work at all
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Lift the effect into a parent action type.
        ///
        /// Used when a child reducer is embedded in a parent reducer whose
        /// action enum wraps the child's actions.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            F: FnOnce(Action) -> B,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Dispatch(action) => Effect::Dispatch(Box::new(f(*action))),
            }
        }

        /// The action this effect dispatches, if any
        #[must_use]
        pub fn into_dispatched(self) -> Option<Action> {
            match self {
                Effect::None => None,
                Effect::Dispatch(action) => Some(*action),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism (time, identifiers) are abstracted behind
/// traits and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of fresh identifiers for newly created aggregates
    pub trait IdGenerator: Send + Sync {
        /// Produce an identifier that has never been returned before
        fn next_id(&self) -> Uuid;
    }

    /// Production id generator producing random v4 UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct RandomIds;

    impl IdGenerator for RandomIds {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }
}
