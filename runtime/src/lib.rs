//! # Todos Runtime
//!
//! Runtime implementation for the todos workspace.
//!
//! This crate provides the Store runtime that owns state, runs the reducer and
//! executes the effects it returns.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state behind a lock and serializes all mutations
//! - **Dispatch loop**: Feeds actions produced by effects back into the
//!   reducer before `send` returns, so every event runs to completion
//! - **Action broadcast**: Lets observers (renderers) react to every processed
//!   action
//!
//! ## Example
//!
//! ```ignore
//! use todos_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use tokio::sync::RwLock;

/// Metrics for observability
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// A chain of dispatched actions exceeded the configured limit
        ///
        /// The actions reduced before the limit was hit stay applied.
        #[error("Dispatch chain exceeded {0} actions")]
        DispatchDepthExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todos_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_max_dispatch_depth(8);
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of processed actions buffered for slow observers
    pub broadcast_capacity: usize,
    /// Maximum number of actions reduced for one `send`, the initial action included
    pub max_dispatch_depth: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, max_dispatch_depth: usize) -> Self {
        Self {
            broadcast_capacity,
            max_dispatch_depth,
        }
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the maximum dispatch depth
    #[must_use]
    pub const fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
        self.max_dispatch_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            max_dispatch_depth: 32,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, RwLock, StoreConfig, StoreError};
    use crate::metrics::StoreMetrics;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use todos_core::{effect::Effect, reducer::Reducer};
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` so readers never observe a half-applied send)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (dispatched actions are reduced in FIFO order)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        /// Every action reduced by the store, dispatched follow-ups included.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Clone + std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        ///
        /// A zero broadcast capacity is raised to one, the minimum the
        /// channel accepts.
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                action_broadcast,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Send an action to the store
        ///
        /// Reduces the action, then reduces every action its effects
        /// dispatch (and theirs, breadth first) before releasing the state
        /// lock. Observers see all processed actions after the lock is
        /// released.
        ///
        /// # Returns
        ///
        /// The number of actions reduced, the initial one included.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`]: `shutdown()` was called
        /// - [`StoreError::DispatchDepthExceeded`]: the dispatch chain grew past
        ///   `max_dispatch_depth`
        pub async fn send(&self, action: A) -> Result<usize, StoreError> {
            self.process(action, |_| ()).await.map(|(count, ())| count)
        }

        /// Send an action and read the settled state before any other send
        ///
        /// `read` runs under the same write lock that reduced the action and
        /// its dispatched follow-ups, so it observes exactly their outcome.
        ///
        /// ```ignore
        /// let error = store.send_and_read(Action::Add(title), |s| s.last_error.clone()).await?;
        /// ```
        ///
        /// # Errors
        ///
        /// Same as [`Store::send`]; `read` does not run on error.
        pub async fn send_and_read<F, T>(&self, action: A, read: F) -> Result<T, StoreError>
        where
            F: FnOnce(&S) -> T,
        {
            self.process(action, read).await.map(|(_, value)| value)
        }

        #[tracing::instrument(skip(self, action, read), name = "store_send")]
        async fn process<F, T>(&self, action: A, read: F) -> Result<(usize, T), StoreError>
        where
            F: FnOnce(&S) -> T,
        {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!(?action, "Rejected action: store is shutting down");
                StoreMetrics::record_rejected();
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!(?action, "Processing action");

            let (processed, outcome) = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let mut queue = VecDeque::from([action]);
                let mut processed = Vec::new();
                let mut exceeded = false;

                while let Some(action) = queue.pop_front() {
                    if processed.len() >= self.config.max_dispatch_depth {
                        exceeded = true;
                        break;
                    }

                    let start = std::time::Instant::now();
                    let effects =
                        self.reducer
                            .reduce(&mut *state, action.clone(), &self.environment);
                    StoreMetrics::record_action(start.elapsed());

                    let before = queue.len();
                    queue.extend(effects.into_iter().filter_map(Effect::into_dispatched));
                    let dispatched = queue.len() - before;
                    if dispatched > 0 {
                        tracing::trace!(count = dispatched, "Effects dispatched actions");
                        StoreMetrics::record_dispatched(dispatched);
                    }

                    processed.push(action);
                }

                let outcome = if exceeded {
                    tracing::error!(
                        limit = self.config.max_dispatch_depth,
                        "Dispatch chain too long, aborting send"
                    );
                    StoreMetrics::record_depth_exceeded();
                    Err(StoreError::DispatchDepthExceeded(
                        self.config.max_dispatch_depth,
                    ))
                } else {
                    Ok(read(&*state))
                };

                (processed, outcome)
            };

            // Applied actions are announced even when the chain was cut short
            let count = processed.len();
            for action in processed {
                // No subscribers is not an error
                let _ = self.action_broadcast.send(action);
            }
            tracing::debug!(actions = count, "Action processing completed");

            outcome.map(|value| (count, value))
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let count = store.state(|s| s.items.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to every action the store reduces
        ///
        /// Subscribers only see actions sent after subscribing. A subscriber
        /// that falls more than `broadcast_capacity` actions behind receives
        /// `RecvError::Lagged`.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Stop accepting actions
        ///
        /// Every `send` after this returns [`StoreError::ShutdownInProgress`].
        /// State stays readable.
        pub fn shutdown(&self) {
            tracing::info!("Store shutting down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Whether `shutdown()` has been called
        #[must_use]
        pub fn is_shut_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                config: self.config,
                shutdown: Arc::clone(&self.shutdown),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
