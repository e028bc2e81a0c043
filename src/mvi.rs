//! Model-View-Intent primitives for the screens.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Reducers are the only place state transitions happen; network calls
//! live in the screen that owns the state and report back as intents.

/// Marker trait for user actions and request outcomes.
pub trait Intent: Send + 'static {}

/// Marker trait for screen state: self-contained, cloneable, comparable.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Pure state transition: (State, Intent) -> State
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
