//! Fetch-and-display: one GET per mount, three renderable states.

use crate::api::ListingsApi;
use crate::models::Property;
use crate::mvi::{Intent, Reducer, UiState};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const FETCH_FALLBACK: &str = "Failed to fetch property";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Loading,
    Failed {
        message: String,
    },
    Loaded(Property),
}

impl UiState for FetchState {}

impl FetchState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, FetchState::Loading)
    }
}

#[derive(Debug, Clone)]
pub enum FetchIntent {
    Resolved(Property),
    Rejected { message: String },
}

impl Intent for FetchIntent {}

pub struct FetchReducer;

impl Reducer for FetchReducer {
    type State = FetchState;
    type Intent = FetchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        // Only the first outcome counts
        match state {
            FetchState::Loading => match intent {
                FetchIntent::Resolved(property) => FetchState::Loaded(property),
                FetchIntent::Rejected { message } => FetchState::Failed { message },
            },
            settled => settled,
        }
    }
}

/// Owns the in-flight fetch for one mounted screen.
///
/// Dropping the loader aborts the request, so a response that arrives after
/// unmount never touches state.
pub struct ListingLoader {
    id: String,
    state: watch::Receiver<FetchState>,
    task: JoinHandle<()>,
}

impl ListingLoader {
    /// Start fetching `id`. Must be called inside a tokio runtime.
    pub fn mount(api: Arc<dyn ListingsApi>, id: impl Into<String>) -> Self {
        let id = id.into();
        let (tx, rx) = watch::channel(FetchState::Loading);

        let task_id = id.clone();
        let task = tokio::spawn(async move {
            let intent = match api.fetch_listing(&task_id).await {
                Ok(property) => FetchIntent::Resolved(property),
                Err(err) => {
                    warn!("Failed to fetch property {}: {}", task_id, err);
                    FetchIntent::Rejected {
                        message: err.user_message(FETCH_FALLBACK),
                    }
                }
            };
            tx.send_modify(|state| {
                *state = FetchReducer::reduce(std::mem::take(state), intent);
            });
        });

        info!("Loading property {}", id);
        Self { id, state: rx, task }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current state without waiting
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Wait until the fetch has either loaded or failed
    pub async fn settled(&mut self) -> FetchState {
        match self.state.wait_for(FetchState::is_settled).await {
            Ok(state) => state.clone(),
            // The task ended without reporting, which only happens if it panicked.
            Err(_) => FetchState::Failed {
                message: format!("{}: loading was interrupted", FETCH_FALLBACK),
            },
        }
    }
}

impl Drop for ListingLoader {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("Unmounted before property {} loaded; cancelling fetch", self.id);
            self.task.abort();
        }
    }
}
