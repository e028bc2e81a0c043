//! Listing form session: owns the draft, submits it, reports the outcome.

use crate::api::{ApiError, ImageFile, ListingsApi};
use crate::form::{DraftIntent, FormIntent, FormMode, FormPhase, FormReducer, FormState, ListingDraft};
use crate::mvi::Reducer;
use crate::screens::navigate::Route;
use crate::screens::notify::Toast;
use crate::screens::ScreenContext;
use thiserror::Error;
use tracing::{debug, info, warn};
use validator::{Validate, ValidationErrors};

pub const CREATE_FALLBACK: &str = "Failed to create property";
pub const UPDATE_FALLBACK: &str = "Failed to update property";

#[derive(Debug, Error)]
pub enum FormError {
    /// Required/min constraints failed; nothing was sent
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("This listing has already been saved")]
    AlreadySubmitted,

    /// Backend rejected or never received the write; the draft is intact
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },
}

pub struct ListingForm {
    ctx: ScreenContext,
    state: FormState,
}

impl ListingForm {
    /// Empty draft that will be POSTed on submit
    pub fn create(ctx: ScreenContext) -> Self {
        Self::with_state(ctx, FormState::new(FormMode::Create, ListingDraft::default()))
    }

    /// Pre-populated draft that will be PUT back to `id` on submit
    pub fn edit(ctx: ScreenContext, id: impl Into<String>, draft: ListingDraft) -> Self {
        Self::with_state(ctx, FormState::new(FormMode::Edit { id: id.into() }, draft))
    }

    fn with_state(ctx: ScreenContext, state: FormState) -> Self {
        Self { ctx, state }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.state.draft
    }

    pub fn mode(&self) -> &FormMode {
        &self.state.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.state.phase
    }

    pub fn dispatch(&mut self, intent: FormIntent) {
        apply(&mut self.state, intent);
    }

    pub fn edit_field(&mut self, intent: DraftIntent) {
        self.dispatch(FormIntent::Edit(intent));
    }

    pub fn select_images(&mut self, files: Vec<ImageFile>) {
        self.dispatch(FormIntent::SelectImages(files));
    }

    /// Leave without saving
    pub fn cancel(&self) {
        debug!("Form cancelled");
        self.ctx.navigator.navigate(Route::Listings);
    }

    /// Validate, upload any selected images, then create or update.
    ///
    /// On success a toast is shown and the user is sent to the listing
    /// index. On failure an error toast is shown and the form goes back to
    /// editing with the draft exactly as it was. Dropping the returned
    /// future mid-request also puts the form back to editing.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        match self.state.phase {
            FormPhase::Editing => {}
            FormPhase::Submitting => return Err(FormError::AlreadySubmitting),
            FormPhase::Submitted => return Err(FormError::AlreadySubmitted),
        }

        self.state.draft.validate()?;

        let fallback = match self.state.mode {
            FormMode::Create => CREATE_FALLBACK,
            FormMode::Edit { .. } => UPDATE_FALLBACK,
        };

        let in_flight = InFlight::start(&mut self.state);
        let result = write(self.ctx.api.as_ref(), in_flight.state()).await;

        match result {
            Ok(()) => {
                in_flight.settle(FormIntent::SubmitSucceeded);
                let message = match self.state.mode {
                    FormMode::Create => "Property created successfully",
                    FormMode::Edit { .. } => "Property updated successfully",
                };
                info!("✅ {}", message);
                self.ctx.notifier.notify(Toast::success(message));
                self.ctx.navigator.navigate(Route::Listings);
                Ok(())
            }
            Err(err) => {
                in_flight.settle(FormIntent::SubmitFailed);
                let message = err.user_message(fallback);
                warn!("Submit failed: {}", err);
                self.ctx.notifier.notify(Toast::error(message.clone()));
                Err(FormError::Api {
                    message,
                    source: err,
                })
            }
        }
    }
}

fn apply(state: &mut FormState, intent: FormIntent) {
    let current = std::mem::take(state);
    *state = FormReducer::reduce(current, intent);
}

/// Holds the form in `Submitting` for the length of one request.
///
/// Must be settled with the outcome. If it is dropped unsettled the
/// submit was abandoned and the form returns to editing.
struct InFlight<'a> {
    state: &'a mut FormState,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a mut FormState) -> Self {
        apply(state, FormIntent::SubmitStarted);
        Self {
            state,
            settled: false,
        }
    }

    fn state(&self) -> &FormState {
        &*self.state
    }

    fn settle(mut self, outcome: FormIntent) {
        apply(&mut *self.state, outcome);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Submit abandoned before the backend answered");
            apply(&mut *self.state, FormIntent::SubmitFailed);
        }
    }
}

/// Body sent is a copy of the draft; the draft itself is left alone.
async fn write(api: &dyn ListingsApi, state: &FormState) -> Result<(), ApiError> {
    let mut body = state.draft.clone();

    if !state.selected_images.is_empty() {
        let references = api.upload_images(&state.selected_images).await?;
        body.images.extend(references);
    }

    match &state.mode {
        FormMode::Create => api.create_listing(&body).await,
        FormMode::Edit { id } => api.update_listing(id, &body).await,
    }
}
