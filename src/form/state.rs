//! State for the listing form.

use crate::api::ImageFile;
use crate::form::draft::ListingDraft;
use crate::mvi::UiState;

/// Whether submit creates a new listing or replaces an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit { id: String },
}

/// Submission lifecycle: Editing → Submitting → Submitted, or back to
/// Editing on failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub draft: ListingDraft,
    /// Files picked but not yet uploaded
    pub selected_images: Vec<ImageFile>,
    pub phase: FormPhase,
}

impl UiState for FormState {}

impl FormState {
    pub fn new(mode: FormMode, draft: ListingDraft) -> Self {
        Self {
            mode,
            draft,
            selected_images: Vec::new(),
            phase: FormPhase::Editing,
        }
    }
}
