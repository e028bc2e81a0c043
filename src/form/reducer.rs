use crate::form::draft::ListingDraft;
use crate::form::intent::{Axis, BasicField, DraftIntent, FormIntent};
use crate::form::state::{FormPhase, FormState};
use crate::mvi::Reducer;

/// Apply one edit to the draft.
pub fn apply_edit(mut draft: ListingDraft, intent: DraftIntent) -> ListingDraft {
    match intent {
        DraftIntent::SetBasic(field) => match field {
            BasicField::Title(title) => draft.title = title,
            BasicField::Description(description) => draft.description = description,
            BasicField::Kind(kind) => draft.kind = kind,
            BasicField::Price(price) => draft.price = price,
        },
        DraftIntent::SetAddress(address) => draft.location.address = address,
        DraftIntent::SetCoordinate { axis, value } => {
            let coordinates = &mut draft.location.coordinates;
            match axis {
                Axis::Latitude => coordinates.latitude = value,
                Axis::Longitude => coordinates.longitude = value,
            }
        }
        DraftIntent::ToggleAmenity(amenity) => {
            draft.amenities.toggle(amenity);
        }
    }
    draft
}

pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormState;
    type Intent = FormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            // Inputs are disabled unless editing
            FormIntent::Edit(edit) => match state.phase {
                FormPhase::Editing => FormState {
                    draft: apply_edit(state.draft, edit),
                    ..state
                },
                _ => state,
            },
            FormIntent::SelectImages(files) => match state.phase {
                FormPhase::Editing => FormState {
                    selected_images: files,
                    ..state
                },
                _ => state,
            },
            FormIntent::SubmitStarted => match state.phase {
                FormPhase::Editing => FormState {
                    phase: FormPhase::Submitting,
                    ..state
                },
                _ => state,
            },
            FormIntent::SubmitSucceeded => match state.phase {
                FormPhase::Submitting => FormState {
                    phase: FormPhase::Submitted,
                    selected_images: Vec::new(),
                    ..state
                },
                _ => state,
            },
            FormIntent::SubmitFailed => match state.phase {
                FormPhase::Submitting => FormState {
                    phase: FormPhase::Editing,
                    ..state
                },
                _ => state,
            },
        }
    }
}
