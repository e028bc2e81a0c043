//! Listing draft and the pure state machine around it.

mod draft;
pub mod intent;
pub mod reducer;
pub mod state;

pub use draft::ListingDraft;
pub use intent::{AssignmentError, Axis, BasicField, DraftIntent, FormIntent};
pub use reducer::{apply_edit, FormReducer};
pub use state::{FormMode, FormPhase, FormState};
