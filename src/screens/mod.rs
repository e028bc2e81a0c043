pub mod edit;
pub mod form;
pub mod loader;
pub mod navigate;
pub mod notify;

pub use edit::{EditListingScreen, EditView};
pub use form::{FormError, ListingForm};
pub use loader::{FetchState, ListingLoader};
pub use navigate::{History, Navigator, Route};
pub use notify::{Notifier, Toast, ToastLevel, ToastQueue};

use crate::api::ListingsApi;
use std::sync::Arc;

/// Collaborators every screen is handed explicitly
#[derive(Clone)]
pub struct ScreenContext {
    pub api: Arc<dyn ListingsApi>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl ScreenContext {
    pub fn new(
        api: Arc<dyn ListingsApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
        }
    }
}
