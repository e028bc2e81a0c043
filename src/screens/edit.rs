use crate::form::ListingDraft;
use crate::screens::form::ListingForm;
use crate::screens::loader::{FetchState, ListingLoader};
use crate::screens::ScreenContext;

/// What the edit screen shows right now
pub enum EditView<'a> {
    Loading,
    Error(String),
    Form(&'a mut ListingForm),
}

/// Edit screen: fetches the listing, then hosts the form in edit mode.
/// The form is only ever built from a successfully loaded listing.
pub struct EditListingScreen {
    ctx: ScreenContext,
    loader: ListingLoader,
    form: Option<ListingForm>,
}

impl EditListingScreen {
    pub fn mount(ctx: ScreenContext, id: impl Into<String>) -> Self {
        let loader = ListingLoader::mount(ctx.api.clone(), id);
        Self {
            ctx,
            loader,
            form: None,
        }
    }

    pub fn id(&self) -> &str {
        self.loader.id()
    }

    pub fn view(&mut self) -> EditView<'_> {
        if self.form.is_none() {
            match self.loader.state() {
                FetchState::Loading => return EditView::Loading,
                FetchState::Failed { message } => return EditView::Error(message),
                FetchState::Loaded(property) => {
                    // The route id is authoritative, whatever the body echoes.
                    let id = self.loader.id().to_string();
                    self.form = Some(ListingForm::edit(
                        self.ctx.clone(),
                        id,
                        ListingDraft::from(property),
                    ));
                }
            }
        }

        match self.form.as_mut() {
            Some(form) => EditView::Form(form),
            None => EditView::Loading,
        }
    }

    /// Wait for the fetch to finish, then render
    pub async fn settle(&mut self) -> EditView<'_> {
        self.loader.settled().await;
        self.view()
    }
}
