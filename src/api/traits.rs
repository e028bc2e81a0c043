use crate::api::error::ApiError;
use crate::api::types::ImageFile;
use crate::form::ListingDraft;
use crate::models::Property;
use async_trait::async_trait;

/// Backend operations the screens depend on.
/// `ListingsClient` talks HTTP; tests swap in in-memory fakes.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    /// Fetch a single listing by id
    async fn fetch_listing(&self, id: &str) -> Result<Property, ApiError>;

    /// Fetch the listing index
    async fn list_listings(&self) -> Result<Vec<Property>, ApiError>;

    /// Persist a new listing
    async fn create_listing(&self, draft: &ListingDraft) -> Result<(), ApiError>;

    /// Replace an existing listing
    async fn update_listing(&self, id: &str, draft: &ListingDraft) -> Result<(), ApiError>;

    /// Upload image files, returning one stored reference per file
    async fn upload_images(&self, files: &[ImageFile]) -> Result<Vec<String>, ApiError>;
}
