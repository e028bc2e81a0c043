pub mod client;
pub mod credentials;
pub mod error;
mod error_body;
pub mod traits;
pub mod types;

pub use client::{normalize_base_url, ListingsClient};
pub use credentials::{CredentialProvider, FileTokenStore, SecureString, StaticToken};
pub use error::ApiError;
pub use traits::ListingsApi;
pub use types::ImageFile;
