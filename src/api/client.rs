use crate::api::credentials::CredentialProvider;
use crate::api::error::ApiError;
use crate::api::error_body::extract_message;
use crate::api::traits::ListingsApi;
use crate::api::types::{ImageFile, PROPERTIES_PATH, UPLOADS_PATH, UPLOAD_FIELD};
use crate::config::ApiConfig;
use crate::form::ListingDraft;
use crate::models::{Envelope, Property};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("listing-desk/", env!("CARGO_PKG_VERSION"));

/// HTTP implementation of [`ListingsApi`]
pub struct ListingsClient {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl ListingsClient {
    /// Build a client for the configured backend.
    /// The credential provider is consulted on every request.
    pub fn new(config: &ApiConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url)?,
            credentials,
        })
    }

    /// Base URL joined with a backend path and, for single-listing routes,
    /// the listing id. The id is percent-encoded as one segment.
    fn endpoint(&self, path: &str, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?;
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self
            .credentials
            .bearer_token()?
            .ok_or(ApiError::MissingCredential)?;
        Ok(request.header(AUTHORIZATION, format!("Bearer {}", token.expose())))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorized(request)?.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!("Backend returned status: {}", status);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        // The status is the error; an unreadable body only loses the detail.
        let body = response.text().await.unwrap_or_default();

        Err(ApiError::Status {
            status: status.as_u16(),
            message: extract_message(content_type.as_deref(), &body),
        })
    }

    async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        debug!("Downloaded {} bytes", body.len());
        serde_json::from_str::<Envelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ListingsApi for ListingsClient {
    async fn fetch_listing(&self, id: &str) -> Result<Property, ApiError> {
        let url = self.endpoint(PROPERTIES_PATH, Some(id))?;
        debug!("Fetching URL: {}", url);

        let response = self.send(self.client.get(url)).await?;
        let property: Property = Self::read_data(response).await?;

        info!("Fetched property {} ({})", id, property.title);
        Ok(property)
    }

    async fn list_listings(&self) -> Result<Vec<Property>, ApiError> {
        let url = self.endpoint(PROPERTIES_PATH, None)?;
        debug!("Fetching URL: {}", url);

        let response = self.send(self.client.get(url)).await?;
        let properties: Vec<Property> = Self::read_data(response).await?;

        info!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    async fn create_listing(&self, draft: &ListingDraft) -> Result<(), ApiError> {
        let url = self.endpoint(PROPERTIES_PATH, None)?;
        debug!("POST {}", url);

        self.send(self.client.post(url).json(draft)).await?;

        info!("Created property '{}'", draft.title);
        Ok(())
    }

    async fn update_listing(&self, id: &str, draft: &ListingDraft) -> Result<(), ApiError> {
        let url = self.endpoint(PROPERTIES_PATH, Some(id))?;
        debug!("PUT {}", url);

        self.send(self.client.put(url).json(draft)).await?;

        info!("Updated property {}", id);
        Ok(())
    }

    async fn upload_images(&self, files: &[ImageFile]) -> Result<Vec<String>, ApiError> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint(UPLOADS_PATH, None)?;
        debug!("Uploading {} images to {}", files.len(), url);

        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)?;
            form = form.part(UPLOAD_FIELD, part);
        }

        let response = self.send(self.client.post(url).multipart(form)).await?;
        let references: Vec<String> = Self::read_data(response).await?;

        if references.len() != files.len() {
            warn!(
                "Uploaded {} images but backend returned {} references",
                files.len(),
                references.len()
            );
        }
        info!("Uploaded {} images", references.len());
        Ok(references)
    }
}

/// Parse the configured base URL, dropping trailing slashes
pub fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
