//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use listing_desk::api::{CredentialProvider, ListingsClient, StaticToken};
use listing_desk::config::ApiConfig;
use listing_desk::form::ListingDraft;
use listing_desk::models::{Amenity, PropertyType};
use listing_desk::screens::{History, ScreenContext, ToastQueue};
use mock_backend::MockBackend;
use serde_json::{json, Value};
use std::sync::Arc;

pub const TOKEN: &str = "test-token";

pub fn client_with(mock: &MockBackend, credentials: Arc<dyn CredentialProvider>) -> ListingsClient {
    let config = ApiConfig {
        base_url: mock.base_url(),
        timeout_seconds: 5,
    };
    ListingsClient::new(&config, credentials).expect("client should build")
}

pub fn client(mock: &MockBackend) -> ListingsClient {
    client_with(mock, Arc::new(StaticToken::new(TOKEN)))
}

/// Screen context wired to the mock backend, plus handles to observe
/// toasts and navigation.
pub struct Harness {
    pub ctx: ScreenContext,
    pub toasts: Arc<ToastQueue>,
    pub history: Arc<History>,
}

pub fn harness(mock: &MockBackend) -> Harness {
    let toasts = Arc::new(ToastQueue::new());
    let history = Arc::new(History::new());
    let ctx = ScreenContext::new(Arc::new(client(mock)), toasts.clone(), history.clone());
    Harness {
        ctx,
        toasts,
        history,
    }
}

/// The listing used throughout the examples
pub fn sunny_loft() -> Value {
    json!({
        "_id": "abc123",
        "title": "Sunny Loft",
        "type": "apartment",
        "price": 1200,
        "location": {
            "address": "1 Main St",
            "coordinates": { "lat": 40.1, "lng": -74.2 }
        },
        "amenities": ["wifi", "gym"]
    })
}

/// A draft with every required field filled in
pub fn complete_draft() -> ListingDraft {
    let mut draft = ListingDraft::default();
    draft.title = "Harbour Garage".to_string();
    draft.description = "Covered spot near the ferry".to_string();
    draft.kind = PropertyType::Garage;
    draft.price = Some(150.0);
    draft.location.address = "4 Dock Rd".to_string();
    draft.location.coordinates.latitude = Some(51.5);
    draft.amenities.toggle(Amenity::Security);
    draft.amenities.toggle(Amenity::Parking);
    draft
}
