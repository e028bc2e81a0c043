//! Submission behaviour of the listing form.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::*;
use listing_desk::api::ImageFile;
use listing_desk::form::{BasicField, DraftIntent, FormIntent, FormMode, FormPhase, ListingDraft};
use listing_desk::models::Amenity;
use listing_desk::screens::{FormError, ListingForm, Route, ToastLevel};
use std::time::Duration;

fn fill(form: &mut ListingForm, draft: &ListingDraft) {
    let d = draft.clone();
    form.edit_field(DraftIntent::SetBasic(BasicField::Title(d.title)));
    form.edit_field(DraftIntent::SetBasic(BasicField::Description(d.description)));
    form.edit_field(DraftIntent::SetBasic(BasicField::Kind(d.kind)));
    form.edit_field(DraftIntent::SetBasic(BasicField::Price(d.price)));
    form.edit_field(DraftIntent::SetAddress(d.location.address));
    form.edit_field(DraftIntent::SetCoordinate {
        axis: listing_desk::form::Axis::Latitude,
        value: d.location.coordinates.latitude,
    });
    form.edit_field(DraftIntent::SetCoordinate {
        axis: listing_desk::form::Axis::Longitude,
        value: d.location.coordinates.longitude,
    });
    for amenity in d.amenities.iter() {
        form.edit_field(DraftIntent::ToggleAmenity(amenity));
    }
}

#[tokio::test]
async fn create_posts_once_and_redirects() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::data(sunny_loft()).with_status(201)).await;
    let h = harness(&mock);
    let expected = complete_draft();

    let mut form = ListingForm::create(h.ctx.clone());
    fill(&mut form, &expected);
    assert_eq!(form.draft(), &expected);

    form.submit().await.unwrap();

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/properties");
    let sent: ListingDraft = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, expected);

    assert_eq!(form.phase(), FormPhase::Submitted);
    assert_eq!(h.history.entries(), vec![Route::Listings]);
    let toasts = h.toasts.active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Success);
}

#[tokio::test]
async fn server_error_keeps_the_draft_and_allows_resubmit() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::empty(500)).await;
    mock.enqueue_response(MockResponse::empty(200)).await;
    let h = harness(&mock);

    let mut form = ListingForm::edit(h.ctx.clone(), "abc123", complete_draft());
    form.edit_field(DraftIntent::ToggleAmenity(Amenity::Wifi));
    let before = form.draft().clone();

    let err = form.submit().await.unwrap_err();

    assert!(matches!(err, FormError::Api { .. }));
    assert_eq!(form.draft(), &before);
    assert_eq!(form.phase(), FormPhase::Editing);
    assert!(h.history.entries().is_empty());
    let toasts = h.toasts.active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);
    assert_eq!(toasts[0].message, "Failed to update property (status 500)");

    form.submit().await.unwrap();

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.method == "PUT" && r.path == "/api/properties/abc123"));
    assert_eq!(requests[0].body, requests[1].body);
    assert_eq!(h.history.current(), Some(Route::Listings));
}

#[tokio::test]
async fn backend_message_is_used_in_the_error_toast() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::error(422, "Price looks wrong")).await;
    let h = harness(&mock);

    let mut form = ListingForm::edit(h.ctx.clone(), "abc123", complete_draft());
    let err = form.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "Price looks wrong");
    assert_eq!(h.toasts.active()[0].message, "Price looks wrong");
}

#[tokio::test]
async fn invalid_draft_is_not_sent() {
    let mock = MockBackend::start().await;
    let h = harness(&mock);

    let mut form = ListingForm::create(h.ctx.clone());
    form.edit_field(DraftIntent::SetBasic(BasicField::Title("Only a title".to_string())));

    let err = form.submit().await.unwrap_err();

    let FormError::Invalid(errors) = err else {
        panic!("expected validation error");
    };
    let fields = errors.field_errors();
    assert!(fields.contains_key("price"));
    assert!(fields.contains_key("description"));
    assert!(!fields.contains_key("title"));
    assert!(mock.captured_requests().await.is_empty());
    assert_eq!(form.phase(), FormPhase::Editing);
    assert!(h.toasts.active().is_empty());
}

#[tokio::test]
async fn submitted_form_cannot_be_sent_again() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::empty(201)).await;
    let h = harness(&mock);

    let mut form = ListingForm::edit(h.ctx.clone(), "abc123", complete_draft());
    form.submit().await.unwrap();

    assert!(matches!(form.submit().await, Err(FormError::AlreadySubmitted)));
    assert_eq!(mock.captured_requests().await.len(), 1);
}

#[tokio::test]
async fn in_flight_submission_blocks_another() {
    let mock = MockBackend::start().await;
    let h = harness(&mock);

    let mut form = ListingForm::edit(h.ctx.clone(), "abc123", complete_draft());
    form.dispatch(FormIntent::SubmitStarted);

    assert!(matches!(form.submit().await, Err(FormError::AlreadySubmitting)));
    assert!(mock.captured_requests().await.is_empty());
}

#[tokio::test]
async fn whitespace_only_text_is_still_sent() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::empty(201)).await;
    let h = harness(&mock);

    let mut form = ListingForm::create(h.ctx.clone());
    fill(&mut form, &complete_draft());
    form.edit_field(DraftIntent::SetBasic(BasicField::Title("   ".to_string())));

    form.submit().await.unwrap();

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    let sent: ListingDraft = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent.title, "   ");
}

#[tokio::test]
async fn abandoned_submit_returns_to_editing() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::empty(201).with_delay(500)).await;
    mock.enqueue_response(MockResponse::empty(201)).await;
    let h = harness(&mock);

    let mut form = ListingForm::create(h.ctx.clone());
    fill(&mut form, &complete_draft());

    let outcome = tokio::time::timeout(Duration::from_millis(50), form.submit()).await;
    assert!(outcome.is_err(), "submit should still be waiting on the backend");

    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.draft().title, "Harbour Garage");
    form.edit_field(DraftIntent::SetBasic(BasicField::Title("Harbour Garage 2".to_string())));
    assert_eq!(form.draft().title, "Harbour Garage 2");

    form.submit().await.unwrap();
    assert_eq!(form.phase(), FormPhase::Submitted);
    assert_eq!(h.history.current(), Some(Route::Listings));

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 2);
    let sent: ListingDraft = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(sent.title, "Harbour Garage 2");
}

#[tokio::test]
async fn selected_images_are_uploaded_before_the_write() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::data(serde_json::json!(["uploads/front.png"]))).await;
    mock.enqueue_response(MockResponse::empty(201)).await;
    let h = harness(&mock);

    let mut form = ListingForm::create(h.ctx.clone());
    fill(&mut form, &complete_draft());
    form.select_images(vec![ImageFile::new("front.png", "image/png", vec![1, 2, 3])]);
    form.submit().await.unwrap();

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/api/uploads");
    assert_eq!(requests[1].path, "/api/properties");
    let sent: ListingDraft = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(sent.images, vec!["uploads/front.png"]);
    assert!(form.state().selected_images.is_empty());
}

#[tokio::test]
async fn failed_upload_aborts_the_submit() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::error(413, "File too large")).await;
    let h = harness(&mock);

    let mut form = ListingForm::create(h.ctx.clone());
    fill(&mut form, &complete_draft());
    form.select_images(vec![ImageFile::new("huge.png", "image/png", vec![0; 64])]);
    let before = form.state().clone();

    let err = form.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "File too large");
    assert_eq!(form.state(), &before);
    assert_eq!(mock.captured_requests().await.len(), 1);
}

#[tokio::test]
async fn cancel_returns_to_the_index_without_requests() {
    let mock = MockBackend::start().await;
    let h = harness(&mock);

    let form = ListingForm::create(h.ctx.clone());
    assert_eq!(form.mode(), &FormMode::Create);
    form.cancel();

    assert_eq!(h.history.current(), Some(Route::Listings));
    assert!(mock.captured_requests().await.is_empty());
}
