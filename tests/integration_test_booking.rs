mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};

fn booking(slot_id: i64, quantity: i64, total: f64, promo: Option<&str>) -> Value {
    let mut body = json!({
        "slotId": slot_id,
        "quantity": quantity,
        "user": { "name": "Alice", "email": "alice@example.com" },
        "total": total,
    });
    if let Some(code) = promo {
        body["promoCode"] = json!(code);
    }
    body
}

async fn setup(app: &TestApp, capacity: i32, booked: i32) -> i64 {
    app.add_experience("kayak", "Kayaking", "Udupi", 250).await;
    app.add_slot("kayak", 3, capacity, booked).await.id
}

async fn booking_count(app: &TestApp, slot_id: i64) -> usize {
    app.state.booking_repo.list_by_slot(slot_id).await.unwrap().len()
}

#[tokio::test]
async fn test_create_booking_returns_reference() {
    let app = TestApp::new().await;
    let slot_id = setup(&app, 5, 0).await;

    let res = app.post_json("/api/bookings", &booking(slot_id, 2, 559.0, None)).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["message"], "Booking confirmed successfully");
    assert_eq!(body["data"]["totalAmount"], 559.0);

    let ref_id = body["data"]["refId"].as_str().unwrap();
    assert!(ref_id.starts_with("HUF"));
    assert_eq!(ref_id.len(), 11);

    assert_eq!(app.slot(slot_id).await.booked_count, 2);

    let res = app.get(&format!("/api/bookings/{}", ref_id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["refId"], ref_id);
    assert_eq!(body["data"]["slotId"], slot_id);
    assert_eq!(body["data"]["quantity"], 2);
    assert_eq!(body["data"]["userName"], "Alice");
    assert_eq!(body["data"]["userEmail"], "alice@example.com");
}

#[tokio::test]
async fn test_unknown_reference_is_404() {
    let app = TestApp::new().await;
    let res = app.get("/api/bookings/HUFNOTREAL").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_server_recomputes_total() {
    let app = TestApp::new().await;
    let slot_id = setup(&app, 5, 0).await;

    // Client claims 1.00; the charge is price * qty + taxes.
    let res = app.post_json("/api/bookings", &booking(slot_id, 2, 1.0, None)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(parse_body(res).await["data"]["totalAmount"], 559.0);
}

#[tokio::test]
async fn test_promo_applied_at_booking() {
    let app = TestApp::new().await;
    let slot_id = setup(&app, 5, 0).await;
    app.add_promo("SAVE10", "percentage", 10, true).await;

    let res = app.post_json("/api/bookings", &booking(slot_id, 2, 509.0, Some("save10"))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["totalAmount"], 509.0);

    let ref_id = body["data"]["refId"].as_str().unwrap();
    let stored = app.state.booking_repo.find_by_ref(ref_id).await.unwrap().unwrap();
    assert_eq!(stored.promo_code.as_deref(), Some("SAVE10"));
}

#[tokio::test]
async fn test_invalid_requests_are_400() {
    let app = TestApp::new().await;
    let slot_id = setup(&app, 5, 0).await;

    let res = app.post_json("/api/bookings", &json!({ "slotId": slot_id, "quantity": 1 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["message"], "Missing required fields");

    let res = app.post_json("/api/bookings", &json!({
        "slotId": slot_id, "quantity": 1, "user": { "name": "Alice" }, "total": 309
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post_json("/api/bookings", &booking(slot_id, 0, 59.0, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post_json("/api/bookings", &booking(slot_id, -1, 59.0, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post_json("/api/bookings", &booking(slot_id, 1, -5.0, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post_raw("/api/bookings", "{ not json".to_string()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["success"], false);

    assert_eq!(app.slot(slot_id).await.booked_count, 0);
    assert_eq!(booking_count(&app, slot_id).await, 0);
}

#[tokio::test]
async fn test_unknown_slot_is_404() {
    let app = TestApp::new().await;
    let res = app.post_json("/api/bookings", &booking(4242, 1, 309.0, None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(res).await["message"], "Slot not found");
}

#[tokio::test]
async fn test_capacity_exceeded_reports_available() {
    let app = TestApp::new().await;
    let slot_id = setup(&app, 5, 3).await;

    let res = app.post_json("/api/bookings", &booking(slot_id, 3, 809.0, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["available"], 2);
    assert_eq!(body["message"], "Only 2 slots available. Please reduce quantity.");

    assert_eq!(app.slot(slot_id).await.booked_count, 3);
    assert_eq!(booking_count(&app, slot_id).await, 0);
}

#[tokio::test]
async fn test_exact_fit_then_sold_out() {
    let app = TestApp::new().await;
    let slot_id = setup(&app, 5, 2).await;

    let res = app.post_json("/api/bookings", &booking(slot_id, 3, 809.0, None)).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.post_json("/api/bookings", &booking(slot_id, 1, 309.0, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["available"], 0);

    let slot = app.slot(slot_id).await;
    assert_eq!(slot.booked_count, 5);
    assert!(slot.is_sold_out());

    let detail = parse_body(app.get("/api/experiences/kayak").await).await;
    assert_eq!(detail["data"]["slots"][0]["soldOut"], true);
}

#[tokio::test]
async fn test_rejected_promo_leaves_no_side_effects() {
    let app = TestApp::new().await;
    let slot_id = setup(&app, 5, 1).await;
    app.add_promo("EXPIRED", "flat", 50, false).await;
    let before = app.slot(slot_id).await;

    let res = app.post_json("/api/bookings", &booking(slot_id, 2, 509.0, Some("EXPIRED"))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["message"], "This promo code has expired");

    let res = app.post_json("/api/bookings", &booking(slot_id, 2, 509.0, Some("UNKNOWN"))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.slot(slot_id).await, before);
    assert_eq!(booking_count(&app, slot_id).await, 0);
}

#[tokio::test]
async fn test_total_over_chargeable_limit_is_rejected() {
    let app = TestApp::new().await;
    app.add_experience("yacht", "Yacht Charter", "Goa", 50_000_000).await;
    let slot_id = app.add_slot("yacht", 3, 5, 0).await.id;

    let res = app.post_json("/api/bookings", &booking(slot_id, 2, 100_000_059.0, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["success"], false);

    let res = app.post_json("/api/checkout/quote", &json!({ "slotId": slot_id, "quantity": 2 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.slot(slot_id).await.booked_count, 0);
    assert_eq!(booking_count(&app, slot_id).await, 0);

    // One seat fits under the limit
    let res = app.post_json("/api/bookings", &booking(slot_id, 1, 50_000_059.0, None)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(parse_body(res).await["data"]["totalAmount"], 50_000_059.0);
}
