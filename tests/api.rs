use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use flashcard_srs::config::AppConfig;
use flashcard_srs::handlers::review::{DueResponse, PreviewResponse, ReplayResponse, ReviewResponse};
use flashcard_srs::state::AppState;

fn server_time() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

fn server() -> TestServer {
  let state = AppState::with_clock(AppConfig::default(), Arc::new(server_time));
  TestServer::new(flashcard_srs::app(state)).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
  let response = server().get("/health").await;
  response.assert_status_ok();
  assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn review_fresh_card_good() {
  let response = server()
    .post("/api/review")
    .json(&json!({
      "state": { "repetition_number": 0, "easiness_factor": 2.5, "interval_days": 0 },
      "rating": "good",
      "now": "2024-01-01T00:00:00Z"
    }))
    .await;

  response.assert_status_ok();
  let body: ReviewResponse = response.json();
  assert_eq!(body.state.repetition_number, 1);
  assert_eq!(body.state.interval_days, 1);
  assert!((body.state.easiness_factor - 2.5).abs() < 1e-9);
  assert_eq!(
    body.state.next_review_date,
    Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
  );
}

#[tokio::test]
async fn review_without_now_uses_server_clock() {
  let response = server()
    .post("/api/review")
    .json(&json!({
      "state": { "repetition_number": 1, "easiness_factor": 2.5, "interval_days": 1 },
      "rating": "hard"
    }))
    .await;

  response.assert_status_ok();
  let body: ReviewResponse = response.json();
  assert_eq!(body.state.interval_days, 6);
  assert_eq!(body.state.next_review_date, server_time() + Duration::days(6));
}

#[tokio::test]
async fn review_again_resets_mature_card() {
  let response = server()
    .post("/api/review")
    .json(&json!({
      "state": { "repetition_number": 5, "easiness_factor": 2.0, "interval_days": 20 },
      "rating": "again"
    }))
    .await;

  response.assert_status_ok();
  let body: ReviewResponse = response.json();
  assert_eq!(body.state.repetition_number, 0);
  assert_eq!(body.state.interval_days, 1);
  assert!(body.state.easiness_factor >= 1.3);
  assert_eq!(body.state.next_review_date, server_time() + Duration::days(1));
}

#[tokio::test]
async fn review_rejects_unknown_rating() {
  let response = server()
    .post("/api/review")
    .json(&json!({
      "state": { "repetition_number": 0, "easiness_factor": 2.5, "interval_days": 0 },
      "rating": "Good"
    }))
    .expect_failure()
    .await;

  response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
  let body: Value = response.json();
  assert!(body["error"].as_str().unwrap().contains("'Good'"));
}

#[tokio::test]
async fn review_rejects_negative_interval() {
  let response = server()
    .post("/api/review")
    .json(&json!({
      "state": { "repetition_number": 2, "easiness_factor": 2.5, "interval_days": -4 },
      "rating": "good"
    }))
    .expect_failure()
    .await;

  response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
  let body: Value = response.json();
  assert_eq!(
    body["error"],
    "Invalid card state: interval_days must be >= 0, got -4"
  );
}

#[tokio::test]
async fn preview_lists_every_rating() {
  let response = server()
    .post("/api/preview")
    .json(&json!({
      "state": { "repetition_number": 2, "easiness_factor": 2.5, "interval_days": 6 }
    }))
    .await;

  response.assert_status_ok();
  let body: PreviewResponse = response.json();
  assert_eq!(body.again.state.interval_days, 1);
  assert_eq!(body.again.label, "1 day");
  assert_eq!(body.hard.state.interval_days, 14);
  assert_eq!(body.good.state.interval_days, 15);
  assert_eq!(body.good.label, "15 days");
  assert_eq!(body.easy.state.interval_days, 16);
}

#[tokio::test]
async fn replay_rebuilds_state() {
  let response = server()
    .post("/api/replay")
    .json(&json!({
      "ratings": ["good", "good", "good"],
      "start": "2024-01-01T00:00:00Z"
    }))
    .await;

  response.assert_status_ok();
  let body: ReplayResponse = response.json();
  assert_eq!(body.reviews, 3);
  assert_eq!(body.state.repetition_number, 3);
  assert_eq!(body.state.interval_days, 15);
  // reviewed on Jan 1, Jan 2 and Jan 8, then due 15 days later
  assert_eq!(
    body.state.next_review_date,
    Utc.with_ymd_and_hms(2024, 1, 23, 0, 0, 0).unwrap()
  );
}

#[tokio::test]
async fn replay_rejects_unknown_rating_anywhere() {
  let response = server()
    .post("/api/replay")
    .json(&json!({
      "ratings": ["good", "perfect"],
      "start": "2024-01-01T00:00:00Z"
    }))
    .expect_failure()
    .await;

  response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn due_orders_and_limits() {
  let state = json!({ "repetition_number": 2, "easiness_factor": 2.5, "interval_days": 6 });
  let hard_state = json!({ "repetition_number": 2, "easiness_factor": 1.4, "interval_days": 6 });

  let response = server()
    .post("/api/due")
    .json(&json!({
      "cards": [
        { "card_id": 1, "state": state, "next_review_date": "2023-12-31T09:00:00Z" },
        { "card_id": 2, "state": state, "next_review_date": "2024-01-05T00:00:00Z" },
        { "card_id": 3, "state": state, "next_review_date": "2023-12-20T00:00:00Z" },
        { "card_id": 4, "state": hard_state, "next_review_date": "2023-12-31T09:00:00Z" }
      ],
      "limit": 2
    }))
    .await;

  response.assert_status_ok();
  let body: DueResponse = response.json();
  assert_eq!(body.total_due, 3);
  assert_eq!(body.card_ids, vec![3, 4]);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
  let response = server()
    .post("/api/review")
    .json(&json!({ "rating": "good" }))
    .expect_failure()
    .await;

  assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn due_limit_is_capped() {
  let cards: Vec<Value> = (0..600)
    .map(|id| {
      json!({
        "card_id": id,
        "state": { "repetition_number": 1, "easiness_factor": 2.5, "interval_days": 1 },
        "next_review_date": "2023-12-31T00:00:00Z"
      })
    })
    .collect();

  let response = server()
    .post("/api/due")
    .json(&json!({ "cards": cards, "limit": 10000 }))
    .await;

  response.assert_status_ok();
  let body: DueResponse = response.json();
  assert_eq!(body.total_due, 600);
  assert_eq!(body.card_ids.len(), 500);
  // equal keys keep input order
  assert_eq!(body.card_ids[0], 0);
  assert_eq!(body.card_ids[499], 499);
}

#[tokio::test]
async fn due_defaults_to_fifty_cards() {
  let cards: Vec<Value> = (0..80)
    .map(|id| {
      json!({
        "card_id": id,
        "state": { "repetition_number": 1, "easiness_factor": 2.5, "interval_days": 1 },
        "next_review_date": "2023-12-31T00:00:00Z"
      })
    })
    .collect();

  let response = server().post("/api/due").json(&json!({ "cards": cards })).await;

  response.assert_status_ok();
  let body: DueResponse = response.json();
  assert_eq!(body.total_due, 80);
  assert_eq!(body.card_ids.len(), 50);
}

#[tokio::test]
async fn preview_rejects_invalid_state() {
  let response = server()
    .post("/api/preview")
    .json(&json!({
      "state": { "repetition_number": -1, "easiness_factor": 2.5, "interval_days": 0 }
    }))
    .expect_failure()
    .await;

  response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
  let body: Value = response.json();
  assert_eq!(
    body["error"],
    "Invalid card state: repetition_number must be >= 0, got -1"
  );
}

#[tokio::test]
async fn due_rejects_invalid_card_state() {
  let response = server()
    .post("/api/due")
    .json(&json!({
      "cards": [
        {
          "card_id": 1,
          "state": { "repetition_number": 1, "easiness_factor": 2.5, "interval_days": 1 },
          "next_review_date": "2023-12-31T00:00:00Z"
        },
        {
          "card_id": 2,
          "state": { "repetition_number": 4294967296i64, "easiness_factor": 2.5, "interval_days": 1 },
          "next_review_date": "2023-12-31T00:00:00Z"
        }
      ]
    }))
    .expect_failure()
    .await;

  response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
  let body: Value = response.json();
  assert_eq!(
    body["error"],
    "Invalid card state: repetition_number out of range: 4294967296"
  );
}
