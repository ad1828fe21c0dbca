//! In-process stub of the Bookaro backend for integration tests.
//!
//! Serves the same envelope shapes as the real API and records what each
//! request carried (authorization header, query string, body) so tests can
//! assert on the wire contract.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

/// The only token the stub accepts on bearer endpoints.
pub const VALID_TOKEN: &str = "jwt-valid";

#[derive(Default)]
pub struct Recorded {
    pub hits: usize,
    pub auth_headers: Vec<Option<String>>,
    pub last_query: Option<String>,
    pub last_path: Option<String>,
    pub last_body: Option<Value>,
}

pub type Shared = Arc<Mutex<Recorded>>;

/// Start the stub on an ephemeral port; returns the base URL and recorder.
pub async fn spawn_backend() -> (String, Shared) {
    let recorded: Shared = Arc::default();

    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/favorites", get(empty_list))
        .route("/api/v1/favorites/{id}/check", get(check_favorite))
        .route("/api/v1/bookings", get(empty_list))
        .route("/api/v1/bookings/{id}/status", put(update_booking_status))
        .route("/api/v1/services", get(search_services))
        .route("/api/v1/services/{id}/vendor", get(get_service_vendor))
        .route("/api/v1/services/cities", get(list_cities))
        .route("/api/v1/addresses/{id}", delete(delete_address))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub serve");
    });

    (format!("http://{}/api/v1", addr), recorded)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

fn record(state: &Shared, headers: &HeaderMap, query: Option<String>) {
    let mut guard = state.lock().expect("recorder lock");
    guard.hits += 1;
    guard.auth_headers.push(bearer(headers));
    guard.last_query = query;
}

fn auth_envelope(token: &str, id: i64, email: &str) -> Value {
    json!({
        "success": true,
        "message": "ok",
        "data": {
            "token": token,
            "id": id,
            "email": email,
            "firstName": "Dana",
            "lastName": "Reyes",
            "role": "USER"
        }
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "message": "Invalid or expired token",
            "errors": null
        })),
    )
        .into_response()
}

async fn login(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    record(&state, &headers, None);
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();

    // Logs in fine, but the issued token is not accepted on bearer
    // endpoints - simulates a credential that expired after login.
    if email == "stale@example.com" {
        return (StatusCode::OK, Json(auth_envelope("jwt-stale", 7, &email))).into_response();
    }

    // Used by the concurrency test: slow to answer, distinct token.
    if email == "slow@example.com" {
        tokio::time::sleep(Duration::from_millis(300)).await;
        return (StatusCode::OK, Json(auth_envelope("tok-slow", 8, &email))).into_response();
    }

    if password == "hunter2" {
        (StatusCode::OK, Json(auth_envelope(VALID_TOKEN, 7, &email))).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "message": "Invalid email or password",
                "errors": null
            })),
        )
            .into_response()
    }
}

async fn register(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &headers, None);
    let email = body["email"].as_str().unwrap_or_default().to_string();

    match email.as_str() {
        "taken@example.com" => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Validation failed",
                "errors": ["Email already taken", "Password too short"]
            })),
        )
            .into_response(),
        // The real backend answers 201 with success=false for duplicates.
        "exists@example.com" => (
            StatusCode::CREATED,
            Json(json!({
                "success": false,
                "message": "Email already exists",
                "data": null
            })),
        )
            .into_response(),
        _ => (StatusCode::CREATED, Json(auth_envelope(VALID_TOKEN, 9, &email))).into_response(),
    }
}

async fn empty_list(State(state): State<Shared>, RawQuery(query): RawQuery, headers: HeaderMap) -> Response {
    let token = bearer(&headers);
    record(&state, &headers, query);
    if token.as_deref() != Some(&format!("Bearer {}", VALID_TOKEN)) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "ok", "data": []})),
    )
        .into_response()
}

async fn check_favorite(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    record(&state, &headers, None);
    state.lock().expect("recorder lock").last_path = Some(format!("/favorites/{}/check", id));
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "ok", "data": {"isFavorite": true}})),
    )
        .into_response()
}

async fn update_booking_status(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &headers, None);
    {
        let mut guard = state.lock().expect("recorder lock");
        guard.last_path = Some(format!("/bookings/{}/status", id));
        guard.last_body = Some(body.clone());
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Booking status updated",
            "data": {
                "id": id,
                "serviceId": 3,
                "serviceName": "Deep House Cleaning",
                "bookingDate": "2026-09-12",
                "bookingTime": "14:30:00",
                "status": body["status"],
                "totalAmount": 120.0
            }
        })),
    )
        .into_response()
}

async fn search_services(
    State(state): State<Shared>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    record(&state, &headers, query);
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "ok",
            "data": {
                "content": [],
                "totalPages": 0,
                "totalElements": 0,
                "currentPage": 0,
                "size": 20
            }
        })),
    )
        .into_response()
}

async fn get_service_vendor(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    record(&state, &headers, None);
    state.lock().expect("recorder lock").last_path = Some(format!("/services/{}/vendor", id));
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "ok",
            "data": {
                "id": 9,
                "vendorCode": "V-009",
                "businessName": "Sparkle Co",
                "primaryCategory": "Cleaning",
                "phone": null,
                "email": "hi@sparkle.example",
                "location": "Austin",
                "availability": "Weekdays",
                "yearsOfExperience": 6,
                "averageRating": 4.5,
                "totalReviews": 87,
                "isVerified": true
            }
        })),
    )
        .into_response()
}

async fn list_cities(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, &headers, None);
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "ok", "data": ["Austin", "Dallas"]})),
    )
        .into_response()
}

async fn delete_address(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    record(&state, &headers, None);
    state.lock().expect("recorder lock").last_path = Some(format!("/addresses/{}", id));
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "Address deleted successfully", "data": null})),
    )
        .into_response()
}
