use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub booking_id: Option<i64>,
    pub service_id: Option<i64>,
    pub service_name: Option<String>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Review submission. Ratings run 1-5; the backend validates the range and
/// rejects reviews for bookings that are not completed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub booking_id: i64,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
