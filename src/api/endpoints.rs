//! Typed bindings for the Bookaro resource endpoints.
//!
//! Each method is a single envelope-unwrapped request through the gateway's
//! interception core; none of them handle authorization themselves.

use serde::Serialize;

use crate::models::{
    Address, AddressRequest, Booking, BookingStatus, CreateBookingRequest, CreateReviewRequest,
    FavoriteCheck, Review, Service, ServiceFilters, ServicePage, UpdateProfileRequest, UserProfile,
    VendorInfo,
};

use super::{ApiError, ApiGateway};

#[derive(Debug, Serialize)]
struct UpdateBookingStatusRequest {
    status: BookingStatus,
}

impl ApiGateway {
    // ===== Profile =====

    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.get("/users/profile").await
    }

    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        self.put("/users/profile", request).await
    }

    // ===== Services =====

    pub async fn search_services(&self, filters: &ServiceFilters) -> Result<ServicePage, ApiError> {
        self.get_with_query("/services", &filters.to_query()).await
    }

    pub async fn get_service(&self, id: i64) -> Result<Service, ApiError> {
        self.get(&format!("/services/{}", id)).await
    }

    pub async fn get_service_vendor(&self, id: i64) -> Result<VendorInfo, ApiError> {
        self.get(&format!("/services/{}/vendor", id)).await
    }

    pub async fn list_cities(&self) -> Result<Vec<String>, ApiError> {
        self.get("/services/cities").await
    }

    // ===== Bookings =====

    pub async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, ApiError> {
        self.post("/bookings", request).await
    }

    /// List the current user's bookings, optionally narrowed to one status.
    pub async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, ApiError> {
        match status {
            Some(status) => {
                self.get_with_query("/bookings", &[("status", status.as_str().to_string())])
                    .await
            }
            None => self.get("/bookings").await,
        }
    }

    pub async fn get_booking(&self, id: i64) -> Result<Booking, ApiError> {
        self.get(&format!("/bookings/{}", id)).await
    }

    /// Request a status change; the backend owns the transition rules.
    pub async fn update_booking_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<Booking, ApiError> {
        self.put(
            &format!("/bookings/{}/status", id),
            &UpdateBookingStatusRequest { status },
        )
        .await
    }

    pub async fn cancel_booking(&self, id: i64) -> Result<Booking, ApiError> {
        self.update_booking_status(id, BookingStatus::Cancelled).await
    }

    // ===== Reviews =====

    pub async fn create_review(&self, request: &CreateReviewRequest) -> Result<Review, ApiError> {
        self.post("/reviews", request).await
    }

    pub async fn list_service_reviews(&self, service_id: i64) -> Result<Vec<Review>, ApiError> {
        self.get(&format!("/reviews/service/{}", service_id)).await
    }

    // ===== Addresses =====

    pub async fn list_addresses(&self) -> Result<Vec<Address>, ApiError> {
        self.get("/addresses").await
    }

    pub async fn create_address(&self, request: &AddressRequest) -> Result<Address, ApiError> {
        self.post("/addresses", request).await
    }

    pub async fn update_address(
        &self,
        id: i64,
        request: &AddressRequest,
    ) -> Result<Address, ApiError> {
        self.put(&format!("/addresses/{}", id), request).await
    }

    pub async fn delete_address(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/addresses/{}", id)).await
    }

    pub async fn set_default_address(&self, id: i64) -> Result<Address, ApiError> {
        self.put_empty(&format!("/addresses/{}/set-default", id)).await
    }

    // ===== Favorites =====

    pub async fn list_favorites(&self) -> Result<Vec<Service>, ApiError> {
        self.get("/favorites").await
    }

    pub async fn add_favorite(&self, service_id: i64) -> Result<Service, ApiError> {
        self.post_empty(&format!("/favorites/{}", service_id)).await
    }

    pub async fn remove_favorite(&self, service_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/favorites/{}", service_id)).await
    }

    pub async fn check_favorite(&self, service_id: i64) -> Result<bool, ApiError> {
        let check: FavoriteCheck = self
            .get(&format!("/favorites/{}/check", service_id))
            .await?;
        Ok(check.is_favorite)
    }
}
