//! Data models for Bookaro marketplace entities.
//!
//! This module contains the structures exchanged with the backend:
//!
//! - `Service`, `VendorInfo`, `ServicePage`, `ServiceFilters`: listings and search
//! - `Booking`, `BookingStatus`: customer bookings
//! - `Review`: service reviews
//! - `Address`, `AddressType`: saved customer addresses
//! - `UserProfile`: the authenticated user's editable profile

pub mod address;
pub mod booking;
pub mod review;
pub mod service;
pub mod user;

pub use address::{Address, AddressRequest, AddressType};
pub use booking::{Booking, BookingStatus, CreateBookingRequest};
pub use review::{CreateReviewRequest, Review};
pub use service::{FavoriteCheck, Service, ServiceFilters, ServicePage, SortDirection, VendorInfo};
pub use user::{UpdateProfileRequest, UserProfile};
