use serde::{Deserialize, Serialize};

/// Vendor details embedded in a service listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorInfo {
    pub id: i64,
    pub vendor_code: Option<String>,
    pub business_name: Option<String>,
    pub primary_category: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub years_of_experience: Option<i32>,
    pub average_rating: Option<f64>,
    pub total_reviews: Option<i32>,
    pub is_verified: Option<bool>,
}

/// A service listing as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub service_name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_available: Option<bool>,
    pub average_rating: Option<f64>,
    pub total_reviews: Option<i32>,
    pub vendor: Option<VendorInfo>,
}

impl Service {
    pub fn display_rating(&self) -> String {
        match (self.average_rating, self.total_reviews) {
            (Some(rating), Some(count)) => format!("{:.1} ({} reviews)", rating, count),
            (Some(rating), None) => format!("{:.1}", rating),
            _ => "No ratings yet".to_string(),
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePage {
    #[serde(default)]
    pub content: Vec<Service>,
    pub total_pages: u32,
    pub total_elements: i64,
    pub current_page: u32,
    pub size: u32,
}

/// Payload of `GET /favorites/{serviceId}/check`.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteCheck {
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

/// Default page size for service searches
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Search filters for `GET /services`. All filter fields are optional; the
/// backend runs its broad "available services" query when none are set.
#[derive(Debug, Clone)]
pub struct ServiceFilters {
    pub category: Option<String>,
    pub city: Option<String>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl Default for ServiceFilters {
    fn default() -> Self {
        Self {
            category: None,
            city: None,
            location: None,
            min_price: None,
            max_price: None,
            min_rating: None,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: "averageRating".to_string(),
            sort_dir: SortDirection::Descending,
        }
    }
}

impl ServiceFilters {
    /// Build the query string pairs, skipping unset filters.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(ref category) = self.category {
            query.push(("category", category.clone()));
        }
        if let Some(ref city) = self.city {
            query.push(("city", city.clone()));
        }
        if let Some(ref location) = self.location {
            query.push(("location", location.clone()));
        }
        if let Some(min_price) = self.min_price {
            query.push(("minPrice", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            query.push(("maxPrice", max_price.to_string()));
        }
        if let Some(min_rating) = self.min_rating {
            query.push(("minRating", min_rating.to_string()));
        }
        query.push(("page", self.page.to_string()));
        query.push(("size", self.size.to_string()));
        query.push(("sortBy", self.sort_by.clone()));
        query.push(("sortDir", self.sort_dir.as_str().to_string()));
        query
    }
}
