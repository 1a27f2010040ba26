//! # Domain Types
//!
//! Core domain types used throughout the Freshmart backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Banner      │   │   AdminUser     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  title          │   │  email          │       │
//! │  │  price_cents    │   │  link (/path)   │   │  role           │       │
//! │  │  tags           │   │  image_url      │   │  password_hash  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Products and banners are unrelated records: neither references the    │
//! │  other, and the store assigns no meaning to tag order.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product on the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on product cards.
    pub name: String,

    /// Longer description for the product detail view.
    pub description: String,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Public URL of the product image in blob storage.
    pub image_url: String,

    /// Tags for filtering ("Rice", "Essential", ...). Order is irrelevant;
    /// the admin form requires at least one.
    pub tags: Vec<String>,

    /// Featured on the "hot products" strip.
    pub is_hot: bool,

    /// Seasonal item (e.g., holiday stock).
    pub is_seasonal: bool,

    /// When the seasonal window closes, if the product is seasonal.
    pub seasonal_end_date: Option<DateTime<Utc>>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether a seasonal product is still within its window.
    ///
    /// Non-seasonal products are always in season. A seasonal product with
    /// no end date stays in season until one is set.
    pub fn is_in_season(&self, now: DateTime<Utc>) -> bool {
        if !self.is_seasonal {
            return true;
        }
        match self.seasonal_end_date {
            Some(end) => now <= end,
            None => true,
        }
    }

    /// Checks whether the product carries the given tag (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Data required to create a product. The store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub is_seasonal: bool,
    #[serde(default)]
    pub seasonal_end_date: Option<DateTime<Utc>>,
}

/// Partial update for a product. `None` fields are left untouched.
///
/// Replacing `image_url` does NOT delete the previous blob; only the product
/// delete path attempts blob cleanup. Orphaned images are an accepted cost.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_hot: Option<bool>,
    pub is_seasonal: Option<bool>,
    /// `Some(None)` clears the end date, `None` leaves it untouched.
    pub seasonal_end_date: Option<Option<DateTime<Utc>>>,
}

// =============================================================================
// Banner
// =============================================================================

/// A promotional banner on the storefront carousel.
///
/// At most [`crate::MAX_BANNERS`] exist at a time, enforced at the admin API
/// boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Headline shown over the banner image.
    pub title: String,

    /// Supporting copy.
    pub description: String,

    /// Public URL of the banner image in blob storage.
    pub image_url: String,

    /// Internal navigation target. Always an absolute path starting with
    /// `/`, e.g. `/products/rice`.
    pub link: String,

    /// When the banner was created. Newest banners show first.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a banner. The store assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBanner {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: String,
}

/// Partial update for a banner. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBanner {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
}

// =============================================================================
// Users
// =============================================================================

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access to the admin dashboard.
    Admin,
    /// Storefront-only access (reserved; the current UI has no accounts).
    User,
}

impl UserRole {
    /// String form used in the database and JWT claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    /// Parses the database/claims string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "user" => Some(UserRole::User),
            _ => None,
        }
    }
}

/// An account that can sign in to the admin dashboard.
///
/// The password hash never leaves the data layer; API responses use
/// [`UserProfile`].
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    /// argon2 hash of the password. Never the password itself.
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl AdminUser {
    /// The public view of this account.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// What the API returns about the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

// =============================================================================
// Listing Filters
// =============================================================================

/// Sort key for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    CreatedAt,
    Price,
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::CreatedAt
    }
}

/// Sort direction for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

/// Filter and ordering options for a product listing query.
///
/// Mirrors what the storefront pages ask for: a tag shelf, the hot strip,
/// newest-first by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Only products carrying this tag.
    pub tag: Option<String>,

    /// Only products with (or without) the hot flag.
    pub is_hot: Option<bool>,

    /// Only seasonal (or non-seasonal) products.
    pub is_seasonal: Option<bool>,

    /// Sort key. Defaults to creation time.
    #[serde(default)]
    pub sort_by: SortBy,

    /// Sort direction. Defaults to descending (newest/priciest first).
    #[serde(default)]
    pub sort_order: SortOrder,

    /// Maximum number of results.
    pub limit: Option<u32>,

    /// Number of results to skip (for offset pagination).
    pub offset: Option<u32>,
}

// =============================================================================
// Dashboard Analytics
// =============================================================================

/// Counters shown on the admin dashboard header.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Analytics {
    pub total_products: i64,
    pub total_banners: i64,
    pub hot_products: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_product() -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            name: "Basmati Rice 5kg".to_string(),
            description: "Long grain rice".to_string(),
            price_cents: 1299,
            image_url: "/media/products/p-1.jpg".to_string(),
            tags: vec!["Rice".to_string(), "Essential".to_string()],
            is_hot: true,
            is_seasonal: false,
            seasonal_end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_price_as_money() {
        let product = sample_product();
        assert_eq!(product.price().to_string(), "$12.99");
    }

    #[test]
    fn test_has_tag_is_case_insensitive() {
        let product = sample_product();
        assert!(product.has_tag("rice"));
        assert!(product.has_tag("Essential"));
        assert!(!product.has_tag("Dairy"));
    }

    #[test]
    fn test_seasonal_window() {
        let now = Utc::now();
        let mut product = sample_product();

        // Non-seasonal products are always in season
        assert!(product.is_in_season(now));

        product.is_seasonal = true;
        product.seasonal_end_date = Some(now + Duration::days(7));
        assert!(product.is_in_season(now));

        product.seasonal_end_date = Some(now - Duration::days(1));
        assert!(!product.is_in_season(now));

        // Seasonal with no end date stays in season
        product.seasonal_end_date = None;
        assert!(product.is_in_season(now));
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("user"), Some(UserRole::User));
        assert_eq!(UserRole::parse("root"), None);
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_filter_defaults() {
        let filter = ProductFilter::default();
        assert_eq!(filter.sort_by, SortBy::CreatedAt);
        assert_eq!(filter.sort_order, SortOrder::Desc);
        assert!(filter.tag.is_none());
    }
}
