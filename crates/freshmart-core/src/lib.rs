//! # freshmart-core: Pure Business Logic for the Freshmart Storefront
//!
//! This crate is the **heart** of the Freshmart backend. It contains all
//! business logic as pure functions and state machines with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Freshmart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-api (axum)                          │   │
//! │  │    list_products, sign_in, create_banner, upload_image, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ freshmart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   form    │  │ pagination│  │ validation│  │   │
//! │  │   │  Product  │  │ FormState │  │   Pages   │  │   rules   │  │   │
//! │  │   │  Banner   │  │  touched  │  │  clamping │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  freshmart-store (Data Layer)                   │   │
//! │  │          SQLite queries, migrations, blob storage               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Banner, AdminUser, filters)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`form`] - Generic form state manager (values, errors, touched, submit)
//! - [`pagination`] - Page clamping and item-range math
//! - [`search`] - Debounced-search policy (min length, staleness guard)
//! - [`error`] - Domain error types
//! - [`validation`] - Field and business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All prices are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod money;
pub mod pagination;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use freshmart_core::Money` instead of
// `use freshmart_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use form::{FieldRule, FormState};
pub use money::Money;
pub use pagination::Pagination;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of banners the storefront carousel can hold.
///
/// ## Business Reason
/// The homepage carousel is designed for at most five slides. The limit is
/// checked at the admin API boundary; the data layer itself does not enforce
/// it, so two concurrent admins can still race past it (known gap).
pub const MAX_BANNERS: usize = 5;

/// Maximum upload size for a product image, in bytes (5 MiB).
pub const MAX_PRODUCT_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum upload size for a banner image, in bytes (10 MiB).
pub const MAX_BANNER_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Default number of products shown per storefront page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Maximum page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Shortest query the product search will run.
///
/// Anything shorter clears results instead of hitting the store.
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

/// Debounce window for live search, in milliseconds.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
