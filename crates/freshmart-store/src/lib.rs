//! # freshmart-store: Data Layer for the Freshmart Storefront
//!
//! This crate provides persistence for the storefront: SQLite records via
//! sqlx plus filesystem blob storage for images.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Freshmart Data Flow                                │
//! │                                                                         │
//! │  HTTP Handler (list_products)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  freshmart-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐    │   │
//! │  │   │     Store     │   │  Repositories │   │  BlobStore   │    │   │
//! │  │   │   (pool.rs)   │   │ (product.rs,  │   │  (blob.rs)   │    │   │
//! │  │   │               │   │  banner.rs,   │   │              │    │   │
//! │  │   │ SqlitePool    │◄──│  user.rs)     │   │ products/    │    │   │
//! │  │   │ Migrations    │   │               │   │ banners/     │    │   │
//! │  │   └───────────────┘   └───────────────┘   └──────────────┘    │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  SQLite database file                 image files on disk               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations (product, banner, user)
//! - [`blob`] - Filesystem image storage
//!
//! ## Usage
//!
//! ```rust,ignore
//! use freshmart_store::{Store, StoreConfig};
//!
//! let store = Store::connect(StoreConfig::new("freshmart.db")).await?;
//! let products = store.products().search("rice", 20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod blob;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use blob::{BlobKind, BlobStore, BLOB_URL_PREFIX};
pub use error::{StoreError, StoreResult};
pub use pool::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::banner::BannerRepository;
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
