//! # Freshmart Storefront API
//!
//! HTTP JSON API serving the grocery storefront and its admin dashboard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront API Server                             │
//! │                                                                         │
//! │  Browser ───► HTTP (8080) ───► handlers ───► freshmart-store ───► DB  │
//! │                   │                │                  │                 │
//! │                   │                ▼                  ▼                 │
//! │                   │         freshmart-core      blob files             │
//! │                   │      (validation, forms,                           │
//! │                   │       money, pagination)                           │
//! │                   ▼                                                     │
//! │            JWT sessions (admin routes)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod cookie;
pub mod error;
pub mod events;
pub mod handlers;
pub mod state;

pub use config::ApiConfig;
pub use handlers::router;
pub use state::AppState;
