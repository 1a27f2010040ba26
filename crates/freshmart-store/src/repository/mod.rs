//! # Repository Implementations
//!
//! Repository pattern: each entity type gets its own repository struct
//! wrapping the shared connection pool.
//!
//! ## Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Repository Pattern                                 │
//! │                                                                         │
//! │  Handler ──► store.products() ──► ProductRepository ──► SQL            │
//! │  Handler ──► store.banners()  ──► BannerRepository  ──► SQL            │
//! │  Handler ──► store.users()    ──► UserRepository    ──► SQL            │
//! │                                                                         │
//! │  Handlers never write SQL. Repositories never make policy decisions    │
//! │  (the 5-banner cap, validation) - those live above this layer.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod banner;
pub mod product;
pub mod user;
