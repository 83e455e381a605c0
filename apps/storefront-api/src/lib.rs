//! # Storefront API
//!
//! The request boundary of the Stride storefront: catalog filtering and
//! search, per-product size availability, promotion checks, and order
//! creation.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront API                                   │
//! │                                                                         │
//! │  Client ───► axum routes ───► services ───► stride-db ───► SQLite     │
//! │                   │               │                                     │
//! │                   │               └── stride-core (pure rules)          │
//! │                   └── error.rs (kind → status mapping)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The library target exists so integration tests can exercise the
//! services and router directly; `main.rs` is a thin binary around it.

pub mod config;
pub mod error;
pub mod identity;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
