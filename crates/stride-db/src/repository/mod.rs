//! # Repository Module
//!
//! Database repository implementations for the Stride storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service layer                                                          │
//! │       │                                                                 │
//! │       │  db.inventory().available_sizes(id, &range)                    │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                        │
//! │  • Services never see the pool or the storage engine                   │
//! │  • Swapping engines means re-implementing this crate, nothing else     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::CatalogRepository`] - Products, brands, categories, filter query
//! - [`inventory::InventoryRepository`] - Per-size stock reads
//! - [`promotion::PromotionRepository`] - Promotion lookup by code
//! - [`order::OrderRepository`] - Atomic order commit

pub mod catalog;
pub mod inventory;
pub mod order;
pub mod promotion;
