//! # shop-api
//!
//! HTTP front end for the storefront backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The checkout endpoint that opens a Stripe session per product
//! - Minimal HTML pages for the landing and checkout redirect
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Landing page |
//! | GET | `/health` | Health check |
//! | GET | `/checkout/{id}` | Create a session and redirect to Stripe |

pub mod handlers;
pub mod render;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
