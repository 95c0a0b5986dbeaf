//! # daywindow-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for schedules (`/api/schedules`, …)
//! - Expose the **`set_options` RPC** (`POST /api/schedules/{id}/options`)
//! - Stream **schedule update events** over SSE (`/api/updates/stream`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `daywindow-app` (for port traits and services) and
//! `daywindow-domain` (for types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
