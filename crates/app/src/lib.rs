//! # daywindow-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ScheduleRepository` — the host-owned options store
//!   - `DeviceGateway` — the device-control boundary
//!   - `UpdatePublisher` — change notifications keyed by schedule
//! - Run the **scheduler engine** (`ScheduleRunner`): two live daily timers
//!   per schedule, atomic state-snapshot swaps, weekday/enabled gating
//! - Perform **device target dispatch**: one grouped call per family domain
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (update bus, in-memory schedule repository)
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `daywindow-domain` only (plus `tokio` for timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod dispatch;
pub mod engine;
pub mod ports;
pub mod repository;
pub mod services;
pub mod update_bus;
