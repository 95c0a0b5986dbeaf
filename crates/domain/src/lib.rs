//! # daywindow-domain
//!
//! Pure domain model for the daywindow daily scheduler.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **TimeOfDay** (tolerant `HH[:MM[:SS]]` parsing, canonical formatting)
//! - Define **WeekdaySet** (the active-weekday gate; empty means "never fires")
//! - Define **action resolution** (device family × symbolic action → service call)
//! - Define **Schedules** (targets + persisted options) and their derived
//!   **ScheduleState** (rebuilt wholesale on every options change)
//! - Define **ScheduleEvents** (update notifications keyed by schedule)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod action;
pub mod event;
pub mod options;
pub mod schedule;
pub mod state;
pub mod weekday;
