//! Application services — use-case entry points for driving adapters.

pub mod schedule_service;
