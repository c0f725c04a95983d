//! Application services — use-case implementations.
//!
//! Services read the caches populated by the
//! [`PollScheduler`](crate::poll_scheduler::PollScheduler) and never trigger
//! a gateway read themselves.

pub mod query_service;
