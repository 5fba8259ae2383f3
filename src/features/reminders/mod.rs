//! # Reminders Feature
//!
//! Time-triggered reminder dispatch with at-most-once delivery.

pub mod scheduler;

pub use scheduler::{ReminderScheduler, SchedulerHandle, TickReport};
