//! Features layer - background scheduling and notification delivery

pub mod notifications;
pub mod reminders;

pub use notifications::{LogNotifier, Notifier, WebhookNotifier};
pub use reminders::{ReminderScheduler, SchedulerHandle, TickReport};
