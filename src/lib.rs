// Core layer - configuration, errors, reply formatting
pub mod core;

// State layer - the durable shared store and its mutators
pub mod store;

// Features layer - reminder scheduling and notification delivery
pub mod features;

// Application layer - command parsing and dispatch
pub mod commands;

// Re-export the items the binary and embedders reach for
pub use crate::core::{Config, StartupTick, StateError};

pub use store::{LeaderboardEntry, Reminder, SharedStore, Store};

pub use commands::{
    default_registry, dispatch, ChatCommandHandler, CommandContext, CommandInvocation,
    CommandRegistry,
};

pub use features::{
    LogNotifier, Notifier, ReminderScheduler, SchedulerHandle, TickReport, WebhookNotifier,
};
