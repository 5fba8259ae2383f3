//! Per-domain command handlers
//!
//! Handles: note, notes, alert, alerts, done, progress, leaderboard, start,
//! help

pub mod milestones;
pub mod notes;
pub mod reminders;
pub mod utility;
