//! # Shared State Store
//!
//! Single source of truth for notes, reminders, milestone flags, and
//! leaderboard scores. The [`Store`] owns all entity data; mutators run under
//! exclusive access through [`SharedStore`] and every successful mutation is
//! persisted as a full snapshot before the caller observes the result.

pub mod shared;

pub use shared::{SharedStore, StoreGuard};

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, StateError};

/// Points credited to an actor when a milestone flips to complete
pub const MILESTONE_AWARD_POINTS: u32 = 10;

/// A stored request to deliver a message on or after a calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Day-granularity target; no time component
    pub target_date: NaiveDate,
    pub message: String,
    /// Opaque delivery target handed to the notification sender
    pub destination: String,
    /// Flips false -> true exactly once, never reverses
    #[serde(default)]
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
}

/// One leaderboard row. Entries keep first-insertion order so score ties
/// rank deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub actor: String,
    pub score: u32,
}

/// Outcome of a milestone completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneOutcome {
    /// False when the milestone was already complete (repeat calls are
    /// scoring no-ops)
    pub awarded: bool,
}

/// Aggregate root owning all four collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub milestones: BTreeMap<String, bool>,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl Store {
    /// Append a note. Returns its 1-based display position.
    pub fn add_note(&mut self, text: &str) -> Result<usize> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StateError::invalid("note text must not be empty"));
        }
        self.notes.push(text.to_string());
        Ok(self.notes.len())
    }

    /// Register a reminder for the given ISO 8601 calendar date
    pub fn register_reminder(&mut self, date: &str, message: &str, destination: &str) -> Result<()> {
        let target_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            StateError::invalid(format!("'{date}' is not a valid YYYY-MM-DD date: {e}"))
        })?;

        self.reminders.push(Reminder {
            target_date,
            message: message.to_string(),
            destination: destination.to_string(),
            delivered: false,
            created_at: Utc::now(),
        });
        Ok(())
    }

    /// Mark a milestone complete and credit the actor.
    ///
    /// Keys are case-insensitive. Points are awarded only on the false->true
    /// transition, so duplicate command delivery cannot double-count.
    pub fn complete_milestone(&mut self, key: &str, actor: &str) -> Result<MilestoneOutcome> {
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(StateError::invalid("milestone key must not be empty"));
        }

        let already_done = self.milestones.get(&key).copied().unwrap_or(false);
        self.milestones.insert(key, true);

        if already_done {
            return Ok(MilestoneOutcome { awarded: false });
        }

        match self.leaderboard.iter_mut().find(|e| e.actor == actor) {
            Some(entry) => entry.score += MILESTONE_AWARD_POINTS,
            None => self.leaderboard.push(LeaderboardEntry {
                actor: actor.to_string(),
                score: MILESTONE_AWARD_POINTS,
            }),
        }
        Ok(MilestoneOutcome { awarded: true })
    }

    /// Completed milestone count against the fixed plan total.
    ///
    /// The total is the configured plan size, not the map length, so progress
    /// reads meaningfully before every milestone has been referenced.
    pub fn compute_progress(&self, plan_size: usize) -> (usize, usize) {
        let completed = self.milestones.values().filter(|done| **done).count();
        (completed, plan_size)
    }

    /// Leaderboard sorted descending by score; ties keep insertion order
    pub fn leaderboard_snapshot(&self) -> Vec<LeaderboardEntry> {
        let mut entries = self.leaderboard.clone();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    /// Indices of reminders that are due and not yet delivered
    pub fn due_candidates(&self, today: NaiveDate) -> Vec<usize> {
        self.reminders
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.delivered && r.target_date <= today)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_add_note_appends_in_order() {
        let mut store = Store::default();
        assert_eq!(store.add_note("first").unwrap(), 1);
        assert_eq!(store.add_note("  second  ").unwrap(), 2);

        assert_eq!(store.notes, vec!["first", "second"]);
        assert_eq!(store.notes.last().map(String::as_str), Some("second"));
    }

    #[test]
    fn test_add_note_rejects_blank_text() {
        let mut store = Store::default();
        let err = store.add_note("   ").unwrap_err();
        assert!(matches!(err, StateError::InvalidArgument(_)));
        assert!(store.notes.is_empty());
    }

    #[test]
    fn test_register_reminder_parses_iso_date() {
        let mut store = Store::default();
        store.register_reminder("2024-01-01", "kickoff", "chat-42").unwrap();

        let r = &store.reminders[0];
        assert_eq!(r.target_date, date("2024-01-01"));
        assert_eq!(r.message, "kickoff");
        assert_eq!(r.destination, "chat-42");
        assert!(!r.delivered);
    }

    #[test]
    fn test_register_reminder_rejects_bad_date_and_leaves_state_unchanged() {
        let mut store = Store::default();
        for bad in ["tomorrow", "2024-13-01", "01-02-2024", ""] {
            let err = store.register_reminder(bad, "msg", "chat").unwrap_err();
            assert!(matches!(err, StateError::InvalidArgument(_)), "accepted '{bad}'");
        }
        assert!(store.reminders.is_empty());
    }

    #[test]
    fn test_complete_milestone_awards_once() {
        let mut store = Store::default();

        let first = store.complete_milestone("week1", "alice").unwrap();
        assert!(first.awarded);
        let second = store.complete_milestone("week1", "alice").unwrap();
        assert!(!second.awarded);

        assert_eq!(store.leaderboard.len(), 1);
        assert_eq!(store.leaderboard[0].score, MILESTONE_AWARD_POINTS);
    }

    #[test]
    fn test_complete_milestone_key_is_case_insensitive() {
        let mut store = Store::default();
        store.complete_milestone("Week1", "alice").unwrap();
        let repeat = store.complete_milestone("WEEK1", "bob").unwrap();

        assert!(!repeat.awarded);
        assert_eq!(store.milestones.len(), 1);
        assert!(store.milestones["week1"]);
        // bob gets nothing for re-marking alice's milestone
        assert_eq!(store.leaderboard.len(), 1);
    }

    #[test]
    fn test_complete_milestone_rejects_empty_key() {
        let mut store = Store::default();
        let err = store.complete_milestone("  ", "alice").unwrap_err();
        assert!(matches!(err, StateError::InvalidArgument(_)));
        assert!(store.milestones.is_empty());
        assert!(store.leaderboard.is_empty());
    }

    #[test]
    fn test_compute_progress_uses_fixed_plan_size() {
        let mut store = Store::default();
        store.complete_milestone("week1", "alice").unwrap();
        store.complete_milestone("week2", "bob").unwrap();

        assert_eq!(store.compute_progress(10), (2, 10));
        // plan size is not derived from the collection
        assert_eq!(store.compute_progress(4), (2, 4));
    }

    #[test]
    fn test_leaderboard_sorted_descending_with_stable_ties() {
        let mut store = Store::default();
        // alice and bob tie at 10; carol leads with 20
        store.complete_milestone("week1", "alice").unwrap();
        store.complete_milestone("week2", "bob").unwrap();
        store.complete_milestone("week3", "carol").unwrap();
        store.complete_milestone("week4", "carol").unwrap();

        let ranked = store.leaderboard_snapshot();
        assert_eq!(ranked[0].actor, "carol");
        assert_eq!(ranked[0].score, 20);
        // tie broken by first insertion: alice before bob
        assert_eq!(ranked[1].actor, "alice");
        assert_eq!(ranked[2].actor, "bob");
    }

    #[test]
    fn test_due_candidates_calendar_comparison() {
        let mut store = Store::default();
        store.register_reminder("2024-01-01", "past", "a").unwrap();
        store.register_reminder("2024-01-02", "today", "b").unwrap();
        store.register_reminder("2024-01-03", "future", "c").unwrap();

        let due = store.due_candidates(date("2024-01-02"));
        assert_eq!(due, vec![0, 1]);
    }

    #[test]
    fn test_due_candidates_skips_delivered() {
        let mut store = Store::default();
        store.register_reminder("2024-01-01", "past", "a").unwrap();
        store.reminders[0].delivered = true;

        assert!(store.due_candidates(date("2024-01-02")).is_empty());
    }

    #[test]
    fn test_store_json_round_trip() {
        let mut store = Store::default();
        store.add_note("remember the retro").unwrap();
        store.register_reminder("2024-06-01", "demo day", "chat-7").unwrap();
        store.complete_milestone("week1", "alice").unwrap();

        let json = serde_json::to_string(&store).unwrap();
        let reloaded: Store = serde_json::from_str(&json).unwrap();
        assert_eq!(store, reloaded);
    }
}
