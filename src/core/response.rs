//! Reply text formatting utilities
//!
//! Shared helpers for shaping handler replies. The transport layer sends
//! these strings verbatim, so they stay plain text.

use crate::store::LeaderboardEntry;

/// Format an ordered sequence as a 1-indexed numbered list
pub fn numbered_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format milestone progress as "completed/total (percent%)"
pub fn format_progress(completed: usize, total: usize) -> String {
    let percent = if total == 0 {
        0
    } else {
        (completed * 100) / total
    };
    format!("{completed}/{total} milestones ({percent}%)")
}

/// Format ranked leaderboard entries, one per line
pub fn format_leaderboard(entries: &[LeaderboardEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {} - {} pts", i + 1, entry.actor, entry.score))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list_is_one_indexed() {
        let items = ["first", "second", "third"];
        assert_eq!(numbered_list(&items), "1. first\n2. second\n3. third");
    }

    #[test]
    fn test_numbered_list_empty() {
        let items: [&str; 0] = [];
        assert_eq!(numbered_list(&items), "");
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(3, 10), "3/10 milestones (30%)");
        assert_eq!(format_progress(0, 10), "0/10 milestones (0%)");
        assert_eq!(format_progress(10, 10), "10/10 milestones (100%)");
    }

    #[test]
    fn test_format_progress_zero_total() {
        assert_eq!(format_progress(0, 0), "0/0 milestones (0%)");
    }

    #[test]
    fn test_format_leaderboard() {
        let entries = vec![
            LeaderboardEntry { actor: "alice".to_string(), score: 30 },
            LeaderboardEntry { actor: "bob".to_string(), score: 10 },
        ];
        assert_eq!(format_leaderboard(&entries), "1. alice - 30 pts\n2. bob - 10 pts");
    }
}
