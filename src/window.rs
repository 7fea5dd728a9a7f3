use serde_json::Value;
use tracing::{debug, trace};

use crate::message::Message;

/// Budgeted sliding window over a stored conversation transcript.
///
/// [`select`](HistoryWindow::select) keeps the largest trailing run of
/// well-formed turns that fits both a message-count and a character-count
/// budget, so model requests stay below provider context limits. The walk
/// runs newest to oldest and stops at the first turn that would overflow the
/// character budget, except that the newest turn alone is shortened to its
/// trailing characters rather than dropped.
#[derive(Clone, Copy, Debug)]
pub struct HistoryWindow {
    max_messages: usize,
    max_characters: usize,
}

impl HistoryWindow {
    pub const DEFAULT_MAX_MESSAGES: usize = 24;
    pub const DEFAULT_MAX_CHARACTERS: usize = 48_000;

    /// Create a window with explicit budgets. A zero budget on either axis
    /// makes every selection empty.
    pub fn new(max_messages: usize, max_characters: usize) -> Self {
        Self {
            max_messages,
            max_characters,
        }
    }

    /// Select the recent turns of `entries` that fit both budgets.
    ///
    /// `entries` is the raw transcript, oldest first. Rows that are not
    /// well-formed turns are skipped without consuming budget. The result is
    /// oldest first and contains only `role` and `content`.
    pub fn select(&self, entries: &[Value]) -> Vec<Message> {
        if self.max_messages == 0 || self.max_characters == 0 {
            return Vec::new();
        }

        let start = entries.len().saturating_sub(self.max_messages);
        let mut kept: Vec<Message> = Vec::new();
        let mut used = 0usize;

        for entry in entries[start..].iter().rev() {
            let Some(msg) = Message::from_entry(entry) else {
                trace!("skipping malformed transcript row");
                continue;
            };

            let len = msg.chars();

            if used + len > self.max_characters {
                if kept.is_empty() {
                    // The newest eligible turn alone overflows. Keep its
                    // trailing characters up to the full budget.
                    let remaining = self.max_characters - used;
                    let content: String =
                        msg.content.chars().skip(len - remaining).collect();
                    debug!(
                        kept = remaining,
                        dropped = len - remaining,
                        "truncated newest turn to fit character budget"
                    );
                    kept.push(Message::new(msg.role, content));
                } else {
                    debug!(
                        turns = kept.len(),
                        used, "character budget reached, older turns dropped"
                    );
                }
                break;
            }

            used += len;
            kept.push(msg);
        }

        kept.reverse();
        kept
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_MESSAGES, Self::DEFAULT_MAX_CHARACTERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn turn(role: &str, content: &str) -> Value {
        json!({"role": role, "content": content})
    }

    fn entries(contents: &[&str]) -> Vec<Value> {
        contents
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let role = if i % 2 == 0 { "user" } else { "assistant" };
                turn(role, c)
            })
            .collect()
    }

    #[test]
    fn keeps_everything_when_budgets_are_slack() {
        let content = "a".repeat(100);
        let log = entries(&[content.as_str(); 5]);
        let out = HistoryWindow::default().select(&log);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].role, "user");
        assert_eq!(out[4].role, "user");
        assert!(out.iter().all(|m| m.chars() == 100));
    }

    #[test]
    fn message_budget_keeps_the_tail() {
        let log = entries(&["one", "two", "three"]);
        let out = HistoryWindow::new(2, 1000).select(&log);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].content, "two");
        assert_eq!(out[1].content, "three");
    }

    #[test]
    fn zero_budgets_select_nothing() {
        let log = entries(&["hello", "world"]);
        assert!(HistoryWindow::new(0, 1000).select(&log).is_empty());
        assert!(HistoryWindow::new(10, 0).select(&log).is_empty());
        assert!(HistoryWindow::new(0, 0).select(&log).is_empty());
    }

    #[test]
    fn empty_transcript_selects_nothing() {
        assert!(HistoryWindow::default().select(&[]).is_empty());
    }

    #[test]
    fn malformed_rows_are_dropped_without_consuming_budget() {
        let log = vec![
            turn("user", "hi"),
            json!({"role": "bot"}),
            json!({"role": 3, "content": "nope"}),
            json!({"role": "assistant", "content": ""}),
            json!("loose string"),
        ];
        let out = HistoryWindow::default().select(&log);
        assert_eq!(out, vec![Message::user("hi")]);
    }

    #[test]
    fn malformed_rows_still_occupy_tail_positions() {
        // The trailing slice is positional over raw rows, so junk inside the
        // tail can displace an older well-formed turn.
        let log = vec![
            turn("user", "oldest"),
            json!({"content": "no role"}),
            turn("assistant", "newest"),
        ];
        let out = HistoryWindow::new(2, 1000).select(&log);
        assert_eq!(out, vec![Message::assistant("newest")]);
    }

    #[test]
    fn oversized_newest_turn_is_suffix_truncated() {
        let log = vec![turn("user", "earlier"), turn("assistant", "abcdefghij")];
        let out = HistoryWindow::new(24, 4).select(&log);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].role, "assistant");
        assert_eq!(out[0].content, "ghij");
    }

    #[test]
    fn truncation_counts_code_points_not_bytes() {
        let log = vec![turn("user", "αβγδε")];
        let out = HistoryWindow::new(24, 2).select(&log);
        assert_eq!(out[0].content, "δε");
    }

    #[test]
    fn overflow_on_an_older_turn_stops_the_walk() {
        // Oldest turn would fit the leftover budget on its own, but the walk
        // stops at the first overflowing older turn.
        let middle = "x".repeat(100);
        let log = entries(&["abc", middle.as_str(), "hello"]);
        let out = HistoryWindow::new(24, 10).select(&log);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].content, "hello");
    }

    #[test]
    fn exact_fit_is_kept_whole() {
        let log = vec![turn("user", "12345")];
        let out = HistoryWindow::new(24, 5).select(&log);
        assert_eq!(out[0].content, "12345");
    }

    #[test]
    fn result_respects_both_budgets() {
        let log = entries(&[
            "aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff", "gggg", "hhhh",
        ]);
        let window = HistoryWindow::new(5, 14);
        let out = window.select(&log);
        assert!(out.len() <= 5);
        let total: usize = out.iter().map(Message::chars).sum();
        assert!(total <= 14);
        // Newest three fit (12 chars), a fourth would overflow.
        assert_eq!(out.len(), 3);
        assert_eq!(out.last().unwrap().content, "hhhh");
    }

    #[test]
    fn reapplying_the_window_is_idempotent() {
        let log = entries(&["first", "second", "third", "fourth"]);
        let window = HistoryWindow::new(3, 11);
        let once = window.select(&log);
        let reencoded: Vec<Value> = once
            .iter()
            .map(|m| turn(&m.role, &m.content))
            .collect();
        assert_eq!(window.select(&reencoded), once);
    }
}
