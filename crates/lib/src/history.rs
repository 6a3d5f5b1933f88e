//! # Conversation History
//!
//! A bounded, in-memory log of recent exchanges per user. The matcher never reads it; it only
//! feeds the generation fallback and the CLI `/history` command.

use crate::{constants::NO_HISTORY_MESSAGE, types::ConversationTurn};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;
use tracing::debug;

/// How many turns `summary` renders.
const SUMMARY_TURNS: usize = 5;
/// Texts in the summary are cut to this many characters.
const SUMMARY_TEXT_CHARS: usize = 30;
/// Default cap on the number of users with a stored history.
const DEFAULT_MAX_USERS: usize = 1000;

#[derive(Debug)]
pub struct ConversationLog {
    limit: usize,
    max_users: usize,
    turns: RwLock<HashMap<String, VecDeque<ConversationTurn>>>,
}

impl ConversationLog {
    /// Keeps at most `limit` turns per user. A zero limit disables the log.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            max_users: DEFAULT_MAX_USERS,
            turns: RwLock::new(HashMap::new()),
        }
    }

    /// Caps how many users are tracked. When a new user would exceed the cap, the user whose
    /// last turn is oldest is forgotten. A zero cap is treated as one.
    pub fn with_max_users(mut self, max_users: usize) -> Self {
        self.max_users = max_users.max(1);
        self
    }

    pub async fn append(
        &self,
        user_id: &str,
        user_text: &str,
        bot_text: &str,
        timestamp: DateTime<Utc>,
    ) {
        if self.limit == 0 {
            return;
        }
        let mut turns = self.turns.write().await;
        if !turns.contains_key(user_id) && turns.len() >= self.max_users {
            evict_idlest(&mut turns);
        }
        let log = turns.entry(user_id.to_string()).or_default();
        log.push_back(ConversationTurn {
            user_id: user_id.to_string(),
            user_text: user_text.to_string(),
            bot_text: bot_text.to_string(),
            timestamp,
        });
        while log.len() > self.limit {
            log.pop_front();
        }
    }

    /// The last `k` turns of `user_id`, oldest first.
    pub async fn recent(&self, user_id: &str, k: usize) -> Vec<ConversationTurn> {
        let turns = self.turns.read().await;
        turns
            .get(user_id)
            .map(|log| {
                let skip = log.len().saturating_sub(k);
                log.iter().skip(skip).cloned().collect()
            })
            .unwrap_or_default()
    }

    /// A short numbered rendering of the user's last few turns.
    pub async fn summary(&self, user_id: &str) -> String {
        let recent = self.recent(user_id, SUMMARY_TURNS).await;
        if recent.is_empty() {
            return NO_HISTORY_MESSAGE.to_string();
        }
        recent
            .iter()
            .enumerate()
            .map(|(i, turn)| {
                format!(
                    "{}. [{}] 질문: {} / 답변: {}",
                    i + 1,
                    turn.timestamp.format("%m-%d %H:%M"),
                    truncate_chars(&turn.user_text, SUMMARY_TEXT_CHARS),
                    truncate_chars(&turn.bot_text, SUMMARY_TEXT_CHARS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub async fn clear(&self, user_id: &str) {
        self.turns.write().await.remove(user_id);
    }
}

/// Drops the user whose most recent turn is the oldest; ties go to the smaller user id.
fn evict_idlest(turns: &mut HashMap<String, VecDeque<ConversationTurn>>) {
    let idlest = turns
        .iter()
        .map(|(user, log)| (log.back().map(|turn| turn.timestamp), user))
        .min()
        .map(|(_, user)| user.clone());
    if let Some(user) = idlest {
        debug!(user_id = %user, "Dropping the least recently active history.");
        turns.remove(&user);
    }
}

/// Cuts `text` to at most `max` characters, marking the cut with `...`.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
