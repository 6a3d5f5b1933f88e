//! # Bot Configuration
//!
//! Tunable weights and limits for the pipeline. Every field has a default so a config file
//! only needs to name what it overrides. The matcher weights have no single correct value;
//! the defaults favour over-matching, since the generation fallback only fires on a miss.

use crate::{errors::BotError, types::Intent};
use serde::Deserialize;

/// Weights of the scoring signals and the acceptance threshold.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum total score for a candidate to be returned. Must be positive.
    pub threshold: f64,
    /// Bonus when the query is contained in the question or vice versa.
    pub substring: f64,
    /// Per shared token.
    pub token_overlap: f64,
    /// Per query term found inside the question without being a shared token.
    pub partial_term: f64,
    /// Per important keyword present in both query and question.
    pub important_keyword: f64,
    /// Cap on how many distinct important keywords are rewarded.
    pub max_important_keywords: usize,
    /// Bonus when the candidate's category matches the preferred category.
    pub category: f64,
    /// Per context-pattern rule bridging the query to the question.
    pub context_pattern: f64,
    /// Bonus when the answer carries a link.
    pub url: f64,
    pub relevance_time: f64,
    pub relevance_location: f64,
    pub relevance_procedure: f64,
    pub relevance_information: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            substring: 10.0,
            token_overlap: 1.0,
            partial_term: 0.3,
            important_keyword: 2.0,
            max_important_keywords: 2,
            category: 0.5,
            context_pattern: 3.0,
            url: 0.2,
            relevance_time: 1.0,
            relevance_location: 0.8,
            relevance_procedure: 0.6,
            relevance_information: 0.3,
        }
    }
}

impl MatchingConfig {
    /// The answer-relevance weight for an intent.
    pub fn relevance_weight(&self, intent: Intent) -> f64 {
        match intent {
            Intent::Time => self.relevance_time,
            Intent::Location => self.relevance_location,
            Intent::Procedure => self.relevance_procedure,
            Intent::Information => self.relevance_information,
            Intent::None => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), BotError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(BotError::InvalidConfig(format!(
                "matching threshold must be a positive number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Limits for the generation fallback.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FallbackConfig {
    /// How many corpus, meal and notice rows go into the context.
    pub context_rows: usize,
    /// Notice bodies are cut to this many characters.
    pub notice_body_chars: usize,
    /// Generated answers are cut to this many characters.
    pub max_answer_chars: usize,
    /// How many past turns of the user's history are included.
    pub history_turns: usize,
    pub timeout_secs: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            context_rows: 5,
            notice_body_chars: 200,
            max_answer_chars: 300,
            history_turns: 1,
            timeout_secs: 10,
        }
    }
}

/// Root configuration of a `SchoolBot`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BotConfig {
    pub school_name: String,
    /// How many notices the notice branch lists.
    pub notice_limit: usize,
    /// How many turns are retained per user.
    pub history_limit: usize,
    /// How many users' histories are kept; the least recently active user is dropped first.
    pub history_max_users: usize,
    pub matching: MatchingConfig,
    pub fallback: FallbackConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            school_name: "와석초등학교".to_string(),
            notice_limit: 3,
            history_limit: 10,
            history_max_users: 1000,
            matching: MatchingConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl BotConfig {
    pub fn validate(&self) -> Result<(), BotError> {
        self.matching.validate()?;
        if self.fallback.max_answer_chars == 0 {
            return Err(BotError::InvalidConfig(
                "fallback.max_answer_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(BotConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_or_nan_threshold_is_rejected() {
        let mut config = BotConfig::default();
        config.matching.threshold = 0.0;
        assert!(matches!(config.validate(), Err(BotError::InvalidConfig(_))));
        config.matching.threshold = f64::NAN;
        assert!(matches!(config.validate(), Err(BotError::InvalidConfig(_))));
    }

    #[test]
    fn relevance_weights_are_ordered_by_intent() {
        let m = MatchingConfig::default();
        assert!(m.relevance_weight(Intent::Time) > m.relevance_weight(Intent::Location));
        assert!(m.relevance_weight(Intent::Location) > m.relevance_weight(Intent::Procedure));
        assert!(m.relevance_weight(Intent::Procedure) > m.relevance_weight(Intent::Information));
        assert!(m.relevance_weight(Intent::Information) > m.relevance_weight(Intent::None));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: BotConfig =
            serde_json::from_str(r#"{"matching": {"threshold": 2.5}, "notice_limit": 5}"#)
                .unwrap();
        assert_eq!(config.matching.threshold, 2.5);
        assert_eq!(config.matching.substring, 10.0);
        assert_eq!(config.notice_limit, 5);
        assert_eq!(config.fallback, FallbackConfig::default());
    }
}
