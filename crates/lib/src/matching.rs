//! # Matching Engine
//!
//! Scores every corpus record against a normalized query and returns the best one if it
//! clears the threshold. A candidate's score is the sum of independent signals:
//!
//! 1. **Exact match**: identical normalized text short-circuits the scan with `f64::MAX`.
//! 2. **Substring**: the query is inside the question or the question inside the query.
//! 3. **Token overlap**: shared tokens, plus query terms found inside the question text.
//! 4. **Important keywords**: canonical domain terms present on both sides, capped.
//! 5. **Category**: the candidate belongs to the preferred category.
//! 6. **Answer relevance**: the answer carries markers fitting the query intent, or a link.
//! 7. **Context patterns**: a colloquial phrasing in the query pairs with the question.
//!
//! Signals 5 and 6 only count once one of the lexical signals (2, 3, 4, 7) has fired, so
//! a generic query never matches on intent alone. Ties keep the earliest record.

use crate::{
    config::MatchingConfig,
    corpus::{Corpus, IndexedRecord},
    errors::BotError,
    lexicon::{
        contains_any, important_keywords, CONTEXT_PATTERNS, INFORMATION_ANSWER_MARKERS,
        LOCATION_ANSWER_MARKERS, PROCEDURE_ANSWER_MARKERS, TIME_ANSWER_MARKERS,
    },
    types::{Category, Intent, NormalizedQuery, QaRecord},
};
use std::cmp::Ordering;
use tracing::debug;

/// Score used for an exact match, so it clears any finite threshold.
pub const EXACT_MATCH_SCORE: f64 = f64::MAX;

/// Per-signal contributions to a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub exact: bool,
    pub substring: f64,
    pub token_overlap: f64,
    pub partial_term: f64,
    pub important_keyword: f64,
    pub context_pattern: f64,
    pub category: f64,
    pub relevance: f64,
}

impl ScoreBreakdown {
    fn exact() -> Self {
        Self {
            exact: true,
            ..Default::default()
        }
    }

    /// Sum of the lexical signals, the ones that can make a candidate eligible.
    pub fn lexical(&self) -> f64 {
        self.substring
            + self.token_overlap
            + self.partial_term
            + self.important_keyword
            + self.context_pattern
    }

    pub fn total(&self) -> f64 {
        if self.exact {
            EXACT_MATCH_SCORE
        } else {
            self.lexical() + self.category + self.relevance
        }
    }
}

/// A scored corpus record, only alive for one scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub record: &'a QaRecord,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Ranks corpus records against a query. Deterministic and free of I/O.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Result<Self, BotError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Returns the best-scoring record if it clears the threshold.
    ///
    /// An empty corpus or a query that normalized to nothing never matches.
    pub fn best_match<'a>(
        &self,
        query: &NormalizedQuery,
        preferred: Option<Category>,
        corpus: &'a Corpus,
    ) -> Option<ScoredCandidate<'a>> {
        if query.normalized_text.is_empty() {
            return None;
        }

        let mut best: Option<ScoredCandidate<'a>> = None;
        for entry in corpus.entries() {
            let breakdown = self.score(query, preferred, entry);
            let candidate = ScoredCandidate {
                record: &entry.record,
                score: breakdown.total(),
                breakdown,
            };
            if breakdown.exact {
                debug!(question = %entry.record.question, "Exact match short-circuits the scan.");
                return Some(candidate);
            }
            // Strictly greater, so the first of equal scores is kept.
            if best.as_ref().map_or(true, |top| candidate.score > top.score) {
                best = Some(candidate);
            }
        }

        if let Some(top) = &best {
            debug!(
                question = %top.record.question,
                score = top.score,
                threshold = self.config.threshold,
                "Best candidate after scan."
            );
        }
        best.filter(|top| top.score >= self.config.threshold)
    }

    /// Scores every record and sorts by score, keeping corpus order among equal scores.
    pub fn rank<'a>(
        &self,
        query: &NormalizedQuery,
        preferred: Option<Category>,
        corpus: &'a Corpus,
    ) -> Vec<ScoredCandidate<'a>> {
        let mut ranked: Vec<ScoredCandidate<'a>> = corpus
            .entries()
            .iter()
            .map(|entry| {
                let breakdown = self.score(query, preferred, entry);
                ScoredCandidate {
                    record: &entry.record,
                    score: breakdown.total(),
                    breakdown,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked
    }

    /// Computes every signal for one candidate.
    pub fn score(
        &self,
        query: &NormalizedQuery,
        preferred: Option<Category>,
        entry: &IndexedRecord,
    ) -> ScoreBreakdown {
        let q = query.normalized_text.as_str();
        let question = entry.question.text.as_str();
        if q.is_empty() || question.is_empty() {
            return ScoreBreakdown::default();
        }
        if q == question {
            return ScoreBreakdown::exact();
        }

        let w = &self.config;
        let mut breakdown = ScoreBreakdown::default();

        if q.chars().count() >= 2 && (question.contains(q) || q.contains(question)) {
            breakdown.substring = w.substring;
        }

        let shared = query.tokens.intersection(&entry.question.tokens).count();
        breakdown.token_overlap = shared as f64 * w.token_overlap;

        let partial = query
            .tokens
            .iter()
            .filter(|term| term.chars().count() >= 2)
            .filter(|term| !entry.question.tokens.contains(*term) && question.contains(term.as_str()))
            .count();
        breakdown.partial_term = partial as f64 * w.partial_term;

        let important = important_keywords()
            .filter(|keyword| q.contains(keyword) && question.contains(keyword))
            .take(w.max_important_keywords)
            .count();
        breakdown.important_keyword = important as f64 * w.important_keyword;

        let bridged = CONTEXT_PATTERNS
            .iter()
            .filter(|pattern| {
                contains_any(q, pattern.user_phrases) && contains_any(question, pattern.question_phrases)
            })
            .count();
        breakdown.context_pattern = bridged as f64 * w.context_pattern;

        if breakdown.lexical() > 0.0 {
            if preferred == Some(entry.record.category) {
                breakdown.category = w.category;
            }
            breakdown.relevance = self.answer_relevance(query.intent, &entry.record.answer);
        }

        breakdown
    }

    fn answer_relevance(&self, intent: Intent, answer: &str) -> f64 {
        let markers: &[&str] = match intent {
            Intent::Time => TIME_ANSWER_MARKERS,
            Intent::Location => LOCATION_ANSWER_MARKERS,
            Intent::Procedure => PROCEDURE_ANSWER_MARKERS,
            Intent::Information => INFORMATION_ANSWER_MARKERS,
            Intent::None => &[],
        };
        let mut relevance = 0.0;
        if contains_any(answer, markers) {
            relevance += self.config.relevance_weight(intent);
        }
        if answer.contains("http://") || answer.contains("https://") {
            relevance += self.config.url;
        }
        relevance
    }
}
