//! # Text Normalization
//!
//! Turns a raw utterance (or a corpus question) into the lower-cased, punctuation-free,
//! synonym-collapsed string used for substring checks, plus the content-word token set used
//! for overlap scoring.

use crate::{
    errors::BotError,
    lexicon::{PARTICLE_SUFFIXES, STOPWORDS, SYNONYMS},
    types::{Intent, NormalizedQuery},
};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

/// The normalized form of one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    /// Lower-cased, punctuation-stripped, synonym-collapsed text. Stopwords are kept.
    pub text: String,
    /// Content words with trailing particles trimmed and stopwords removed.
    pub tokens: BTreeSet<String>,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Attaches the per-utterance analysis to produce the query the matcher consumes.
    pub fn into_query(
        self,
        raw_text: &str,
        detected_date: Option<NaiveDate>,
        intent: Intent,
    ) -> NormalizedQuery {
        NormalizedQuery {
            raw_text: raw_text.to_string(),
            normalized_text: self.text,
            tokens: self.tokens,
            detected_date,
            intent,
        }
    }
}

/// Applies the synonym table and the tokenization rules.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    synonym_pattern: Regex,
    canonical_of: HashMap<&'static str, &'static str>,
}

impl TextNormalizer {
    /// Compiles the synonym table into a single alternation.
    ///
    /// Every surface form, canonical terms included, is tried longest first at each position,
    /// so a variant that is a prefix of a longer form never splits it, and a canonical term is
    /// never rewritten into itself plus a suffix.
    pub fn new() -> Result<Self, BotError> {
        let mut canonical_of = HashMap::new();
        for (canonical, variants) in SYNONYMS {
            canonical_of.insert(*canonical, *canonical);
            for variant in *variants {
                canonical_of.insert(*variant, *canonical);
            }
        }

        let mut forms: Vec<&str> = canonical_of.keys().copied().collect();
        forms.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        let alternation = forms
            .iter()
            .map(|form| regex::escape(form))
            .collect::<Vec<_>>()
            .join("|");
        let synonym_pattern = Regex::new(&alternation)?;

        Ok(Self {
            synonym_pattern,
            canonical_of,
        })
    }

    /// Normalizes `raw` into its comparison string and token set.
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let stripped: String = raw
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        let collapsed = collapse_whitespace(&stripped);
        let replaced = self
            .synonym_pattern
            .replace_all(&collapsed, |caps: &regex::Captures| {
                let form = &caps[0];
                self.canonical_of
                    .get(form)
                    .copied()
                    .unwrap_or(form)
                    .to_string()
            });
        let text = collapse_whitespace(&replaced);
        let tokens = tokenize(&text);
        NormalizedText { text, tokens }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tokenize(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .filter(|word| !STOPWORDS.contains(word))
        .map(trim_particle)
        .filter(|word| !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Trims at most one trailing particle, keeping at least two characters.
fn trim_particle(word: &str) -> &str {
    for suffix in PARTICLE_SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.chars().count() >= 2 {
                return stem;
            }
        }
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new().unwrap()
    }

    #[test]
    fn strips_punctuation_and_lowercases() {
        let n = normalizer().normalize("  방과후 수업, 몇시에 끝나요?!  ABC ");
        assert_eq!(n.text, "방과후 수업 몇시에 끝나요 abc");
    }

    #[test]
    fn collapses_synonym_variants_to_canonical() {
        let n = normalizer().normalize("현장체험학습 신청은 현장학습이랑 같나요");
        assert_eq!(n.text, "체험학습 신청은 체험학습이랑 같나요");

        let n = normalizer().normalize("방과후학교 그리고 방과 후");
        assert_eq!(n.text, "방과후 그리고 방과후");
    }

    #[test]
    fn canonical_term_is_not_rewritten() {
        let n = normalizer().normalize("재학증명서 발급");
        assert_eq!(n.text, "재학증명서 발급");
        let n = normalizer().normalize("재학증명 발급");
        assert_eq!(n.text, "재학증명서 발급");
        let n = normalizer().normalize("등하교 시간");
        assert_eq!(n.text, "등하교 시간");
    }

    #[test]
    fn tokens_drop_stopwords_and_trailing_particles() {
        let n = normalizer().normalize("방과후 수업 몇시에 끝나요?");
        let tokens: Vec<_> = n.tokens.iter().map(String::as_str).collect();
        assert_eq!(tokens, vec!["끝나", "몇시", "방과후", "수업"]);

        let n = normalizer().normalize("언제 어디 에서");
        assert!(n.tokens.is_empty());
        // Stopwords survive in the comparison string.
        assert_eq!(n.text, "언제 어디 에서");
    }

    #[test]
    fn short_words_keep_their_last_syllable() {
        let n = normalizer().normalize("아이 필요");
        assert!(n.tokens.contains("아이"));
        assert!(n.tokens.contains("필요"));

        // A one-character stem is not enough; three-character words still lose their particle.
        let n = normalizer().normalize("가요 학교가");
        assert!(n.tokens.contains("가요"));
        assert!(n.tokens.contains("학교"));
    }

    #[test]
    fn punctuation_only_input_is_empty() {
        let n = normalizer().normalize("?!... ~~");
        assert!(n.is_empty());
        assert!(n.tokens.is_empty());
    }
}
