use crate::lexicon::{
    contains_any, BANNED_ALLOW_LIST, BANNED_WORDS, CONTEXT_PATTERNS, GREETING_TERMS,
    QUESTION_PATTERNS, SCHOOL_KEYWORDS,
};

/// The outcome of the domain filter for one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainVerdict {
    pub in_domain: bool,
    pub banned: bool,
}

/// Decides whether an utterance belongs to the school domain and whether it carries
/// disallowed content.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainFilter;

impl DomainFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, text: &str) -> DomainVerdict {
        DomainVerdict {
            in_domain: self.in_domain(text),
            banned: self.banned(text),
        }
    }

    /// True if the text contains a banned word and none of the allow-listed terms.
    pub fn banned(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        if contains_any(&lowered, BANNED_ALLOW_LIST) {
            return false;
        }
        contains_any(&lowered, BANNED_WORDS)
    }

    /// True if the text mentions the school domain, asks a question, greets, or uses one of
    /// the colloquial phrasings the context patterns know about.
    ///
    /// Blank text is never in domain.
    pub fn in_domain(&self, text: &str) -> bool {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return false;
        }
        contains_any(&lowered, SCHOOL_KEYWORDS)
            || contains_any(&lowered, QUESTION_PATTERNS)
            || contains_any(&lowered, GREETING_TERMS)
            || CONTEXT_PATTERNS
                .iter()
                .any(|pattern| contains_any(&lowered, pattern.user_phrases))
    }
}
