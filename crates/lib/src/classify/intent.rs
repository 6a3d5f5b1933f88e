use crate::{
    lexicon::{
        count_present, INFORMATION_KEYWORDS, LOCATION_KEYWORDS, PROCEDURE_KEYWORDS, TIME_KEYWORDS,
    },
    types::Intent,
};

/// Assigns one coarse intent label from keyword counts over the normalized text.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Returns the intent with the most keywords present.
    ///
    /// Ties go to the earlier intent in `time > location > procedure > information`;
    /// with no keyword at all the label is `Intent::None`.
    pub fn classify(&self, normalized_text: &str) -> Intent {
        let candidates = [
            (Intent::Time, TIME_KEYWORDS),
            (Intent::Location, LOCATION_KEYWORDS),
            (Intent::Procedure, PROCEDURE_KEYWORDS),
            (Intent::Information, INFORMATION_KEYWORDS),
        ];

        let mut best = (Intent::None, 0usize);
        for (intent, keywords) in candidates {
            let count = count_present(normalized_text, keywords);
            if count > best.1 {
                best = (intent, count);
            }
        }
        best.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_intent_with_most_keywords() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("방과후 몇시 끝나"), Intent::Time);
        assert_eq!(classifier.classify("보건실 위치 어디"), Intent::Location);
        assert_eq!(
            classifier.classify("재학증명서 발급 방법 알려줘"),
            Intent::Procedure
        );
        assert_eq!(classifier.classify("급식 알려줘"), Intent::Information);
    }

    #[test]
    fn ties_follow_priority_order() {
        let classifier = IntentClassifier::new();
        // one time keyword, one location keyword
        assert_eq!(classifier.classify("언제 어디"), Intent::Time);
        // one location keyword, one procedure keyword
        assert_eq!(classifier.classify("어디 신청"), Intent::Location);
    }

    #[test]
    fn no_keywords_means_none() {
        assert_eq!(IntentClassifier::new().classify("우주여행"), Intent::None);
        assert_eq!(IntentClassifier::new().classify(""), Intent::None);
    }
}
