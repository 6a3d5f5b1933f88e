use crate::{
    lexicon::{count_present, ATTACHMENT_KEYWORDS, ELEMENTARY_KEYWORDS, KINDERGARTEN_KEYWORDS},
    types::Category,
};

/// Guesses which audience an utterance is about from keyword density in the raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryClassifier;

impl CategoryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Returns the category with the most keywords present, or `None` when nothing hints at
    /// one. Ties go to elementary, then kindergarten, then attachment.
    pub fn preferred(&self, raw_text: &str) -> Option<Category> {
        let lowered = raw_text.to_lowercase();
        let candidates = [
            (Category::Elementary, ELEMENTARY_KEYWORDS),
            (Category::Kindergarten, KINDERGARTEN_KEYWORDS),
            (Category::Attachment, ATTACHMENT_KEYWORDS),
        ];

        let mut best: Option<(Category, usize)> = None;
        for (category, keywords) in candidates {
            let count = count_present(&lowered, keywords);
            if count > 0 && best.map_or(true, |(_, top)| count > top) {
                best = Some((category, count));
            }
        }
        best.map(|(category, _)| category)
    }
}
