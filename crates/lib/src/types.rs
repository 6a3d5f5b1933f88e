//! # Shared Data Types
//!
//! Records handed over by the storage collaborators, the per-request query shape, and the
//! reply types returned from `SchoolBot`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The audience a curated Q&A record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Elementary,
    Kindergarten,
    Attachment,
    #[default]
    Other,
}

impl Category {
    /// Maps the free-text category column of the `qa_data` table onto a variant.
    ///
    /// Both the English names and the labels used by the school's spreadsheets are accepted.
    /// Anything unrecognised is `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "elementary" | "초등" | "초등학교" => Category::Elementary,
            "kindergarten" | "유치원" | "병설유치원" => Category::Kindergarten,
            "attachment" | "첨부" | "첨부파일" | "이미지" => Category::Attachment,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Elementary => "elementary",
            Category::Kindergarten => "kindergarten",
            Category::Attachment => "attachment",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A curated question/answer pair. Read-only input to the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub additional_answer: Option<String>,
    #[serde(default)]
    pub category: Category,
}

impl QaRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, category: Category) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            additional_answer: None,
            category,
        }
    }

    pub fn with_additional_answer(mut self, additional: impl Into<String>) -> Self {
        self.additional_answer = Some(additional.into());
        self
    }

    /// The secondary answer, treating an absent field as empty.
    pub fn additional(&self) -> &str {
        self.additional_answer.as_deref().unwrap_or("")
    }
}

/// Coarse label for the kind of information a user asks for.
///
/// Declaration order is the tie-break priority used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Time,
    Location,
    Procedure,
    Information,
    #[default]
    None,
}

/// The per-request view of an utterance after normalisation and classification.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuery {
    pub raw_text: String,
    pub normalized_text: String,
    pub tokens: BTreeSet<String>,
    pub detected_date: Option<NaiveDate>,
    pub intent: Intent,
}

/// One lunch row from the meal-menu table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRow {
    pub date: NaiveDate,
    pub menu: String,
}

/// One notice crawled from the school website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub created_at: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// One exchange kept in the rolling per-user history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user_id: String,
    pub user_text: String,
    pub bot_text: String,
    pub timestamp: DateTime<Utc>,
}

/// A composed answer for a matched corpus record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Plain answer text, possibly with the additional-information section appended.
    Text(String),
    /// The answer body was replaced by a short lead-in and the canonical source link.
    TextWithLink { lead: String, url: String },
}

impl Answer {
    pub fn into_text(self) -> String {
        match self {
            Answer::Text(text) => text,
            Answer::TextWithLink { lead, url } => format!("{lead}\n{url}"),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(text) => f.write_str(text),
            Answer::TextWithLink { lead, url } => write!(f, "{lead}\n{url}"),
        }
    }
}

/// Which branch of the pipeline produced a reply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReplyKind {
    Empty,
    Banned,
    OutOfScope,
    Meal,
    Notices,
    Corpus { score: f64 },
    SmallTalk,
    Fallback,
}

/// The final plain-text answer together with the branch that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub kind: ReplyKind,
}

impl Reply {
    pub fn new(text: impl Into<String>, kind: ReplyKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}
