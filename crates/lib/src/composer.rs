//! # Response Composition
//!
//! Turns a matched record, a menu row, or a notice list into the final text.

use crate::{
    constants::{ADDITIONAL_INFO_HEADING, LINK_LEAD_MESSAGE, NOTICES_HEADER, NO_NOTICES_MESSAGE},
    dates::weekday_name,
    errors::BotError,
    types::{Answer, Notice, QaRecord},
};
use chrono::NaiveDate;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct ResponseComposer {
    url: Regex,
}

impl ResponseComposer {
    pub fn new() -> Result<Self, BotError> {
        Ok(Self {
            url: Regex::new(r#"https?://[^\s<>"'()\[\]]+"#)?,
        })
    }

    /// Composes the answer for a matched record.
    ///
    /// A link in the primary answer replaces the whole body with a lead-in and the link.
    /// Otherwise a non-empty additional answer is appended under its own heading.
    pub fn compose(&self, record: &QaRecord) -> Answer {
        if let Some(found) = self.url.find(&record.answer) {
            let url = found
                .as_str()
                .trim_end_matches(['.', ',', '!', '?'])
                .to_string();
            return Answer::TextWithLink {
                lead: LINK_LEAD_MESSAGE.to_string(),
                url,
            };
        }

        let answer = record.answer.trim();
        let additional = record.additional().trim();
        if additional.is_empty() {
            Answer::Text(answer.to_string())
        } else {
            Answer::Text(format!("{answer}\n\n{ADDITIONAL_INFO_HEADING}\n{additional}"))
        }
    }

    pub fn meal(&self, date: NaiveDate, menu: &str) -> String {
        format!(
            "{}({}) 중식 메뉴입니다:\n\n{}",
            date.format("%Y-%m-%d"),
            weekday_name(date),
            menu.trim()
        )
    }

    pub fn weekend_meal(&self, date: NaiveDate) -> String {
        format!(
            "{}({})는 주말이라 급식이 없습니다.",
            date.format("%Y-%m-%d"),
            weekday_name(date)
        )
    }

    pub fn meal_not_registered(&self, date: NaiveDate) -> String {
        format!(
            "{}({}) 식단 정보가 아직 등록되지 않았습니다.",
            date.format("%Y-%m-%d"),
            weekday_name(date)
        )
    }

    /// A numbered list of notice titles with their dates.
    pub fn notices(&self, notices: &[Notice]) -> String {
        if notices.is_empty() {
            return NO_NOTICES_MESSAGE.to_string();
        }
        let mut text = NOTICES_HEADER.to_string();
        for (i, notice) in notices.iter().enumerate() {
            text.push('\n');
            text.push_str(&format!("{}. {}", i + 1, notice.title.trim()));
            let date = notice_date(&notice.created_at);
            if !date.is_empty() {
                text.push_str(&format!(" ({date})"));
            }
        }
        text
    }
}

/// The date part of a `created_at` timestamp such as `2024-05-10 09:00:00`.
fn notice_date(created_at: &str) -> &str {
    created_at
        .trim()
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn composer() -> ResponseComposer {
        ResponseComposer::new().unwrap()
    }

    #[test]
    fn link_replaces_the_answer_body() {
        let record = QaRecord::new(
            "학사일정 알려줘",
            "학사일정은 https://school.example.kr/calendar 에서 확인하세요.",
            Category::Elementary,
        )
        .with_additional_answer("무시되는 추가 답변");
        assert_eq!(
            composer().compose(&record),
            Answer::TextWithLink {
                lead: LINK_LEAD_MESSAGE.to_string(),
                url: "https://school.example.kr/calendar".to_string(),
            }
        );
    }

    #[test]
    fn additional_answer_goes_under_heading() {
        let record = QaRecord::new("q", "방과후는 오후 5시에 끝납니다.", Category::Elementary)
            .with_additional_answer("금요일은 4시입니다.");
        assert_eq!(
            composer().compose(&record).into_text(),
            "방과후는 오후 5시에 끝납니다.\n\n추가 정보:\n금요일은 4시입니다."
        );
    }

    #[test]
    fn blank_additional_answer_is_ignored() {
        let record = QaRecord::new("q", "답변", Category::Other).with_additional_answer("  ");
        assert_eq!(composer().compose(&record), Answer::Text("답변".to_string()));
    }

    #[test]
    fn meal_messages_carry_weekday() {
        let friday = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        assert_eq!(
            composer().meal(friday, "잡곡밥\n미역국\n"),
            "2024-05-10(금요일) 중식 메뉴입니다:\n\n잡곡밥\n미역국"
        );
        assert_eq!(
            composer().weekend_meal(saturday),
            "2024-05-11(토요일)는 주말이라 급식이 없습니다."
        );
        assert!(composer().meal_not_registered(friday).starts_with("2024-05-10(금요일)"));
    }

    #[test]
    fn notices_are_numbered_with_dates() {
        let notices = vec![
            Notice {
                title: "운동회 안내".to_string(),
                created_at: "2024-05-09 10:00:00".to_string(),
                content: None,
            },
            Notice {
                title: "현장체험학습 안내".to_string(),
                created_at: "2024-05-01".to_string(),
                content: Some("본문".to_string()),
            },
        ];
        assert_eq!(
            composer().notices(&notices),
            "최신 공지사항입니다:\n1. 운동회 안내 (2024-05-09)\n2. 현장체험학습 안내 (2024-05-01)"
        );
        assert_eq!(composer().notices(&[]), NO_NOTICES_MESSAGE);
    }
}
