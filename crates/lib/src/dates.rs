//! # Date Expressions
//!
//! Resolves relative (`오늘`, `내일`, ...) and absolute (`M월 D일`, `M/D`, `YYYY년 M월 D일`)
//! date expressions against an explicit reference date. Only the meal branch uses this.

use crate::{constants::WEEKDAY_NAMES, errors::BotError};
use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use regex::Regex;

/// Relative day words and their offset from the reference date, checked in this order.
const RELATIVE_DAYS: &[(&str, i64)] = &[("오늘", 0), ("내일", 1), ("어제", -1), ("모레", 2), ("글피", 3)];

#[derive(Debug, Clone)]
pub struct DateExtractor {
    full_date: Regex,
    month_day: Regex,
    slash_date: Regex,
}

impl DateExtractor {
    pub fn new() -> Result<Self, BotError> {
        Ok(Self {
            full_date: Regex::new(r"(\d{4})\s*년\s*(\d{1,2})\s*월\s*(\d{1,2})\s*일?")?,
            month_day: Regex::new(r"(\d{1,2})\s*월\s*(\d{1,2})\s*일?")?,
            slash_date: Regex::new(r"(?:^|\D)(\d{1,2})/(\d{1,2})(?:\D|$)")?,
        })
    }

    /// Finds the first date expression in `text`.
    ///
    /// Relative words win over absolute dates, and an explicit year wins over a bare
    /// month-day. A pattern that matches but names an impossible calendar day (`2월 30일`)
    /// yields `None` instead of falling through to the next pattern.
    pub fn extract(&self, text: &str, reference: NaiveDate) -> Option<NaiveDate> {
        if let Some((_, offset)) = RELATIVE_DAYS.iter().find(|(word, _)| text.contains(word)) {
            return reference.checked_add_signed(TimeDelta::days(*offset));
        }

        if let Some(caps) = self.full_date.captures(text) {
            let year = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            let day = caps[3].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day);
        }

        let caps = self
            .month_day
            .captures(text)
            .or_else(|| self.slash_date.captures(text))?;
        let month = caps[1].parse().ok()?;
        let day = caps[2].parse().ok()?;
        NaiveDate::from_ymd_opt(reference.year(), month, day)
    }

    /// Same as [`extract`](Self::extract), formatted as `YYYY-MM-DD`.
    pub fn resolve(&self, text: &str, reference: NaiveDate) -> Option<String> {
        self.extract(text, reference)
            .map(|date| date.format("%Y-%m-%d").to_string())
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The Korean weekday name, e.g. `토요일`.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn resolves_relative_words() {
        let extractor = DateExtractor::new().unwrap();
        assert_eq!(
            extractor.resolve("오늘 급식", reference()).as_deref(),
            Some("2024-05-10")
        );
        assert_eq!(
            extractor.resolve("내일 급식 뭐야", reference()).as_deref(),
            Some("2024-05-11")
        );
        assert_eq!(
            extractor.resolve("어제 메뉴", reference()).as_deref(),
            Some("2024-05-09")
        );
        assert_eq!(
            extractor.resolve("모레", reference()).as_deref(),
            Some("2024-05-12")
        );
        assert_eq!(
            extractor.resolve("글피", reference()).as_deref(),
            Some("2024-05-13")
        );
    }

    #[test]
    fn resolves_month_day_with_reference_year() {
        let extractor = DateExtractor::new().unwrap();
        assert_eq!(
            extractor.resolve("5월 20일 급식", reference()).as_deref(),
            Some("2024-05-20")
        );
        assert_eq!(
            extractor.resolve("12/3 메뉴", reference()).as_deref(),
            Some("2024-12-03")
        );
        assert_eq!(
            extractor.resolve("6/7일 점심", reference()).as_deref(),
            Some("2024-06-07")
        );
    }

    #[test]
    fn explicit_year_is_kept() {
        let extractor = DateExtractor::new().unwrap();
        assert_eq!(
            extractor.resolve("2023년 3월 2일 급식", reference()).as_deref(),
            Some("2023-03-02")
        );
    }

    #[test]
    fn impossible_dates_resolve_to_none() {
        let extractor = DateExtractor::new().unwrap();
        assert_eq!(extractor.resolve("2월 30일 급식", reference()), None);
        assert_eq!(extractor.resolve("4/31", reference()), None);
        assert_eq!(extractor.resolve("2023년 2월 29일", reference()), None);
    }

    #[test]
    fn text_without_dates_resolves_to_none() {
        let extractor = DateExtractor::new().unwrap();
        assert_eq!(extractor.resolve("급식 메뉴 알려줘", reference()), None);
    }

    #[test]
    fn weekend_and_weekday_names() {
        let saturday = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        assert!(is_weekend(saturday));
        assert!(!is_weekend(reference()));
        assert_eq!(weekday_name(saturday), "토요일");
        assert_eq!(weekday_name(reference()), "금요일");
    }
}
