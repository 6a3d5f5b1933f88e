#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared helpers for the integration tests: tracing setup, a recording AI provider, and an
//! in-memory store implementing all three storage traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use dotenvy::dotenv;
use schoolbot::{
    providers::{
        ai::AiProvider,
        db::storage::{MenuSource, NoticeSource, QaSource},
    },
    types::{MealRow, Notice},
    BotConfig, BotError, Category, QaRecord, SchoolBot,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Once, RwLock,
};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        tracing_subscriber::fmt::init();
    });
}

// --- Mock AI Provider ---

/// Records every call and answers with a fixed response, or fails when `fail` is set.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
    response: String,
    fail: bool,
}

impl MockAiProvider {
    pub fn new(response: &str) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            response: response.to_string(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> usize {
        self.call_history.read().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, BotError> {
        self.call_history
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        if self.fail {
            return Err(BotError::AiApi("mock provider failure".to_string()));
        }
        Ok(self.response.clone())
    }
}

// --- In-memory store ---

/// Serves fixed records, menus and notices. Clones share the counters.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    pub records: Vec<QaRecord>,
    pub menus: Vec<MealRow>,
    pub notices: Vec<Notice>,
    pub fail_reads: bool,
    pub menu_calls: Arc<AtomicUsize>,
    pub qa_calls: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new(records: Vec<QaRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn with_menu(mut self, date: NaiveDate, menu: &str) -> Self {
        self.menus.push(MealRow {
            date,
            menu: menu.to_string(),
        });
        self
    }

    pub fn with_notice(mut self, title: &str, created_at: &str, content: &str) -> Self {
        self.notices.push(Notice {
            title: title.to_string(),
            created_at: created_at.to_string(),
            content: Some(content.to_string()),
        });
        self
    }

    pub fn menu_calls(&self) -> usize {
        self.menu_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), BotError> {
        if self.fail_reads {
            Err(BotError::StorageOperationFailed("mock read failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl QaSource for InMemoryStore {
    async fn list_qa_records(&self) -> Result<Vec<QaRecord>, BotError> {
        self.qa_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.records.clone())
    }
}

#[async_trait]
impl MenuSource for InMemoryStore {
    async fn get_menu(&self, date: NaiveDate) -> Result<Option<String>, BotError> {
        self.menu_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .menus
            .iter()
            .find(|m| m.date == date)
            .map(|m| m.menu.clone()))
    }

    async fn recent_menus(&self, limit: usize) -> Result<Vec<MealRow>, BotError> {
        self.check()?;
        let mut menus = self.menus.clone();
        menus.sort_by(|a, b| b.date.cmp(&a.date));
        menus.truncate(limit);
        Ok(menus)
    }
}

#[async_trait]
impl NoticeSource for InMemoryStore {
    async fn get_recent_notices(&self, limit: usize) -> Result<Vec<Notice>, BotError> {
        self.check()?;
        let mut notices = self.notices.clone();
        notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notices.truncate(limit);
        Ok(notices)
    }
}

// --- Fixtures ---

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A small corpus shaped like the school's real FAQ sheet.
pub fn school_corpus() -> Vec<QaRecord> {
    vec![
        QaRecord::new(
            "방과후 수업 몇시에 끝나요?",
            "방과후는 오후 5시에 끝납니다.",
            Category::Elementary,
        )
        .with_additional_answer("금요일은 오후 4시에 끝납니다."),
        QaRecord::new(
            "담임 선생님과 상담은 어떻게 신청하나요?",
            "하이클래스 앱으로 상담 신청을 해주세요.",
            Category::Elementary,
        ),
        QaRecord::new(
            "병설유치원 등원 시간은 언제인가요?",
            "유치원 등원은 오전 9시까지입니다.",
            Category::Kindergarten,
        ),
        QaRecord::new(
            "학사일정은 어디서 볼 수 있나요?",
            "학사일정은 https://waseok.example.kr/calendar 에서 확인할 수 있습니다.",
            Category::Other,
        ),
        QaRecord::new(
            "급식 알레르기 정보는 어떻게 확인하나요?",
            "식단표의 알레르기 번호를 참고해 주세요.",
            Category::Elementary,
        ),
    ]
}

pub fn build_bot(store: InMemoryStore, provider: MockAiProvider, config: BotConfig) -> SchoolBot {
    SchoolBot::builder()
        .storage(store)
        .ai_provider(Box::new(provider))
        .config(config)
        .build()
        .expect("Failed to build SchoolBot")
}
