//! # School FAQ Chatbot
//!
//! This crate answers parents' and students' questions about one elementary school. An
//! utterance is normalized, filtered, and routed: dated meal questions go to the menu table,
//! notice questions to the notice list, everything else to a keyword-scoring matcher over a
//! curated Q&A corpus. Only when nothing in the corpus matches is an AI provider asked, with
//! a small context built from the school's own data.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use schoolbot::{
//!     providers::{db::sqlite::SqliteProvider, factory::create_provider, factory::ProviderConfig},
//!     BotConfig, SchoolBot,
//! };
//!
//! # async fn run() -> Result<(), schoolbot::BotError> {
//! let storage = SqliteProvider::new("db/school.db").await?;
//! let provider = create_provider(&ProviderConfig {
//!     provider: "local".to_string(),
//!     api_url: Some("http://localhost:1234/v1/chat/completions".to_string()),
//!     ..Default::default()
//! })?;
//! let bot = SchoolBot::builder()
//!     .storage(storage)
//!     .ai_provider(provider)
//!     .config(BotConfig::default())
//!     .build()?;
//! let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
//! println!("{}", bot.handle("방과후 몇시에 끝나요?", "parent-1", today).await);
//! # Ok(())
//! # }
//! ```

pub mod bot;
pub mod classify;
pub mod composer;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod dates;
pub mod errors;
pub mod fallback;
pub mod history;
pub mod lexicon;
pub mod matching;
pub mod normalizer;
pub mod prompts;
pub mod providers;
pub mod types;

pub use bot::{Analysis, SchoolBot, SchoolBotBuilder};
pub use config::{BotConfig, FallbackConfig, MatchingConfig};
pub use errors::BotError;
pub use matching::{MatchingEngine, ScoreBreakdown, ScoredCandidate};
pub use types::{Answer, Category, Intent, QaRecord, Reply, ReplyKind};
