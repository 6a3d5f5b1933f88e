//! # Storage Traits
//!
//! The three read interfaces the bot consumes. They are separate traits so a deployment (or a
//! test) can back each one differently; `SqliteProvider` implements all three.

use crate::{
    errors::BotError,
    types::{MealRow, Notice, QaRecord},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Source of the curated Q&A corpus.
#[async_trait]
pub trait QaSource: Send + Sync + DynClone + Debug {
    /// Returns every record, in corpus order. Corpus order is the matcher's tie-break.
    async fn list_qa_records(&self) -> Result<Vec<QaRecord>, BotError>;
}

/// Source of the daily lunch menus.
#[async_trait]
pub trait MenuSource: Send + Sync + DynClone + Debug {
    /// The lunch menu served on `date`, or `None` if no menu is registered for that day.
    async fn get_menu(&self, date: NaiveDate) -> Result<Option<String>, BotError>;

    /// The `limit` most recent lunch rows, newest first. Used as fallback context.
    async fn recent_menus(&self, limit: usize) -> Result<Vec<MealRow>, BotError>;
}

/// Source of the school's published notices.
#[async_trait]
pub trait NoticeSource: Send + Sync + DynClone + Debug {
    /// The `limit` most recent notices, newest first.
    async fn get_recent_notices(&self, limit: usize) -> Result<Vec<Notice>, BotError>;
}

dyn_clone::clone_trait_object!(QaSource);
dyn_clone::clone_trait_object!(MenuSource);
dyn_clone::clone_trait_object!(NoticeSource);
