use crate::{
    constants::LUNCH_MEAL_TYPE,
    errors::BotError,
    providers::db::storage::{MenuSource, NoticeSource, QaSource},
    types::{Category, MealRow, Notice, QaRecord},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::{self, Debug};
use tracing::{debug, info, warn};
use turso::{Connection, Database, Row, Value as TursoValue};

pub mod sql;

/// Row counts of the three application tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableCounts {
    pub qa_records: u64,
    pub meals: u64,
    pub notices: u64,
}

/// A provider for the school's local SQLite database, using Turso.
///
/// This provider holds a `Database` instance, which manages a connection pool.
/// When cloned, it shares the same underlying database, so an in-memory database can be
/// seeded through one clone and read through another.
#[derive(Clone)]
pub struct SqliteProvider {
    /// The Turso database instance. It's cloneable and thread-safe.
    pub db: Database,
}

impl SqliteProvider {
    /// Opens the database at `db_path`. Use ":memory:" for an isolated in-memory database.
    pub async fn new(db_path: &str) -> Result<Self, BotError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| BotError::StorageConnection(e.to_string()))?;

        // Use `query` for PRAGMA statements that return a value to avoid "unexpected row" errors.
        let conn = db
            .connect()
            .map_err(|e| BotError::StorageConnection(e.to_string()))?;
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| BotError::StorageConnection(e.to_string()))?;

        info!("Opened SQLite database at '{db_path}'.");
        Ok(Self { db })
    }

    fn connect(&self) -> Result<Connection, BotError> {
        self.db
            .connect()
            .map_err(|e| BotError::StorageConnection(e.to_string()))
    }

    /// Executes a batch of `;`-separated statements, e.g. seed data. A `;` inside a
    /// single-quoted literal does not end a statement; SQL comments are not supported.
    pub async fn initialize_with_data(&self, init_sql: &str) -> Result<(), BotError> {
        let conn = self.connect()?;
        for statement in sql::split_statements(init_sql) {
            conn.execute(statement, ())
                .await
                .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Ensures that all application tables and indexes exist. Idempotent.
    pub async fn initialize_schema(&self) -> Result<(), BotError> {
        let conn = self.connect()?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ())
                .await
                .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?;
        }
        Ok(())
    }

    pub async fn count_qa_records(&self) -> Result<u64, BotError> {
        self.count("qa_data").await
    }

    pub async fn table_counts(&self) -> Result<TableCounts, BotError> {
        Ok(TableCounts {
            qa_records: self.count("qa_data").await?,
            meals: self.count("meals").await?,
            notices: self.count("notices").await?,
        })
    }

    async fn count(&self, table: &str) -> Result<u64, BotError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(&sql::count_rows(table), ())
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?;
        let row = rows
            .next()
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?;
        match row.map(|row| row.get_value(0)).transpose() {
            Ok(Some(TursoValue::Integer(n))) => Ok(n.max(0) as u64),
            Ok(_) => Ok(0),
            Err(e) => Err(BotError::StorageOperationFailed(e.to_string())),
        }
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider").finish_non_exhaustive()
    }
}

/// Reads a column as text. `NULL` becomes `None`; numbers are rendered.
fn text_at(row: &Row, index: usize) -> Result<Option<String>, BotError> {
    let value = row
        .get_value(index)
        .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?;
    Ok(match value {
        TursoValue::Text(s) => Some(s),
        TursoValue::Integer(i) => Some(i.to_string()),
        TursoValue::Real(f) => Some(f.to_string()),
        TursoValue::Null | TursoValue::Blob(_) => None,
    })
}

#[async_trait]
impl QaSource for SqliteProvider {
    async fn list_qa_records(&self) -> Result<Vec<QaRecord>, BotError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(sql::SELECT_QA_RECORDS, ())
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?
        {
            let question = text_at(&row, 0)?.unwrap_or_default();
            if question.trim().is_empty() {
                return Err(BotError::MalformedCorpus(format!(
                    "qa_data row #{} has an empty question",
                    records.len() + 1
                )));
            }
            let answer = text_at(&row, 1)?.unwrap_or_default();
            let additional_answer = text_at(&row, 2)?.filter(|a| !a.trim().is_empty());
            let category = text_at(&row, 3)?
                .map(|c| Category::parse(&c))
                .unwrap_or_default();
            records.push(QaRecord {
                question,
                answer,
                additional_answer,
                category,
            });
        }

        debug!("Read {} rows from qa_data.", records.len());
        Ok(records)
    }
}

#[async_trait]
impl MenuSource for SqliteProvider {
    async fn get_menu(&self, date: NaiveDate) -> Result<Option<String>, BotError> {
        let conn = self.connect()?;
        let params = vec![
            TursoValue::Text(date.format("%Y-%m-%d").to_string()),
            TursoValue::Text(LUNCH_MEAL_TYPE.to_string()),
        ];
        let mut rows = conn
            .query(sql::SELECT_MENU_BY_DATE, params)
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?;

        match rows
            .next()
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?
        {
            Some(row) => Ok(text_at(&row, 0)?.filter(|menu| !menu.trim().is_empty())),
            None => Ok(None),
        }
    }

    async fn recent_menus(&self, limit: usize) -> Result<Vec<MealRow>, BotError> {
        let conn = self.connect()?;
        let params = vec![TursoValue::Text(LUNCH_MEAL_TYPE.to_string())];
        let mut rows = conn
            .query(&sql::select_recent_menus(limit), params)
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?;

        let mut meals = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?
        {
            let raw_date = text_at(&row, 0)?.unwrap_or_default();
            let Ok(date) = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d") else {
                warn!("Skipping meal row with unparseable date '{raw_date}'.");
                continue;
            };
            let menu = text_at(&row, 1)?.unwrap_or_default();
            meals.push(MealRow { date, menu });
        }
        Ok(meals)
    }
}

#[async_trait]
impl NoticeSource for SqliteProvider {
    async fn get_recent_notices(&self, limit: usize) -> Result<Vec<Notice>, BotError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(&sql::select_recent_notices(limit), ())
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?;

        let mut notices = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| BotError::StorageOperationFailed(e.to_string()))?
        {
            notices.push(Notice {
                title: text_at(&row, 0)?.unwrap_or_default(),
                created_at: text_at(&row, 1)?.unwrap_or_default(),
                content: text_at(&row, 2)?,
            });
        }
        Ok(notices)
    }
}
