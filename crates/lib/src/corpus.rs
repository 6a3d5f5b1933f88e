//! # Corpus Snapshots
//!
//! The matcher scans an immutable [`Corpus`]: the Q&A records plus each question's
//! normalized form, computed once when the snapshot is built. [`CorpusCache`] holds the
//! current snapshot behind an `Arc`; a reload builds a new snapshot and swaps it in with a
//! single write, so a scan that already holds the old `Arc` is never affected.

use crate::{
    errors::BotError,
    normalizer::{NormalizedText, TextNormalizer},
    providers::db::storage::QaSource,
    types::QaRecord,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// A record paired with its normalized question.
#[derive(Debug, Clone)]
pub struct IndexedRecord {
    pub record: QaRecord,
    pub question: NormalizedText,
}

/// An immutable, pre-normalized snapshot of the Q&A corpus.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<IndexedRecord>,
}

impl Corpus {
    /// Normalizes every question. A record with a blank question is a schema error.
    pub fn build(records: Vec<QaRecord>, normalizer: &TextNormalizer) -> Result<Self, BotError> {
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                if record.question.trim().is_empty() {
                    return Err(BotError::MalformedCorpus(format!(
                        "record #{position} has an empty question"
                    )));
                }
                let question = normalizer.normalize(&record.question);
                Ok(IndexedRecord { record, question })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[IndexedRecord] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &QaRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Holds the current corpus snapshot, loading it lazily on first use.
#[derive(Debug, Default)]
pub struct CorpusCache {
    current: RwLock<Option<Arc<Corpus>>>,
}

impl CorpusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot, loading it from `source` if none is loaded yet.
    ///
    /// A failed load is logged and answered with an empty corpus, which sends the caller to
    /// the generation fallback. The failure is not cached, so the next request retries.
    pub async fn snapshot(
        &self,
        source: &dyn QaSource,
        normalizer: &TextNormalizer,
    ) -> Arc<Corpus> {
        if let Some(corpus) = self.current.read().await.as_ref() {
            return corpus.clone();
        }

        match self.reload(source, normalizer).await {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!("Failed to load the Q&A corpus: {e}");
                Arc::new(Corpus::empty())
            }
        }
    }

    /// Reads the whole corpus from `source` and swaps it in as the current snapshot.
    pub async fn reload(
        &self,
        source: &dyn QaSource,
        normalizer: &TextNormalizer,
    ) -> Result<Arc<Corpus>, BotError> {
        let records = source.list_qa_records().await?;
        let corpus = Arc::new(Corpus::build(records, normalizer)?);
        info!("Loaded Q&A corpus snapshot with {} records.", corpus.len());
        *self.current.write().await = Some(corpus.clone());
        Ok(corpus)
    }

    /// Swaps in an already built snapshot.
    pub async fn replace(&self, corpus: Corpus) -> Arc<Corpus> {
        let corpus = Arc::new(corpus);
        *self.current.write().await = Some(corpus.clone());
        corpus
    }
}
