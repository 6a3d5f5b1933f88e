//! # SchoolBot
//!
//! The single entry point: one utterance in, one plain-text answer out. The branches are
//! tried in a fixed order, and every branch that touches storage or the AI provider turns
//! failures into fixed messages, so [`SchoolBot::handle`] never fails.

use crate::{
    classify::{CategoryClassifier, DomainFilter, IntentClassifier},
    composer::ResponseComposer,
    config::BotConfig,
    constants::{
        render, BANNED_MESSAGE, GREETING_MESSAGE, MEAL_UNAVAILABLE_MESSAGE,
        NOTICES_UNAVAILABLE_MESSAGE, OUT_OF_SCOPE_MESSAGE, SMALL_TALK_REPLIES,
    },
    corpus::{Corpus, CorpusCache},
    dates::{is_weekend, DateExtractor},
    errors::BotError,
    fallback::{FallbackContext, FallbackGenerator},
    history::ConversationLog,
    lexicon::{contains_any, MEAL_KEYWORDS, NOTICE_KEYWORDS},
    matching::{MatchingEngine, ScoredCandidate},
    normalizer::TextNormalizer,
    providers::{
        ai::AiProvider,
        db::storage::{MenuSource, NoticeSource, QaSource},
    },
    types::{Category, NormalizedQuery, Reply, ReplyKind},
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The per-utterance analysis, exposed for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub query: NormalizedQuery,
    pub preferred: Option<Category>,
}

/// A builder for creating a `SchoolBot`.
#[derive(Default)]
pub struct SchoolBotBuilder {
    qa_source: Option<Box<dyn QaSource>>,
    menu_source: Option<Box<dyn MenuSource>>,
    notice_source: Option<Box<dyn NoticeSource>>,
    ai_provider: Option<Box<dyn AiProvider>>,
    config: BotConfig,
}

impl SchoolBotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn qa_source(mut self, source: Box<dyn QaSource>) -> Self {
        self.qa_source = Some(source);
        self
    }

    pub fn menu_source(mut self, source: Box<dyn MenuSource>) -> Self {
        self.menu_source = Some(source);
        self
    }

    pub fn notice_source(mut self, source: Box<dyn NoticeSource>) -> Self {
        self.notice_source = Some(source);
        self
    }

    /// Sets one backend for all three storage interfaces, e.g. a `SqliteProvider`.
    pub fn storage<S>(self, storage: S) -> Self
    where
        S: QaSource + MenuSource + NoticeSource + Clone + 'static,
    {
        self.qa_source(Box::new(storage.clone()))
            .menu_source(Box::new(storage.clone()))
            .notice_source(Box::new(storage))
    }

    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    pub fn config(mut self, config: BotConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the `SchoolBot`.
    ///
    /// Fails if a collaborator is missing or the configuration is invalid.
    pub fn build(self) -> Result<SchoolBot, BotError> {
        self.config.validate()?;
        let qa_source = self.qa_source.ok_or(BotError::MissingStorage("qa_source"))?;
        let menu_source = self
            .menu_source
            .ok_or(BotError::MissingStorage("menu_source"))?;
        let notice_source = self
            .notice_source
            .ok_or(BotError::MissingStorage("notice_source"))?;
        let ai_provider = self.ai_provider.ok_or_else(|| {
            BotError::MissingAiProvider("no AI provider was given to the builder".to_string())
        })?;

        Ok(SchoolBot {
            normalizer: TextNormalizer::new()?,
            domain: DomainFilter::new(),
            intent: IntentClassifier::new(),
            category: CategoryClassifier::new(),
            dates: DateExtractor::new()?,
            engine: MatchingEngine::new(self.config.matching.clone())?,
            composer: ResponseComposer::new()?,
            fallback: FallbackGenerator::new(
                ai_provider,
                self.config.fallback.clone(),
                &self.config.school_name,
            ),
            history: ConversationLog::new(self.config.history_limit)
                .with_max_users(self.config.history_max_users),
            corpus: CorpusCache::new(),
            qa_source,
            menu_source,
            notice_source,
            config: self.config,
        })
    }
}

/// The chatbot decision core with its storage and AI collaborators.
#[derive(Debug)]
pub struct SchoolBot {
    normalizer: TextNormalizer,
    domain: DomainFilter,
    intent: IntentClassifier,
    category: CategoryClassifier,
    dates: DateExtractor,
    engine: MatchingEngine,
    composer: ResponseComposer,
    fallback: FallbackGenerator,
    history: ConversationLog,
    corpus: CorpusCache,
    qa_source: Box<dyn QaSource>,
    menu_source: Box<dyn MenuSource>,
    notice_source: Box<dyn NoticeSource>,
    config: BotConfig,
}

impl SchoolBot {
    pub fn builder() -> SchoolBotBuilder {
        SchoolBotBuilder::new()
    }

    /// Answers one utterance. `reference_date` is "today" for relative date words.
    pub async fn handle(&self, utterance: &str, user_id: &str, reference_date: NaiveDate) -> String {
        self.reply(utterance, user_id, reference_date).await.text
    }

    /// Same as [`handle`](Self::handle), also reporting which branch answered.
    pub async fn reply(&self, utterance: &str, user_id: &str, reference_date: NaiveDate) -> Reply {
        let reply = self.route(utterance, user_id, reference_date).await;
        info!(user_id = %user_id, kind = ?reply.kind, "Answered utterance.");
        self.history
            .append(user_id, utterance, &reply.text, Utc::now())
            .await;
        reply
    }

    async fn route(&self, utterance: &str, user_id: &str, reference_date: NaiveDate) -> Reply {
        let school = self.config.school_name.as_str();

        if utterance.trim().is_empty() {
            return Reply::new(render(GREETING_MESSAGE, school), ReplyKind::Empty);
        }

        let verdict = self.domain.check(utterance);
        if verdict.banned {
            return Reply::new(BANNED_MESSAGE, ReplyKind::Banned);
        }
        if !verdict.in_domain {
            return Reply::new(render(OUT_OF_SCOPE_MESSAGE, school), ReplyKind::OutOfScope);
        }

        let Analysis { query, preferred } = self.analyze(utterance, reference_date);
        let lowered = utterance.to_lowercase();
        let asks_meal = contains_any(&lowered, MEAL_KEYWORDS);

        if asks_meal {
            if let Some(date) = query.detected_date {
                return Reply::new(self.meal_reply(date).await, ReplyKind::Meal);
            }
        }

        let corpus = self.corpus.snapshot(self.qa_source.as_ref(), &self.normalizer).await;
        let best = self.engine.best_match(&query, preferred, &corpus);

        // A dated meal question never reaches here; an undated one prefers the corpus.
        if asks_meal {
            if let Some(candidate) = &best {
                return self.corpus_reply(candidate);
            }
        }

        if contains_any(&lowered, NOTICE_KEYWORDS) {
            return Reply::new(self.notices_reply().await, ReplyKind::Notices);
        }

        if let Some(candidate) = &best {
            return self.corpus_reply(candidate);
        }

        if let Some((_, template)) = SMALL_TALK_REPLIES
            .iter()
            .find(|(keyword, _)| utterance.contains(keyword))
        {
            return Reply::new(render(template, school), ReplyKind::SmallTalk);
        }

        let text = self.fallback_reply(utterance, user_id, &corpus).await;
        Reply::new(text, ReplyKind::Fallback)
    }

    /// Normalizes and classifies an utterance without touching any collaborator.
    pub fn analyze(&self, utterance: &str, reference_date: NaiveDate) -> Analysis {
        let normalized = self.normalizer.normalize(utterance);
        let intent = self.intent.classify(&normalized.text);
        let detected_date = self.dates.extract(utterance, reference_date);
        let preferred = self.category.preferred(utterance);
        debug!(
            normalized = %normalized.text,
            ?intent,
            ?detected_date,
            ?preferred,
            "Analyzed utterance."
        );
        Analysis {
            query: normalized.into_query(utterance, detected_date, intent),
            preferred,
        }
    }

    fn corpus_reply(&self, candidate: &ScoredCandidate<'_>) -> Reply {
        info!(
            question = %candidate.record.question,
            score = candidate.score,
            "Matched a corpus record."
        );
        let text = self.composer.compose(candidate.record).into_text();
        Reply::new(
            text,
            ReplyKind::Corpus {
                score: candidate.score,
            },
        )
    }

    async fn meal_reply(&self, date: NaiveDate) -> String {
        if is_weekend(date) {
            return self.composer.weekend_meal(date);
        }
        match self.menu_source.get_menu(date).await {
            Ok(Some(menu)) => self.composer.meal(date, &menu),
            Ok(None) => self.composer.meal_not_registered(date),
            Err(e) => {
                warn!("Failed to read the menu for {date}: {e}");
                MEAL_UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }

    async fn notices_reply(&self) -> String {
        match self
            .notice_source
            .get_recent_notices(self.config.notice_limit)
            .await
        {
            Ok(notices) => self.composer.notices(&notices),
            Err(e) => {
                warn!("Failed to read notices: {e}");
                NOTICES_UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }

    async fn fallback_reply(&self, utterance: &str, user_id: &str, corpus: &Corpus) -> String {
        let k = self.fallback.config().context_rows;
        let records: Vec<_> = corpus.records().take(k).cloned().collect();
        let meals = self.menu_source.recent_menus(k).await.unwrap_or_else(|e| {
            warn!("Leaving menus out of the fallback context: {e}");
            Vec::new()
        });
        let notices = self
            .notice_source
            .get_recent_notices(k)
            .await
            .unwrap_or_else(|e| {
                warn!("Leaving notices out of the fallback context: {e}");
                Vec::new()
            });
        let history = self
            .history
            .recent(user_id, self.fallback.config().history_turns)
            .await;

        self.fallback
            .generate(
                utterance,
                FallbackContext {
                    records: &records,
                    meals: &meals,
                    notices: &notices,
                    history: &history,
                },
            )
            .await
    }

    /// Re-reads the corpus and swaps the new snapshot in.
    pub async fn reload_corpus(&self) -> Result<usize, BotError> {
        let corpus = self
            .corpus
            .reload(self.qa_source.as_ref(), &self.normalizer)
            .await?;
        Ok(corpus.len())
    }

    /// The current corpus snapshot, loading it on first use.
    pub async fn corpus(&self) -> Arc<Corpus> {
        self.corpus
            .snapshot(self.qa_source.as_ref(), &self.normalizer)
            .await
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    pub fn history(&self) -> &ConversationLog {
        &self.history
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }
}
