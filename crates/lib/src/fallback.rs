//! # Generation Fallback
//!
//! The last resort when nothing in the corpus matches: one call to the AI provider with a
//! bounded context of recent corpus records, menus and notices. Any failure becomes the fixed
//! apology, so this module never returns an error to the pipeline.

use crate::{
    config::FallbackConfig,
    constants::{render, FALLBACK_DECLINE_MESSAGE, GENERATION_FAILURE_MESSAGE},
    errors::BotError,
    history::truncate_chars,
    prompts::{FALLBACK_SYSTEM_PROMPT, FALLBACK_USER_PROMPT, NO_CONTEXT, NO_HISTORY_CONTEXT},
    providers::ai::AiProvider,
    types::{ConversationTurn, MealRow, Notice, QaRecord},
};
use std::time::Duration;
use tracing::{info, warn};

/// The rows the fallback context is built from. Each list is already bounded by the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackContext<'a> {
    pub records: &'a [QaRecord],
    pub meals: &'a [MealRow],
    pub notices: &'a [Notice],
    pub history: &'a [ConversationTurn],
}

#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    provider: Box<dyn AiProvider>,
    config: FallbackConfig,
    school_name: String,
}

impl FallbackGenerator {
    pub fn new(provider: Box<dyn AiProvider>, config: FallbackConfig, school_name: &str) -> Self {
        Self {
            provider,
            config,
            school_name: school_name.to_string(),
        }
    }

    pub fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// Answers `utterance` from `context`, or returns the fixed apology on any failure.
    pub async fn generate(&self, utterance: &str, context: FallbackContext<'_>) -> String {
        match self.try_generate(utterance, context).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Fallback generation failed: {e}");
                GENERATION_FAILURE_MESSAGE.to_string()
            }
        }
    }

    async fn try_generate(
        &self,
        utterance: &str,
        context: FallbackContext<'_>,
    ) -> Result<String, BotError> {
        let system_prompt = render(FALLBACK_SYSTEM_PROMPT, &self.school_name)
            .replace("{decline}", FALLBACK_DECLINE_MESSAGE);
        let user_prompt = FALLBACK_USER_PROMPT
            .replace("{context}", &self.build_context(&context))
            .replace("{history}", &self.build_history(context.history))
            .replace("{prompt}", utterance.trim());

        info!(
            "Calling the AI provider for a fallback answer ({} chars of prompt).",
            user_prompt.chars().count()
        );
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let raw = tokio::time::timeout(timeout, self.provider.generate(&system_prompt, &user_prompt))
            .await
            .map_err(|_| BotError::AiTimeout(self.config.timeout_secs))??;

        let answer = raw.trim();
        if answer.is_empty() {
            return Err(BotError::AiEmptyResponse);
        }
        Ok(answer.chars().take(self.config.max_answer_chars).collect())
    }

    /// Renders the bounded context block: corpus records, then menus, then notices.
    pub fn build_context(&self, context: &FallbackContext<'_>) -> String {
        let k = self.config.context_rows;
        let mut sections = Vec::new();

        if !context.records.is_empty() {
            let rows = context
                .records
                .iter()
                .take(k)
                .map(|r| format!("Q: {}\nA: {}", r.question.trim(), r.answer.trim()))
                .collect::<Vec<_>>()
                .join("\n\n");
            sections.push(format!("## 자주 묻는 질문\n{rows}"));
        }

        if !context.meals.is_empty() {
            let rows = context
                .meals
                .iter()
                .take(k)
                .map(|m| format!("날짜: {}\n메뉴: {}", m.date.format("%Y-%m-%d"), m.menu.trim()))
                .collect::<Vec<_>>()
                .join("\n\n");
            sections.push(format!("## 최신 식단\n{rows}"));
        }

        if !context.notices.is_empty() {
            let rows = context
                .notices
                .iter()
                .take(k)
                .map(|n| {
                    let body = n.content.as_deref().unwrap_or("");
                    format!(
                        "날짜: {}\n제목: {}\n내용: {}",
                        n.created_at.trim(),
                        n.title.trim(),
                        truncate_chars(body, self.config.notice_body_chars)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n");
            sections.push(format!("## 최신 공지사항\n{rows}"));
        }

        if sections.is_empty() {
            NO_CONTEXT.to_string()
        } else {
            sections.join("\n\n")
        }
    }

    fn build_history(&self, history: &[ConversationTurn]) -> String {
        let skip = history.len().saturating_sub(self.config.history_turns);
        let turns: Vec<String> = history
            .iter()
            .skip(skip)
            .map(|t| format!("사용자: {}\n챗봇: {}", t.user_text.trim(), t.bot_text.trim()))
            .collect();
        if turns.is_empty() {
            NO_HISTORY_CONTEXT.to_string()
        } else {
            turns.join("\n")
        }
    }
}
