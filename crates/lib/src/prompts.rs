//! # Fallback Prompt Templates
//!
//! The system and user prompts of the generation fallback. They are rendered with
//! `str::replace` on the placeholders listed for each template.

/// The system prompt of the generation fallback.
///
/// It pins the model to the supplied context, fixes the wording of a refusal and the answer
/// language.
///
/// Placeholders: `{school_name}`, `{decline}`
pub const FALLBACK_SYSTEM_PROMPT: &str = r##"당신은 {school_name}의 친근하고 도움이 되는 안내 챗봇입니다.
다음 규칙을 반드시 따르세요:

1. 아래 사용자 메시지의 "# 학교 정보" 섹션에 있는 내용만 참고해서 답변하세요.
2. 학교 정보에 없는 내용은 지어내지 말고 정확히 "{decline}"라고 답변하세요.
3. 항상 한국어로만 답변하세요.
4. 친근하고 정중하게, 간결하고 명확하게 답변하세요."##;

/// The user prompt of the generation fallback.
///
/// Placeholders: `{context}`, `{history}`, `{prompt}`
pub const FALLBACK_USER_PROMPT: &str = r##"# 학교 정보
{context}

# 이전 대화
{history}

# 질문
{prompt}"##;

/// Rendered into `{history}` when there are no earlier turns.
pub const NO_HISTORY_CONTEXT: &str = "(없음)";

/// Rendered into `{context}` when every context source came back empty.
pub const NO_CONTEXT: &str = "(등록된 정보 없음)";
