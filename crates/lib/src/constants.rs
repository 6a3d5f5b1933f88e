//! # Shared Constants
//!
//! Fixed user-facing messages and storage defaults. Messages containing `{school_name}` are
//! rendered with the configured school name before they are returned.

/// The default path for the SQLite database holding the corpus, menus and notices.
pub const DEFAULT_DB_FILE: &str = "db/school.db";

/// The `meals.meal_type` value of the lunch rows served by the menu lookup.
pub const LUNCH_MEAL_TYPE: &str = "중식";

/// Reply to an empty or whitespace-only utterance.
pub const GREETING_MESSAGE: &str =
    "안녕하세요! {school_name} 챗봇입니다. 급식, 공지사항, 학교 생활에 대해 물어보세요.";

/// Reply when the banned-content filter fires.
pub const BANNED_MESSAGE: &str = "부적절한 내용이 포함되어 있습니다. 다른 질문을 해주세요.";

/// Reply when the utterance is outside the school domain.
pub const OUT_OF_SCOPE_MESSAGE: &str = "{school_name} 관련 질문에만 답변할 수 있습니다.";

/// Reply when fallback generation fails for any reason.
pub const GENERATION_FAILURE_MESSAGE: &str =
    "죄송합니다. 해당 질문에 대한 답변을 찾을 수 없습니다. 다른 질문을 해주세요.";

/// The wording the model must use when the context does not contain the answer.
pub const FALLBACK_DECLINE_MESSAGE: &str = "죄송합니다. 해당 정보는 데이터베이스에 없습니다.";

/// Lead-in sentence that replaces an answer body when the answer carries a link.
pub const LINK_LEAD_MESSAGE: &str = "자세한 내용은 아래 링크를 확인해 주세요.";

/// Heading placed above `additional_answer`.
pub const ADDITIONAL_INFO_HEADING: &str = "추가 정보:";

/// Reply when there are no notices to list.
pub const NO_NOTICES_MESSAGE: &str = "현재 등록된 공지사항이 없습니다.";

/// Header of the notice list.
pub const NOTICES_HEADER: &str = "최신 공지사항입니다:";

/// Reply when the notice table could not be read.
pub const NOTICES_UNAVAILABLE_MESSAGE: &str =
    "공지사항을 불러오지 못했습니다. 잠시 후 다시 시도해주세요.";

/// Reply when the menu table could not be read.
pub const MEAL_UNAVAILABLE_MESSAGE: &str =
    "식단 정보를 불러오지 못했습니다. 잠시 후 다시 시도해주세요.";

/// Rendered by `ConversationLog::summary` when a user has no turns yet.
pub const NO_HISTORY_MESSAGE: &str = "대화 기록이 없습니다.";

/// Fixed small-talk replies, consulted in order after a corpus miss.
pub const SMALL_TALK_REPLIES: &[(&str, &str)] = &[
    ("안녕", "안녕하세요! {school_name} 챗봇입니다. 무엇을 도와드릴까요?"),
    (
        "도움",
        "{school_name} 관련 질문에 답변해드립니다. 급식, 방과후, 상담, 전학 등에 대해 물어보세요.",
    ),
    ("감사", "도움이 되어서 기쁩니다! 다른 질문이 있으시면 언제든 말씀해주세요."),
    ("고마워", "천만에요! 더 궁금한 점이 있으시면 언제든 물어보세요."),
    ("고맙", "천만에요! 더 궁금한 점이 있으시면 언제든 물어보세요."),
];

/// Korean weekday names indexed by `Weekday::num_days_from_monday`.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "월요일", "화요일", "수요일", "목요일", "금요일", "토요일", "일요일",
];

/// Renders a message template with the configured school name.
pub fn render(template: &str, school_name: &str) -> String {
    template.replace("{school_name}", school_name)
}
