//! # Keyword Tables
//!
//! Every fixed word list consulted by the normalizer, the classifiers and the matcher.
//! Entries are lower-case and written the way they appear *after* punctuation stripping.
//! The matcher and the classifiers only ever use substring containment on these entries.

/// Many-to-one synonym table: `(canonical, surface variants)`.
///
/// The canonical terms double as the important keywords of the matcher.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("방과후", &["방과후학교", "방과 후 학교", "방과후교실", "방과 후", "애프터스쿨"]),
    (
        "급식",
        &["급식메뉴", "급식 메뉴", "점심메뉴", "점심 메뉴", "식단표", "식단", "학교밥", "점심밥", "중식"],
    ),
    ("학사일정", &["학사 일정", "학교 일정", "학교일정", "학년도 일정"]),
    ("전학", &["전입학", "전출", "전입"]),
    ("결석", &["질병결석", "병결", "결석계", "결석신고서", "결석신고", "결석 신고"]),
    (
        "체험학습",
        &["교외체험학습", "교외 체험학습", "현장체험학습", "현장 체험학습", "현장학습", "현장 학습", "체험 학습"],
    ),
    ("재학증명서", &["재학 증명서", "재학증명", "재학 증명"]),
    ("성적표", &["학교생활통지표", "생활통지표", "성적통지표", "성적 통지표", "통지표"]),
    ("늘봄", &["늘봄학교", "늘봄교실"]),
    ("돌봄", &["돌봄교실"]),
    ("상담", &["상담신청", "면담"]),
    ("학교폭력", &["학교 폭력", "학폭"]),
    ("등하교", &["등 하교", "등교", "하교"]),
    ("보건실", &["양호실", "보건 교실"]),
    ("행정실", &["서무실"]),
    ("분실물", &["분실 물품", "분실물품", "잃어버린 물건"]),
    ("입학", &["취학"]),
];

/// Important keywords that are not synonym canonicals.
pub const EXTRA_IMPORTANT_KEYWORDS: &[&str] = &["유치원", "졸업", "교무실", "도서실"];

/// Particles and interrogative pronouns dropped from the overlap token set.
pub const STOPWORDS: &[&str] = &[
    "은", "는", "이", "가", "을", "를", "에", "의", "도", "로", "과", "와", "에서", "에게", "한",
    "하다", "있다", "어떻게", "무엇", "어디", "언제", "왜", "누구", "뭐", "좀", "그", "저",
];

/// Trailing particles trimmed from a token, longest first. A suffix is only trimmed when at
/// least two characters remain.
pub const PARTICLE_SUFFIXES: &[&str] = &[
    "에서는", "인가요", "에서", "에게", "으로", "까지", "부터", "나요", "은", "는", "이", "가",
    "을", "를", "에", "의", "도", "로", "요",
];

/// Profanity and abuse. Matched against the lower-cased raw text.
pub const BANNED_WORDS: &[&str] = &[
    "시발", "씨발", "ㅅㅂ", "병신", "ㅂㅅ", "개새끼", "바보", "멍청", "꺼져", "닥쳐", "죽어",
    "존나", "미친놈", "fuck", "shit",
];

/// Legitimate sensitive terms; any of these overrides the banned list.
pub const BANNED_ALLOW_LIST: &[&str] = &["학교폭력", "상담", "문의", "도움", "안내"];

/// School entities, roles, facilities and academic-life terms.
pub const SCHOOL_KEYWORDS: &[&str] = &[
    "와석초", "학교", "선생", "교사", "담임", "학년", "학생", "급식", "식단", "메뉴", "점심",
    "방과후", "하교", "등교", "교실", "학사", "수업", "상담", "교무실", "교장", "교감", "유치원",
    "돌봄", "늘봄", "학부모", "행정실", "시설", "공지", "알림", "방학", "전학", "입학", "졸업",
    "체험", "결석", "출석", "교재", "교과서", "도서실", "분실물", "쉼터", "보건", "성적", "증명서",
];

/// Interrogative and procedural pattern words.
pub const QUESTION_PATTERNS: &[&str] = &[
    "언제", "어디", "어떻게", "몇시", "얼마", "무엇", "누구", "어떤", "절차", "신청", "발급",
    "연락", "문의", "안내", "정보", "위치", "시간", "비용", "필요한 서류", "기간", "방법",
    "연락처", "재발급", "첨부", "사진", "파일", "양식", "신청서", "보고서",
];

/// Greeting, thanks and help terms; enough on their own to count as in-domain.
/// Short loanwords are left out since they occur inside unrelated words.
pub const GREETING_TERMS: &[&str] = &["안녕", "반가워", "반갑", "감사", "고마워", "고맙", "도움"];

/// Per-intent keyword lists, in tie-break priority order.
pub const TIME_KEYWORDS: &[&str] = &[
    "언제", "몇시", "몇 시", "시간", "날짜", "기간", "일정", "요일", "마감", "시작", "끝나", "끝날",
];
pub const LOCATION_KEYWORDS: &[&str] = &[
    "어디", "위치", "장소", "몇층", "몇 층", "찾아가", "주소", "가는 길", "어느 건물",
];
pub const PROCEDURE_KEYWORDS: &[&str] = &[
    "어떻게", "방법", "절차", "신청", "발급", "제출", "서류", "준비물", "등록", "접수",
];
pub const INFORMATION_KEYWORDS: &[&str] = &[
    "뭐", "무엇", "알려", "정보", "안내", "궁금", "내용", "있나요", "있어",
];

/// Per-category keyword lists, in tie-break priority order.
pub const ELEMENTARY_KEYWORDS: &[&str] = &[
    "초등", "학년", "담임", "방과후", "늘봄", "돌봄", "학생", "교과서",
];
pub const KINDERGARTEN_KEYWORDS: &[&str] = &["유치원", "유아", "원아", "병설", "원복"];
pub const ATTACHMENT_KEYWORDS: &[&str] = &[
    "첨부", "사진", "파일", "양식", "이미지", "서식", "배치도", "다운로드",
];

/// Markers looked for in an answer's text, per intent.
pub const TIME_ANSWER_MARKERS: &[&str] = &["시", "분", "월", "년"];
pub const LOCATION_ANSWER_MARKERS: &[&str] = &[
    "층", "위치", "건물", "교실", "옆", "앞", "입구", "정문", "후문",
];
pub const PROCEDURE_ANSWER_MARKERS: &[&str] = &[
    "신청", "제출", "방법", "절차", "접수", "작성", "서류", "방문",
];
pub const INFORMATION_ANSWER_MARKERS: &[&str] = &["안내", "입니다", "있습니다", "참고"];

/// Keywords that route an utterance to the meal branch. Matched on the raw text.
pub const MEAL_KEYWORDS: &[&str] = &["급식", "식단", "밥", "점심", "메뉴", "중식"];

/// Keywords that route an utterance to the notice branch. Matched on the raw text.
pub const NOTICE_KEYWORDS: &[&str] = &["공지", "알림", "소식", "뉴스"];

/// A colloquial phrasing cluster paired with the formal question phrasings it stands for.
#[derive(Debug, Clone, Copy)]
pub struct ContextPattern {
    pub user_phrases: &'static [&'static str],
    pub question_phrases: &'static [&'static str],
}

/// Bridges for colloquial phrasings whose literal keyword overlap with the corpus is zero.
///
/// User phrases also make an utterance in-domain, so each must be specific enough not to
/// occur inside unrelated words (bare "아파" is inside "아파트").
pub const CONTEXT_PATTERNS: &[ContextPattern] = &[
    ContextPattern {
        user_phrases: &["뭐 먹", "뭐먹", "밥 뭐", "점심 뭐", "배고파", "뭐 나와"],
        question_phrases: &["급식", "식단"],
    },
    ContextPattern {
        user_phrases: &[
            "선생님 만나", "선생님이랑 얘기", "선생님과 얘기", "선생님과 이야기", "선생님이랑 이야기",
            "담임 만나", "선생님 뵙", "선생님께 말씀",
        ],
        question_phrases: &["상담"],
    },
    ContextPattern {
        user_phrases: &[
            "아파서", "아파요", "배 아파", "머리 아파", "아프면", "아프고", "아프다", "아픈", "아팠",
            "병원", "열이 나", "감기", "몸이 안 좋",
        ],
        question_phrases: &["결석", "보건실"],
    },
    ContextPattern {
        user_phrases: &["괴롭", "때려", "때리", "따돌", "왕따", "놀려"],
        question_phrases: &["학교폭력"],
    },
    ContextPattern {
        user_phrases: &["이사", "다른 학교로", "학교를 옮", "학교 옮"],
        question_phrases: &["전학"],
    },
    ContextPattern {
        user_phrases: &["데리러", "픽업", "태워다", "차로 데려", "차 세울", "주차"],
        question_phrases: &["등하교", "정차"],
    },
    ContextPattern {
        user_phrases: &["잃어버", "없어졌", "두고 왔"],
        question_phrases: &["분실물"],
    },
    ContextPattern {
        user_phrases: &["늦게까지 맡", "맡길 곳", "퇴근 늦", "맞벌이"],
        question_phrases: &["돌봄", "늘봄"],
    },
    ContextPattern {
        user_phrases: &["견학", "소풍", "놀러 가"],
        question_phrases: &["체험학습"],
    },
    ContextPattern {
        user_phrases: &["점수", "성적 확인", "성적 어떻게"],
        question_phrases: &["성적표", "평가"],
    },
];

/// Returns true if `text` contains any of `terms`.
pub fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

/// Counts how many distinct entries of `terms` occur in `text`.
pub fn count_present(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text.contains(*term)).count()
}

/// Every important keyword: the synonym canonicals followed by the extras.
pub fn important_keywords() -> impl Iterator<Item = &'static str> {
    SYNONYMS
        .iter()
        .map(|(canonical, _)| *canonical)
        .chain(EXTRA_IMPORTANT_KEYWORDS.iter().copied())
}
