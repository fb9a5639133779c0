//! Prompt construction for the essay endpoint.

use serde::{Deserialize, Serialize};

/// Kind of 申论 (civil-service exam essay) to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EssayType {
    Analysis,
    Countermeasure,
    Implementation,
    #[default]
    Comprehensive,
}

impl EssayType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis => "分析论证类申论",
            Self::Countermeasure => "对策建议类申论",
            Self::Implementation => "贯彻执行类申论",
            Self::Comprehensive => "综合分析类申论",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Analysis => "请深入分析问题的原因、影响和内在逻辑，提出分析论证",
            Self::Countermeasure => "请针对问题提出具体可行的对策建议和解决方案",
            Self::Implementation => "请制定详细的实施方案和贯彻执行措施",
            Self::Comprehensive => "请进行全面的综合分析，包括现状、问题、原因和对策",
        }
    }
}

pub const DEFAULT_WORD_COUNT: u32 = 1000;
/// Floor for `max_tokens` on essay requests.
pub const MIN_ESSAY_MAX_TOKENS: u32 = 2000;

pub fn build_prompt(topic: &str, essay_type: EssayType, word_count: u32) -> String {
    format!(
        "请你以一名专业公务员的身份，针对\"{topic}\"这个主题，写一篇看起来像{label}的文章。\n\
         \n\
         要求：\n\
         1. 字数约{word_count}字，严格控制误差不超过50字\n\
         2. {instruction}；内容不需要有深度，用大量的申论句式堆砌即可，需要对{topic}保持肯定的态度\n\
         3. 回复的内容只需要包含标题和文章内容，以纯文本形式回复，每段开头空两格\n",
        topic = topic,
        label = essay_type.label(),
        instruction = essay_type.instruction(),
        word_count = word_count,
    )
}

/// `max(word_count * 1.5, 2000)`, rounded up.
pub fn max_tokens_for(word_count: u32) -> u32 {
    let scaled = (u64::from(word_count) * 3).div_ceil(2);
    scaled.min(u64::from(u32::MAX)).max(u64::from(MIN_ESSAY_MAX_TOKENS)) as u32
}

/// Character count excluding whitespace (CJK text has no word separators).
pub fn count_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}
