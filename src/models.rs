//! Predefined model identifiers served through the Ark endpoint.

pub const DEEPSEEK_R1: &str = "deepseek-r1-250528";
pub const GPT_4: &str = "gpt-4";
pub const GPT_35_TURBO: &str = "gpt-3.5-turbo";
pub const CLAUDE_3_SONNET: &str = "claude-3-sonnet-20240229";
pub const CLAUDE_3_HAIKU: &str = "claude-3-haiku-20240307";

/// All predefined identifiers.
pub const ALL: [&str; 5] = [
    DEEPSEEK_R1,
    GPT_4,
    GPT_35_TURBO,
    CLAUDE_3_SONNET,
    CLAUDE_3_HAIKU,
];

pub fn is_known(model: &str) -> bool {
    ALL.contains(&model)
}
