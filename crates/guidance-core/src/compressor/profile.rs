//! Structure-preservation profiles

use serde_json::{json, Map, Value};

/// Which preserved-token set and tuning a request uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Heading, list and code markers. Used by the CLI and the hook.
    #[default]
    Standard,
    /// Full markdown structure plus fenced-language names and sentence-level
    /// tuning. Used by the one-shot command.
    Rich,
}

const STANDARD_TOKENS: &[&str] = &["\n", "#", "-", "*", "`", "##", "###"];

const RICH_TOKENS: &[&str] = &[
    "\n", "#", "-", "*", "`", "```", "**", "__", "|", ">", "[", "]", "(", ")", "md", "bash",
    "markdown", "yaml", "json",
];

impl Profile {
    pub fn preserve_tokens(&self) -> Vec<String> {
        let tokens = match self {
            Profile::Standard => STANDARD_TOKENS,
            Profile::Rich => RICH_TOKENS,
        };
        tokens.iter().map(|t| t.to_string()).collect()
    }

    /// Backend tuning for this profile
    pub fn options(&self, target_ratio: f64) -> Map<String, Value> {
        let Profile::Rich = self else {
            return Map::new();
        };

        let options = json!({
            "condition_compare": true,
            "condition_in_question": "guidance",
            "rank_method": "longllmlingua",
            "use_sentence_level_filter": false,
            "use_context_level_filter": true,
            "use_token_level_filter": true,
            "keep_split": true,
            "keep_first_sentence": 3,
            "keep_last_sentence": 1,
            "keep_sentence_number": 5,
            "high_priority_bonus": 100,
            "context_budget": "+100",
            "token_budget_ratio": target_ratio,
        });

        match options {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Standard => write!(f, "standard"),
            Profile::Rich => write!(f, "rich"),
        }
    }
}
