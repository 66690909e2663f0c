//! 剧本解析适配器

mod llm_script_parser;

pub use llm_script_parser::{LlmScriptParser, LlmScriptParserConfig};
