use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

#[derive(Debug, confique::Config)]
pub struct Config {
    /// Quiet period before the suggestion pipeline fetches.
    #[config(env = "QASSIST_DEBOUNCE_MS", default = 500)]
    pub debounce_ms: u64,
    /// Inputs shorter than this (after trimming) never reach the suggestion service.
    #[config(env = "QASSIST_MIN_INPUT_LEN", default = 5)]
    pub min_input_len: usize,
    #[config(env = "QASSIST_SUGGESTION_LIMIT", default = 10)]
    pub suggestion_limit: usize,
    #[config(env = "QASSIST_SCHEMA_CACHE_CAPACITY", default = 64)]
    pub schema_cache_capacity: u64,
    #[config(env = "QASSIST_INCLUDE_KEYWORDS", default = true)]
    pub include_keywords: bool,
    /// Scan `"..."` as a string literal instead of a quoted identifier.
    #[config(env = "QASSIST_DOUBLE_QUOTE_STRINGS", default = false)]
    pub double_quote_strings: bool,
    #[config(env = "QASSIST_FORMAT_INDENT", default = 2)]
    pub format_indent: u8,
    #[config(env = "QASSIST_FORMAT_UPPERCASE", default = true)]
    pub format_uppercase: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config::builder().env().load()?)
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring environment configuration: {e}");
            Config::builder()
                .load()
                .expect("every configuration value has a default")
        }
    })
}
