//! Runtime settings shared by the binary and the task layer

use std::time::Duration;

pub const API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub api_base: String,
    pub page_size: usize,
    /// Quiet period before a typed search term is committed.
    pub search_debounce: Duration,
}

impl Settings {
    pub fn new(api_base: impl Into<String>, page_size: usize, debounce_ms: u64) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            page_size: page_size.max(1),
            search_debounce: Duration::from_millis(debounce_ms),
        }
    }
}
