use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Radius;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How restaurant search queries the places index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// One genre keyword query, post-filtered to food categories.
    #[default]
    Keyword,
    /// One query per mapped category code, joined and merged.
    Category,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Keyword => write!(f, "keyword"),
            SearchStrategy::Category => write!(f, "category"),
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(SearchStrategy::Keyword),
            "category" => Ok(SearchStrategy::Category),
            other => Err(format!(
                "unknown search strategy '{other}' (expected 'keyword' or 'category')"
            )),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub kakao_rest_api_key: String,
    pub kakao_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_radius: Radius,
    pub search_strategy: SearchStrategy,
    pub max_pages: u32,
    pub rate_limit_per_minute: usize,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("kakao_rest_api_key", &"[redacted]")
            .field("kakao_base_url", &self.kakao_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("search_radius", &self.search_radius)
            .field("search_strategy", &self.search_strategy)
            .field("max_pages", &self.max_pages)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
