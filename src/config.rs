use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const DEFAULT_PAGE_WAIT_SECS: u64 = 3;
/// Highest page index the box-score flows will try
pub const DEFAULT_MAX_PAGES: usize = 998;

/// Runtime settings for a scrape, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub webdriver_url: String,
    pub headless: bool,
    /// Fixed delay before every element lookup
    pub page_wait: Duration,
    pub max_pages: usize,
    pub cache_dir: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: false,
            page_wait: Duration::from_secs(DEFAULT_PAGE_WAIT_SECS),
            max_pages: DEFAULT_MAX_PAGES,
            cache_dir: PathBuf::from("cache"),
        }
    }
}

impl ScrapeConfig {
    /// Build from `NBA_*` environment variables, falling back to defaults for
    /// anything unset or unparsable
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let page_wait = lookup("NBA_PAGE_WAIT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.page_wait);

        let max_pages = lookup("NBA_MAX_PAGES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_pages);

        Self {
            webdriver_url: lookup("NBA_WEBDRIVER_URL").unwrap_or(defaults.webdriver_url),
            headless: lookup("NBA_HEADLESS").unwrap_or_default() == "1",
            page_wait,
            max_pages,
            cache_dir: lookup("NBA_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
        }
    }
}
