use std::time::Duration;

/// Program configuration.
///
/// Everything is read from the environment with lenient parsing; unparseable
/// values fall back to the defaults. `HEADLESS` is the single flag selecting
/// the session-provider strategy (visible local browser for debugging vs.
/// headless with a pinned, remotely fetched build).
#[derive(Clone, Debug)]
pub struct Config {
    /// Portal entry URL.
    pub portal_url: String,
    /// Run headless with a fetched pinned browser build instead of a visible
    /// local browser.
    pub headless: bool,
    /// Directory the pinned browser build is downloaded into.
    pub browser_cache_dir: String,
    /// Pinned snapshot revision to fetch; `None` uses the crate's pinned
    /// default.
    pub browser_revision: Option<u32>,
    /// Bound for element and post-login marker waits.
    pub element_timeout: Duration,
    /// Bound for the new-empty-card wait after saving a lane.
    pub confirm_timeout: Duration,
    /// Fixed delay applied after a lane confirmation timeout before
    /// continuing in degraded mode.
    pub confirm_fallback_delay: Duration,
    /// Overall bound on the submission stage.
    pub submission_timeout: Duration,
    /// Append-only audit log file, one JSON line per automation call.
    pub audit_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portal_url: "https://www.njschoolsports.com".to_string(),
            headless: false,
            browser_cache_dir: ".browser-cache".to_string(),
            browser_revision: None,
            element_timeout: Duration::from_secs(10),
            confirm_timeout: Duration::from_secs(10),
            confirm_fallback_delay: Duration::from_millis(500),
            submission_timeout: Duration::from_secs(60),
            audit_log_file: "audit_log.jsonl".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            portal_url: std::env::var("PORTAL_URL").unwrap_or(default.portal_url),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            browser_cache_dir: std::env::var("BROWSER_CACHE_DIR").unwrap_or(default.browser_cache_dir),
            browser_revision: std::env::var("BROWSER_REVISION").ok().and_then(|v| v.parse().ok()),
            element_timeout: env_secs("ELEMENT_TIMEOUT_SECS").unwrap_or(default.element_timeout),
            confirm_timeout: env_secs("CONFIRM_TIMEOUT_SECS").unwrap_or(default.confirm_timeout),
            confirm_fallback_delay: env_millis("CONFIRM_FALLBACK_DELAY_MS").unwrap_or(default.confirm_fallback_delay),
            submission_timeout: env_secs("SUBMISSION_TIMEOUT_SECS").unwrap_or(default.submission_timeout),
            audit_log_file: std::env::var("AUDIT_LOG_FILE").unwrap_or(default.audit_log_file),
        }
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    std::env::var(name).ok().and_then(|v| v.parse().ok()).map(Duration::from_secs)
}

fn env_millis(name: &str) -> Option<Duration> {
    std::env::var(name).ok().and_then(|v| v.parse().ok()).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.headless);
        assert_eq!(config.element_timeout, Duration::from_secs(10));
        assert_eq!(config.confirm_timeout, Duration::from_secs(10));
        assert_eq!(config.confirm_fallback_delay, Duration::from_millis(500));
        assert_eq!(config.submission_timeout, Duration::from_secs(60));
    }
}
